//! Categorical Naive Bayes classifier.
//!
//! Every attribute is treated as a categorical token. For each column the
//! classifier stores, per observed value, one entry per configured class equal
//! to `count(value, class) / N`, where `N` is the number of training rows.
//! Note that this is an estimate of `P(value, class)`, not of `P(class | value)`,
//! and no class prior is applied when scoring.
use log::{debug, info, warn};
use rayon::prelude::*;
use std::{collections::HashMap, hash::Hash};

use crate::error::{BayesError, Result};

/// Per column: observed value -> one probability per class, in class-set order.
pub type ProbabilityTable<V> = Vec<HashMap<V, Vec<f64>>>;

pub struct NaiveBayesClassifier<V = String, K = String> {
    classes: Vec<K>,
    attr_probs: Option<ProbabilityTable<V>>,
}

impl<V, K> NaiveBayesClassifier<V, K>
where
    V: Eq + Hash + Clone,
    K: PartialEq + Clone,
{
    pub fn new(classes: Vec<K>) -> Result<Self> {
        if classes.is_empty() {
            return Err(BayesError::InvalidConfiguration(
                "class set must not be empty".to_string(),
            ));
        }
        for (i, class) in classes.iter().enumerate() {
            if classes[..i].contains(class) {
                return Err(BayesError::InvalidConfiguration(format!(
                    "class at position {} is a duplicate",
                    i
                )));
            }
        }

        Ok(NaiveBayesClassifier {
            classes,
            attr_probs: None,
        })
    }

    pub fn classes(&self) -> &[K] {
        &self.classes
    }

    pub fn is_trained(&self) -> bool {
        self.attr_probs.is_some()
    }

    /// Number of columns seen during `fit`, if trained.
    pub fn n_columns(&self) -> Option<usize> {
        self.attr_probs.as_ref().map(|table| table.len())
    }

    pub fn table(&self) -> Result<&ProbabilityTable<V>> {
        self.attr_probs.as_ref().ok_or(BayesError::UntrainedModel)
    }

    /// Builds the probability table from scratch, replacing any previous one.
    /// On error the classifier keeps whatever state it had before the call.
    pub fn fit(&mut self, data: &[Vec<V>], labels: &[K]) -> Result<()> {
        let num_cols = validate_training_data(data, labels)?;
        let row_classes = self.class_indices(labels);

        let table = (0..num_cols)
            .map(|col| column_probs(data, &row_classes, col, self.classes.len()))
            .collect();

        self.install(table, data.len());
        Ok(())
    }

    pub fn probability(&self, column: usize, value: &V, class: &K) -> Option<f64> {
        let class_idx = self.classes.iter().position(|k| k == class)?;
        let probs = self.attr_probs.as_ref()?.get(column)?.get(value)?;
        probs.get(class_idx).copied()
    }

    /// Unnormalised score of each class for `row`, in class-set order.
    pub fn class_scores(&self, row: &[V]) -> Result<Vec<f64>> {
        let table = self.table()?;
        if row.len() != table.len() {
            return Err(BayesError::ShapeMismatch {
                expected: table.len(),
                got: row.len(),
            });
        }

        let mut scores = vec![1.0; self.classes.len()];
        for (col_probs, value) in table.iter().zip(row) {
            match col_probs.get(value) {
                Some(probs) => scores
                    .iter_mut()
                    .zip(probs)
                    .for_each(|(score, p)| *score *= p),
                // Never observed in this column: no class has evidence for it.
                None => scores.fill(0.0),
            }
        }

        Ok(scores)
    }

    /// Given a single record, predicts its class. Ties go to the class that
    /// comes first in the configured order, including the case where every
    /// score is zero.
    pub fn predict_one(&self, row: &[V]) -> Result<&K> {
        let scores = self.class_scores(row)?;

        let (best_idx, _) = scores.iter().enumerate().skip(1).fold(
            (0, scores[0]),
            |(best_idx, best_score), (idx, &score)| {
                if score > best_score {
                    (idx, score)
                } else {
                    (best_idx, best_score)
                }
            },
        );

        Ok(&self.classes[best_idx])
    }

    pub fn predict(&self, data: &[Vec<V>]) -> Result<Vec<K>> {
        self.table()?;
        data.iter()
            .map(|row| self.predict_one(row).cloned())
            .collect()
    }

    /// Fraction of rows in `data` whose prediction equals the matching label.
    pub fn score(&self, data: &[Vec<V>], labels: &[K]) -> Result<f64> {
        self.table()?;
        check_score_lengths(data.len(), labels.len())?;

        accuracy(&self.predict(data)?, labels)
    }

    fn class_indices(&self, labels: &[K]) -> Vec<Option<usize>> {
        let row_classes: Vec<Option<usize>> = labels
            .iter()
            .map(|label| self.classes.iter().position(|k| k == label))
            .collect();

        let ignored = row_classes.iter().filter(|k| k.is_none()).count();
        if ignored > 0 {
            warn!(
                "{} training rows carry a label outside the class set and only count toward N",
                ignored
            );
        }

        row_classes
    }

    fn install(&mut self, table: ProbabilityTable<V>, num_train: usize) {
        for (col, col_probs) in table.iter().enumerate() {
            debug!("column {}: {} distinct values", col, col_probs.len());
        }
        info!(
            "fitted {} columns over {} rows and {} classes",
            table.len(),
            num_train,
            self.classes.len()
        );
        self.attr_probs = Some(table);
    }
}

impl<V, K> NaiveBayesClassifier<V, K>
where
    V: Eq + Hash + Clone + Send + Sync,
    K: PartialEq + Clone,
{
    /// Same as `fit`, but computes the columns on the rayon thread pool.
    /// Each column is built by the same sequential code, so the resulting
    /// table is identical to the one `fit` produces.
    pub fn fit_parallel(&mut self, data: &[Vec<V>], labels: &[K]) -> Result<()> {
        let num_cols = validate_training_data(data, labels)?;
        let row_classes = self.class_indices(labels);
        let num_classes = self.classes.len();

        let table = (0..num_cols)
            .into_par_iter()
            .map(|col| column_probs(data, &row_classes, col, num_classes))
            .collect();

        self.install(table, data.len());
        Ok(())
    }
}

/// Fraction of `predicted` equal to the matching entry of `labels`.
pub fn accuracy<K: PartialEq>(predicted: &[K], labels: &[K]) -> Result<f64> {
    check_score_lengths(predicted.len(), labels.len())?;

    let correct = predicted
        .iter()
        .zip(labels)
        .filter(|(predicted, actual)| predicted == actual)
        .count();

    info!("scored {} rows: {}/{} correct", labels.len(), correct, labels.len());
    Ok(correct as f64 / labels.len() as f64)
}

fn check_score_lengths(rows: usize, labels: usize) -> Result<()> {
    if rows != labels {
        return Err(BayesError::InvalidTrainingData(format!(
            "{} rows but {} labels",
            rows, labels
        )));
    }
    if rows == 0 {
        return Err(BayesError::DivisionByZero);
    }
    Ok(())
}

/// Checks shape preconditions and returns the column count.
fn validate_training_data<V, K>(data: &[Vec<V>], labels: &[K]) -> Result<usize> {
    let first = data
        .first()
        .ok_or_else(|| BayesError::InvalidTrainingData("training matrix has no rows".to_string()))?;

    if data.len() != labels.len() {
        return Err(BayesError::InvalidTrainingData(format!(
            "{} rows but {} labels",
            data.len(),
            labels.len()
        )));
    }

    let num_cols = first.len();
    if num_cols == 0 {
        return Err(BayesError::InvalidTrainingData(
            "training rows have no columns".to_string(),
        ));
    }
    if let Some(i) = data.iter().position(|row| row.len() != num_cols) {
        return Err(BayesError::InvalidTrainingData(format!(
            "row {} has {} columns, expected {}",
            i,
            data[i].len(),
            num_cols
        )));
    }

    Ok(num_cols)
}

fn column_probs<V>(
    data: &[Vec<V>],
    row_classes: &[Option<usize>],
    col: usize,
    num_classes: usize,
) -> HashMap<V, Vec<f64>>
where
    V: Eq + Hash + Clone,
{
    // Count co-occurrences of each value with each class:
    let mut counts = HashMap::new();
    for (row, class) in data.iter().zip(row_classes) {
        let Some(class) = *class else {
            continue;
        };

        counts
            .entry(row[col].clone())
            .or_insert_with(|| vec![0usize; num_classes])[class] += 1;
    }

    // Counts to probabilities, zeros included:
    let num_train = data.len() as f64;
    counts
        .into_iter()
        .map(|(value, class_counts)| {
            let probs = class_counts
                .into_iter()
                .map(|count| count as f64 / num_train)
                .collect();
            (value, probs)
        })
        .collect()
}
