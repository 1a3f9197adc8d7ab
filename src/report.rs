//! Per-class precision/recall/F1 and the confusion matrix, computed from a
//! sequence of true labels and a sequence of predicted labels.
use std::{
    collections::{BTreeSet, HashMap},
    fmt,
    hash::Hash,
};

use crate::error::{BayesError, Result};

fn check_lengths<L>(y_true: &[L], y_pred: &[L]) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(BayesError::InvalidTrainingData(format!(
            "{} true labels but {} predictions",
            y_true.len(),
            y_pred.len()
        )));
    }
    if y_true.is_empty() {
        return Err(BayesError::DivisionByZero);
    }
    Ok(())
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMatrix<L> {
    /// Sorted union of the true and predicted labels.
    pub labels: Vec<L>,
    /// `counts[i][j]`: rows whose true label is `labels[i]` and predicted is `labels[j]`.
    pub counts: Vec<Vec<usize>>,
}

impl<L> ConfusionMatrix<L>
where
    L: Ord + Hash + Clone,
{
    pub fn new(y_true: &[L], y_pred: &[L]) -> Result<Self> {
        check_lengths(y_true, y_pred)?;

        let labels: Vec<L> = y_true
            .iter()
            .chain(y_pred)
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let index: HashMap<&L, usize> = labels.iter().enumerate().map(|(i, l)| (l, i)).collect();

        let mut counts = vec![vec![0usize; labels.len()]; labels.len()];
        for (actual, predicted) in y_true.iter().zip(y_pred) {
            counts[index[actual]][index[predicted]] += 1;
        }

        Ok(ConfusionMatrix { labels, counts })
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn correct(&self) -> usize {
        (0..self.labels.len()).map(|i| self.counts[i][i]).sum()
    }

    /// True rows per label.
    pub fn support(&self, i: usize) -> usize {
        self.counts[i].iter().sum()
    }

    /// Predicted rows per label.
    pub fn predicted(&self, i: usize) -> usize {
        self.counts.iter().map(|row| row[i]).sum()
    }
}

impl<L: fmt::Display> fmt::Display for ConfusionMatrix<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.labels.iter().map(|l| l.to_string()).collect();
        let width = names
            .iter()
            .map(String::len)
            .chain(self.counts.iter().flatten().map(|c| c.to_string().len()))
            .max()
            .unwrap_or(0);

        write!(f, "{:>width$}", "", width = width)?;
        for name in &names {
            write!(f, " {:>width$}", name, width = width)?;
        }
        writeln!(f)?;

        for (name, row) in names.iter().zip(&self.counts) {
            write!(f, "{:>width$}", name, width = width)?;
            for count in row {
                write!(f, " {:>width$}", count, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport<L> {
    pub labels: Vec<L>,
    pub per_class: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
}

impl<L> ClassificationReport<L>
where
    L: Ord + Hash + Clone,
{
    pub fn new(y_true: &[L], y_pred: &[L]) -> Result<Self> {
        Ok(Self::from_confusion(&ConfusionMatrix::new(y_true, y_pred)?))
    }

    pub fn from_confusion(matrix: &ConfusionMatrix<L>) -> Self {
        let per_class: Vec<ClassMetrics> = (0..matrix.labels.len())
            .map(|i| {
                let tp = matrix.counts[i][i];
                let support = matrix.support(i);
                let precision = ratio(tp, matrix.predicted(i));
                let recall = ratio(tp, support);
                let f1 = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };
                ClassMetrics {
                    precision,
                    recall,
                    f1,
                    support,
                }
            })
            .collect();

        let total = matrix.total();
        let n_labels = per_class.len() as f64;
        let average = |weight: &dyn Fn(&ClassMetrics) -> f64, norm: f64| ClassMetrics {
            precision: per_class.iter().map(|m| weight(m) * m.precision).sum::<f64>() / norm,
            recall: per_class.iter().map(|m| weight(m) * m.recall).sum::<f64>() / norm,
            f1: per_class.iter().map(|m| weight(m) * m.f1).sum::<f64>() / norm,
            support: total,
        };
        let macro_avg = average(&|_| 1.0, n_labels);
        let weighted_avg = average(&|m| m.support as f64, total as f64);

        ClassificationReport {
            labels: matrix.labels.clone(),
            accuracy: ratio(matrix.correct(), total),
            per_class,
            macro_avg,
            weighted_avg,
        }
    }
}

impl<L: fmt::Display> fmt::Display for ClassificationReport<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.labels.iter().map(|l| l.to_string()).collect();
        let width = names
            .iter()
            .map(String::len)
            .chain(std::iter::once("weighted avg".len()))
            .max()
            .unwrap_or(0);

        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support",
            width = width
        )?;
        writeln!(f)?;

        let line = |f: &mut fmt::Formatter<'_>, name: &str, m: &ClassMetrics| {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                name, m.precision, m.recall, m.f1, m.support,
                width = width
            )
        };
        for (name, m) in names.iter().zip(&self.per_class) {
            line(f, name, m)?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, self.macro_avg.support,
            width = width
        )?;
        line(f, "macro avg", &self.macro_avg)?;
        line(f, "weighted avg", &self.weighted_avg)
    }
}
