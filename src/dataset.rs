//! Loading a delimited file into a feature matrix and a label vector, and
//! splitting it into train/test subsets.
use log::{debug, info};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::{io, path::Path};

use crate::error::{BayesError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Header names of the feature columns, label column excluded.
    pub feature_names: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub labels: Vec<String>,
}

impl Dataset {
    pub fn from_path<P: AsRef<Path>>(path: P, label_column: &str) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path.as_ref())?;
        info!("loading {}", path.as_ref().display());
        Self::from_csv(reader, label_column)
    }

    pub fn from_reader<R: io::Read>(rdr: R, label_column: &str) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(rdr);
        Self::from_csv(reader, label_column)
    }

    fn from_csv<R: io::Read>(mut reader: csv::Reader<R>, label_column: &str) -> Result<Self> {
        let headers = reader.headers()?.clone();
        let label_idx = headers
            .iter()
            .position(|name| name == label_column)
            .ok_or_else(|| BayesError::MissingColumn(label_column.to_string()))?;

        let feature_names = headers
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != label_idx)
            .map(|(_, name)| name.to_string())
            .collect();

        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for record in reader.records() {
            let record = record?;

            let mut row = Vec::with_capacity(record.len().saturating_sub(1));
            for (i, field) in record.iter().enumerate() {
                if i == label_idx {
                    labels.push(field.to_string());
                } else {
                    row.push(field.to_string());
                }
            }
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(BayesError::EmptyDataset);
        }
        debug!("read {} rows with label column `{}`", rows.len(), label_column);

        Ok(Dataset {
            feature_names,
            rows,
            labels,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Shuffles the rows with a seeded RNG and returns `(train, test)`, where
    /// the test subset holds `ceil(test_size * len)` rows.
    pub fn train_test_split(&self, test_size: f64, seed: u64) -> Result<(Dataset, Dataset)> {
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(BayesError::InvalidSplit(format!(
                "test size must be in (0, 1), got {}",
                test_size
            )));
        }

        let n = self.len();
        let n_test = (test_size * n as f64).ceil() as usize;
        if n_test == 0 || n_test >= n {
            return Err(BayesError::InvalidSplit(format!(
                "test size {} leaves an empty subset of {} rows",
                test_size, n
            )));
        }

        let mut indices: Vec<usize> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let (test_idx, train_idx) = indices.split_at(n_test);
        info!(
            "split {} rows into {} train / {} test (seed {})",
            n,
            train_idx.len(),
            test_idx.len(),
            seed
        );
        Ok((self.subset(train_idx), self.subset(test_idx)))
    }

    fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            feature_names: self.feature_names.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i].clone()).collect(),
        }
    }
}
