//! Categorical Naive Bayes for the Nursery dataset: the classifier, plus the
//! CSV loading, splitting, encoding and reporting needed to evaluate it.
pub mod bayes;
pub mod config;
pub mod dataset;
pub mod encoding;
pub mod error;
pub mod report;

pub use bayes::NaiveBayesClassifier;
pub use dataset::Dataset;
pub use error::{BayesError, Result};
