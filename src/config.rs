use clap::Parser;
use std::path::PathBuf;

/// Class set of the Nursery dataset, in the order used for tie-breaking.
pub const NURSERY_CLASSES: [&str; 5] = [
    "not_recom",
    "recommend",
    "very_recom",
    "priority",
    "spec_prior",
];

/// Train and evaluate a categorical Naive Bayes classifier on a CSV dataset.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Config {
    /// Path to the CSV file (header row required).
    #[arg(default_value = "Datasets/nursery.csv")]
    pub data: PathBuf,

    /// Name of the column holding the class label.
    #[arg(long, default_value = "label")]
    pub label_column: String,

    /// Fraction of rows held out for testing.
    #[arg(long, default_value_t = 0.3)]
    pub test_size: f64,

    /// Seed for the train/test shuffle.
    #[arg(long, default_value_t = 87)]
    pub seed: u64,

    /// Comma-separated class set; order decides ties.
    #[arg(long, value_delimiter = ',', default_values_t = NURSERY_CLASSES.map(String::from))]
    pub classes: Vec<String>,

    /// Encode every token as an integer before training.
    #[arg(long)]
    pub encode: bool,

    /// Build the probability table column-by-column on the rayon pool.
    #[arg(long)]
    pub parallel: bool,
}
