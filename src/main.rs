use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use std::hash::Hash;

use nursery_bayes::{
    bayes,
    config::Config,
    encoding::{self, LabelEncoder},
    report::{ClassificationReport, ConfusionMatrix},
    Dataset, NaiveBayesClassifier,
};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("NURSERY_BAYES_LOG", "info"))
        .init();

    let config = Config::parse();

    let data = Dataset::from_path(&config.data, &config.label_column)
        .with_context(|| format!("failed to load {}", config.data.display()))?;
    let (train, test) = data
        .train_test_split(config.test_size, config.seed)
        .context("failed to split dataset")?;

    let predictions = if config.encode {
        // Encoders see the whole file so test tokens always have a code:
        let feature_encoders = encoding::fit_columns(&data.rows);
        let all_labels: Vec<&str> = data
            .labels
            .iter()
            .chain(&config.classes)
            .map(String::as_str)
            .collect();
        let label_encoder = LabelEncoder::fit(&all_labels);

        let predicted = evaluate(
            &config,
            label_encoder.transform(&config.classes)?,
            encoding::encode_rows(&feature_encoders, &train.rows)?,
            label_encoder.transform(&train.labels)?,
            encoding::encode_rows(&feature_encoders, &test.rows)?,
            label_encoder.transform(&test.labels)?,
        )?;
        label_encoder.inverse_transform(&predicted)?
    } else {
        evaluate(
            &config,
            config.classes.clone(),
            train.rows,
            train.labels,
            test.rows,
            test.labels.clone(),
        )?
    };

    let matrix = ConfusionMatrix::new(&test.labels, &predictions)?;
    println!("{}", ClassificationReport::from_confusion(&matrix));
    println!("{}", matrix);

    Ok(())
}

/// Fits on the train split, prints the test accuracy and returns the test predictions.
fn evaluate<V, K>(
    config: &Config,
    classes: Vec<K>,
    train_rows: Vec<Vec<V>>,
    train_labels: Vec<K>,
    test_rows: Vec<Vec<V>>,
    test_labels: Vec<K>,
) -> Result<Vec<K>>
where
    V: Eq + Hash + Clone + Send + Sync,
    K: PartialEq + Clone,
{
    let mut classifier = NaiveBayesClassifier::new(classes).context("invalid class set")?;
    let fitted = if config.parallel {
        classifier.fit_parallel(&train_rows, &train_labels)
    } else {
        classifier.fit(&train_rows, &train_labels)
    };
    fitted.context("training failed")?;

    let predictions = classifier.predict(&test_rows)?;
    println!("Accuracy: {}", bayes::accuracy(&predictions, &test_labels)?);

    Ok(predictions)
}
