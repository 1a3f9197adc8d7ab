use nursery_bayes::{
    config::NURSERY_CLASSES,
    encoding::{self, LabelEncoder},
    report::{ClassificationReport, ConfusionMatrix},
    BayesError, Dataset, NaiveBayesClassifier,
};

const SAMPLE: &str = "\
parents,has_nurs,health,label
usual,proper,recommended,priority
usual,proper,priority,priority
usual,improper,not_recom,not_recom
pretentious,proper,recommended,priority
pretentious,less_proper,priority,priority
pretentious,improper,not_recom,not_recom
great_pret,critical,recommended,spec_prior
great_pret,very_crit,priority,spec_prior
great_pret,critical,not_recom,not_recom
usual,very_crit,recommended,spec_prior
usual,less_proper,recommended,very_recom
great_pret,very_crit,not_recom,not_recom
";

fn nursery_classes() -> Vec<String> {
    NURSERY_CLASSES.iter().map(|c| c.to_string()).collect()
}

#[test]
fn load_split_fit_score() {
    let data = Dataset::from_reader(SAMPLE.as_bytes(), "label").unwrap();
    let (train, test) = data.train_test_split(0.25, 87).unwrap();
    assert_eq!((train.len(), test.len()), (9, 3));

    let mut nb = NaiveBayesClassifier::new(nursery_classes()).unwrap();
    nb.fit(&train.rows, &train.labels).unwrap();

    let predictions = nb.predict(&test.rows).unwrap();
    assert_eq!(predictions.len(), test.len());
    assert!(predictions.iter().all(|p| NURSERY_CLASSES.contains(&p.as_str())));

    let accuracy = nb.score(&test.rows, &test.labels).unwrap();
    assert!((0.0..=1.0).contains(&accuracy));

    let report = ClassificationReport::new(&test.labels, &predictions).unwrap();
    assert_eq!(report.accuracy, accuracy);
}

#[test]
fn health_column_separates_not_recom() {
    let data = Dataset::from_reader(SAMPLE.as_bytes(), "label").unwrap();
    let mut nb = NaiveBayesClassifier::new(nursery_classes()).unwrap();
    nb.fit(&data.rows, &data.labels).unwrap();

    let row: Vec<String> = ["usual", "proper", "not_recom"]
        .iter()
        .map(|v| v.to_string())
        .collect();
    // "proper" never co-occurs with not_recom, so every class scores zero.
    assert!(nb.class_scores(&row).unwrap().iter().all(|&s| s == 0.0));
    assert_eq!(nb.predict_one(&row).unwrap(), "not_recom");

    let row: Vec<String> = ["great_pret", "critical", "not_recom"]
        .iter()
        .map(|v| v.to_string())
        .collect();
    assert_eq!(nb.predict_one(&row).unwrap(), "not_recom");

    let row: Vec<String> = ["pretentious", "proper", "recommended"]
        .iter()
        .map(|v| v.to_string())
        .collect();
    assert_eq!(nb.predict_one(&row).unwrap(), "priority");

    // Every stored entry is count / 12.
    let table = nb.table().unwrap();
    assert_eq!(table[2]["not_recom"], vec![4.0 / 12.0, 0.0, 0.0, 0.0, 0.0]);
    assert_eq!(table[0]["usual"], vec![1.0 / 12.0, 0.0, 1.0 / 12.0, 2.0 / 12.0, 1.0 / 12.0]);
}

#[test]
fn encoded_tokens_give_the_same_predictions() {
    let data = Dataset::from_reader(SAMPLE.as_bytes(), "label").unwrap();

    let mut plain = NaiveBayesClassifier::new(nursery_classes()).unwrap();
    plain.fit(&data.rows, &data.labels).unwrap();
    let expected = plain.predict(&data.rows).unwrap();

    let feature_encoders = encoding::fit_columns(&data.rows);
    let labels: Vec<&str> = data
        .labels
        .iter()
        .map(String::as_str)
        .chain(NURSERY_CLASSES)
        .collect();
    let label_encoder = LabelEncoder::fit(&labels);

    let rows = encoding::encode_rows(&feature_encoders, &data.rows).unwrap();
    let classes = label_encoder.transform(&NURSERY_CLASSES).unwrap();
    let mut encoded = NaiveBayesClassifier::new(classes).unwrap();
    encoded
        .fit(&rows, &label_encoder.transform(&data.labels).unwrap())
        .unwrap();
    let predicted = label_encoder
        .inverse_transform(&encoded.predict(&rows).unwrap())
        .unwrap();

    assert_eq!(predicted, expected);
}

#[test]
fn parallel_training_is_identical() {
    let data = Dataset::from_reader(SAMPLE.as_bytes(), "label").unwrap();

    let mut sequential = NaiveBayesClassifier::new(nursery_classes()).unwrap();
    sequential.fit(&data.rows, &data.labels).unwrap();
    let mut parallel = NaiveBayesClassifier::new(nursery_classes()).unwrap();
    parallel.fit_parallel(&data.rows, &data.labels).unwrap();

    assert_eq!(sequential.table().unwrap(), parallel.table().unwrap());
    assert_eq!(
        sequential.predict(&data.rows).unwrap(),
        parallel.predict(&data.rows).unwrap()
    );
}

#[test]
fn report_on_predictions() {
    let data = Dataset::from_reader(SAMPLE.as_bytes(), "label").unwrap();
    let mut nb = NaiveBayesClassifier::new(nursery_classes()).unwrap();
    nb.fit(&data.rows, &data.labels).unwrap();
    let predictions = nb.predict(&data.rows).unwrap();

    let matrix = ConfusionMatrix::new(&data.labels, &predictions).unwrap();
    assert_eq!(matrix.total(), data.len());
    let report = ClassificationReport::from_confusion(&matrix);
    assert_eq!(report.accuracy, nb.score(&data.rows, &data.labels).unwrap());
}

#[test]
fn fresh_classifier_rejects_prediction() {
    let nb = NaiveBayesClassifier::<String, String>::new(nursery_classes()).unwrap();
    let row = vec!["usual".to_string()];

    assert!(matches!(nb.predict_one(&row), Err(BayesError::UntrainedModel)));
}
