//! Integration tests for the full analysis pipeline

use fraudscope::model::{FeatureMatrix, ForestParams, RandomForest};
use fraudscope::pipeline::*;
use fraudscope::report::evaluate;

#[path = "common/mod.rs"]
mod common;

/// Run the full pipeline over the 100-row fixture (10 fraud rows) with the
/// default seed and check the end-to-end contract: exact 75/25 stratified
/// split, both classes in the confusion matrix, accuracy in [0, 1] and
/// normalized importances.
#[test]
fn test_end_to_end_scenario() {
    let mut df = common::fraud_frame(100);
    let (_temp_dir, csv_path) = common::create_temp_csv(&mut df);
    let config = AnalysisConfig::default();

    // Load and validate
    let df = load_dataset(&csv_path, 100).unwrap();
    validate_schema(&df, &config).unwrap();
    let df = drop_missing_target(&df, &config.target_column).unwrap();
    assert_eq!(df.height(), 100);

    // Descriptive statistics cover every numeric column
    let summaries = describe_numeric(&df, &config.numeric_columns).unwrap();
    assert_eq!(summaries.len(), 12);
    for s in &summaries {
        assert_eq!(s.count, 100);
        assert!(s.min <= s.q25 && s.q25 <= s.median);
        assert!(s.median <= s.q75 && s.q75 <= s.max);
    }

    // Outlier flagging keeps every row
    let (df, outlier_summaries) =
        flag_outliers(&df, &config.outlier_columns, 1.5).unwrap();
    assert_eq!(df.height(), 100);
    assert_eq!(outlier_summaries.len(), 4);

    // Standardization appends finite z columns
    let (df, z_summaries) = standardize(&df, &config.standardize_columns).unwrap();
    for z in &z_summaries {
        assert!(z.z_min.is_finite() && z.z_max.is_finite());
    }

    // Correlations exist for the signal-bearing columns
    let correlations =
        correlations_with_target(&df, &config.numeric_columns, &config.target_column).unwrap();
    assert!(correlations.len() > 1);

    // Encode and split
    let encoded = encode_features(&df, &config).unwrap();
    let matrix = FeatureMatrix::from_encoded(&encoded, &config.target_column).unwrap();
    assert_eq!(matrix.n_rows(), 100);

    let split = stratified_split(&matrix.labels, 0.25, 42).unwrap();
    assert_eq!(split.train.len(), 75);
    assert_eq!(split.test.len(), 25);

    let fraud_in_test = split
        .test
        .iter()
        .filter(|&&i| matrix.labels[i] > 0)
        .count();
    assert!((2..=3).contains(&fraud_in_test));

    // Train a reduced forest (the fixture is small) and evaluate
    let train = matrix.subset(&split.train);
    let test = matrix.subset(&split.test);
    let mut forest = RandomForest::new(ForestParams {
        n_trees: 50,
        seed: 42,
        ..Default::default()
    });
    forest.fit(&train);

    let predictions = forest.predict(&test);
    let evaluation = evaluate(&test.labels, &predictions);

    assert!((0.0..=1.0).contains(&evaluation.accuracy));
    assert_eq!(evaluation.labels, vec![0, 1], "both classes must appear");
    let cell_sum: usize = evaluation.confusion.iter().flatten().sum();
    assert_eq!(cell_sum, 25);

    // Importances normalized over all encoded features
    let importances = forest.feature_importances();
    assert_eq!(importances.len(), matrix.n_features());
    assert!(importances.iter().all(|&imp| imp >= 0.0));
    let total: f64 = importances.iter().sum();
    assert!((total - 1.0).abs() < 1e-9);
}

/// The fixture's fraud signal lives in fraudamount/transactionamount; a
/// seeded forest should separate the classes well on held-out rows.
#[test]
fn test_forest_learns_fixture_signal() {
    let df = common::fraud_frame(200);
    let config = AnalysisConfig::default();

    let encoded = encode_features(&df, &config).unwrap();
    let matrix = FeatureMatrix::from_encoded(&encoded, &config.target_column).unwrap();
    let split = stratified_split(&matrix.labels, 0.25, 42).unwrap();

    let mut forest = RandomForest::new(ForestParams {
        n_trees: 50,
        seed: 42,
        ..Default::default()
    });
    forest.fit(&matrix.subset(&split.train));

    let test = matrix.subset(&split.test);
    let evaluation = evaluate(&test.labels, &forest.predict(&test));
    assert!(
        evaluation.accuracy > 0.9,
        "separable fixture should score well, got {}",
        evaluation.accuracy
    );

    // The engineered signal features dominate the ranking
    let ranking = forest.importance_ranking();
    let top3: Vec<&str> = ranking.iter().take(3).map(|(name, _)| *name).collect();
    assert!(
        top3.contains(&"fraudamount") || top3.contains(&"transactionamount"),
        "expected a signal feature in the top 3, got {:?}",
        top3
    );
}

/// Repeated runs over identical input produce identical predictions.
#[test]
fn test_pipeline_is_reproducible() {
    let df = common::fraud_frame(100);
    let config = AnalysisConfig::default();

    let run = || {
        let encoded = encode_features(&df, &config).unwrap();
        let matrix = FeatureMatrix::from_encoded(&encoded, &config.target_column).unwrap();
        let split = stratified_split(&matrix.labels, 0.25, 42).unwrap();
        let mut forest = RandomForest::new(ForestParams {
            n_trees: 20,
            seed: 42,
            ..Default::default()
        });
        forest.fit(&matrix.subset(&split.train));
        forest.predict(&matrix.subset(&split.test))
    };

    assert_eq!(run(), run());
}
