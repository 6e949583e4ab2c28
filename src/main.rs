//! Fraudscope: Exploratory Fraud Analysis CLI
//!
//! A command-line tool that runs a single-pass fraud analysis over a
//! transaction dataset: descriptive statistics, IQR outlier flagging,
//! z-score standardization, correlation analysis, and a random forest
//! classifier with full evaluation reporting.

mod cli;
mod model;
mod pipeline;
mod report;
mod utils;

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use cli::Cli;
use model::{FeatureMatrix, ForestParams, RandomForest};
use pipeline::{
    correlations_with_target, dataset_size, describe_numeric, drop_missing_target,
    encode_features, flag_outliers, load_dataset, standardize, stratified_split, validate_schema,
    AnalysisConfig,
};
use report::{
    descriptive_stats_table, evaluate, importance_table, print_indented, write_report,
    ImportanceEntry, RunMetadata, RunReport,
};
use utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_info, print_step_header, print_step_time, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let run_start = Instant::now();

    let config = AnalysisConfig {
        target_column: cli.target.clone(),
        ..Default::default()
    };

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        &cli.input,
        &config.target_column,
        cli.seed,
        cli.trees,
        cli.test_fraction,
        cli.iqr_multiplier,
    );

    // Step 1: Load dataset and validate the schema contract
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Loading dataset...");
    let df = load_dataset(&cli.input, cli.infer_schema_length)?;
    validate_schema(&df, &config)?;
    let df = drop_missing_target(&df, &config.target_column)?;
    let (rows, cols, memory_mb) = dataset_size(&df);
    finish_with_success(&spinner, "Dataset loaded");
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);
    print_step_time(step_start.elapsed());

    // Step 2: Descriptive statistics
    print_step_header(2, "Descriptive Statistics");
    let step_start = Instant::now();
    let summaries = describe_numeric(&df, &config.numeric_columns)?;
    print_indented(&descriptive_stats_table(&summaries));
    print_step_time(step_start.elapsed());

    // Step 3: IQR outlier flagging
    print_step_header(3, "IQR Outlier Detection");
    let step_start = Instant::now();
    let (df, outlier_summaries) = flag_outliers(&df, &config.outlier_columns, cli.iqr_multiplier)?;
    for summary in &outlier_summaries {
        println!(
            "      {}: {} outliers, bounds=({:.2}, {:.2})",
            summary.column,
            style(summary.outliers).yellow().bold(),
            summary.lower_bound,
            summary.upper_bound
        );
    }
    print_success("Added outlier flag columns");
    print_step_time(step_start.elapsed());

    // Step 4: Z-score standardization
    print_step_header(4, "Z-Score Standardization");
    let step_start = Instant::now();
    let (df, z_summaries) = standardize(&df, &config.standardize_columns)?;
    print_info("Scaling fit over the full dataset (population std)");
    for summary in &z_summaries {
        println!(
            "      {}: min={:.2}, max={:.2}",
            summary.column, summary.z_min, summary.z_max
        );
    }
    print_step_time(step_start.elapsed());

    // Step 5: Correlation with the fraud label
    print_step_header(5, "Correlation with Fraud Label");
    let step_start = Instant::now();
    let correlations =
        correlations_with_target(&df, &config.numeric_columns, &config.target_column)?;
    for corr in &correlations {
        println!(
            "      {:<22} {}",
            corr.feature,
            style(format!("{:+.4}", corr.correlation)).yellow()
        );
    }
    print_step_time(step_start.elapsed());

    // Step 6: Feature encoding
    print_step_header(6, "Feature Encoding");
    let step_start = Instant::now();
    let encoded = encode_features(&df, &config)?;
    let matrix = FeatureMatrix::from_encoded(&encoded, &config.target_column)?;
    println!(
        "      Model matrix: {} rows x {} features",
        matrix.n_rows(),
        matrix.n_features()
    );
    print_success("Encoded categorical features");
    print_step_time(step_start.elapsed());

    // Step 7: Stratified train/test split
    print_step_header(7, "Train/Test Split");
    let step_start = Instant::now();
    let split = stratified_split(&matrix.labels, cli.test_fraction, cli.seed)?;
    let train = matrix.subset(&split.train);
    let test = matrix.subset(&split.test);
    let fraud_count = |labels: &[i64]| labels.iter().filter(|&&l| l > 0).count();
    println!(
        "      Train: {} rows ({} fraud)  Test: {} rows ({} fraud)",
        train.n_rows(),
        fraud_count(&train.labels),
        test.n_rows(),
        fraud_count(&test.labels)
    );
    print_step_time(step_start.elapsed());

    // Step 8: Random forest training
    print_step_header(8, "Random Forest Training");
    let step_start = Instant::now();
    let mut forest = RandomForest::new(ForestParams {
        n_trees: cli.trees,
        max_depth: cli.max_depth,
        seed: cli.seed,
        ..Default::default()
    });
    forest.fit(&train);
    print_success(&format!("Trained {} trees", forest.n_trees()));
    print_step_time(step_start.elapsed());

    // Step 9: Evaluation
    print_step_header(9, "Evaluation");
    let step_start = Instant::now();
    let predictions = forest.predict(&test);
    let evaluation = evaluate(&test.labels, &predictions);

    println!(
        "      Accuracy: {}",
        style(format!("{:.1}%", evaluation.accuracy * 100.0))
            .green()
            .bold()
    );
    println!();
    println!("      Confusion matrix (rows=true, cols=pred):");
    print_indented(&evaluation.confusion_table());
    println!();
    println!("      Classification report:");
    print_indented(&evaluation.classification_report_table());
    println!();
    println!(
        "      Top {} feature importances:",
        cli.top_importances
    );
    let ranking = forest.importance_ranking();
    print_indented(&importance_table(&ranking, cli.top_importances));
    print_step_time(step_start.elapsed());

    // Optional machine-readable export
    if let Some(export_path) = &cli.export {
        let report = RunReport {
            metadata: RunMetadata::now(
                &cli.input,
                &config.target_column,
                cli.seed,
                cli.trees,
                cli.test_fraction,
                cli.iqr_multiplier,
            ),
            rows,
            descriptive_stats: summaries,
            outliers: outlier_summaries,
            z_scores: z_summaries,
            correlations,
            evaluation,
            feature_importances: ranking
                .iter()
                .map(|(name, importance)| ImportanceEntry {
                    feature: name.to_string(),
                    importance: *importance,
                })
                .collect(),
        };
        write_report(&report, export_path)?;
        print_success(&format!("Report exported to {}", export_path.display()));
    }

    print_completion(run_start.elapsed());
    Ok(())
}
