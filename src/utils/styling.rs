//! Terminal styling utilities for the analysis report

use console::style;
use std::path::Path;
use std::time::Duration;

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {}",
        style("F R A U D S C O P E").cyan().bold()
    );
    println!(
        "    {}",
        style("Exploratory fraud analysis over transaction data").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("─".repeat(50)).dim());
    println!();
}

/// Print the run configuration card
pub fn print_config(
    input: &Path,
    target: &str,
    seed: u64,
    trees: usize,
    test_fraction: f64,
    iqr_multiplier: f64,
) {
    println!("    {}", style("Configuration").cyan().bold());
    println!("    {}", style("─".repeat(50)).dim());
    println!("      Input:          {}", input.display());
    println!("      Target:         {}", target);
    println!(
        "      Seed:           {}",
        style(seed).yellow()
    );
    println!(
        "      Trees:          {}",
        style(trees).yellow()
    );
    println!(
        "      Test fraction:  {}",
        style(format!("{:.2}", test_fraction)).yellow()
    );
    println!(
        "      IQR multiplier: {}",
        style(format!("{:.1}", iqr_multiplier)).yellow()
    );
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", style("·").dim(), message);
}

/// Print the elapsed time for a step
pub fn print_step_time(elapsed: Duration) {
    println!(
        "    {}",
        style(format!("({:.2}s)", elapsed.as_secs_f64())).dim()
    );
}

/// Print the final completion message
pub fn print_completion(elapsed: Duration) {
    println!();
    println!(
        "    {} {}",
        style(">>").cyan(),
        style(format!(
            "Fraudscope analysis complete in {:.2}s",
            elapsed.as_secs_f64()
        ))
        .green()
        .bold()
    );
    println!();
}
