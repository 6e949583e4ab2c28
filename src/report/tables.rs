//! Terminal table builders for the analysis report

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Table};

use crate::pipeline::ColumnSummary;

/// Descriptive statistics table, one row per numeric column.
pub fn descriptive_stats_table(summaries: &[ColumnSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        ["column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"]
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );

    let num = |v: f64| Cell::new(format!("{:.2}", v)).set_alignment(CellAlignment::Right);

    for s in summaries {
        table.add_row(vec![
            Cell::new(&s.name),
            Cell::new(s.count).set_alignment(CellAlignment::Right),
            num(s.mean),
            num(s.std),
            num(s.min),
            num(s.q25),
            num(s.median),
            num(s.q75),
            num(s.max),
        ]);
    }

    table
}

/// Top-N feature importance table, pre-sorted input.
pub fn importance_table(ranking: &[(&str, f64)], top: usize) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("feature").add_attribute(Attribute::Bold),
        Cell::new("importance").add_attribute(Attribute::Bold),
    ]);

    for (name, importance) in ranking.iter().take(top) {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(format!("{:.4}", importance)).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

/// Print a table indented to match the step output layout.
pub fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}
