//! Classifier evaluation: accuracy, confusion matrix and per-class metrics

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Table};
use serde::Serialize;

/// Precision/recall/F1 and support for one class.
#[derive(Debug, Clone, Serialize)]
pub struct ClassMetrics {
    pub label: i64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Unweighted and support-weighted metric averages.
#[derive(Debug, Clone, Serialize)]
pub struct AverageMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Full evaluation of predictions against held-out labels.
///
/// The confusion matrix is indexed `[true][predicted]` over `labels`, and
/// its cell counts sum to the number of scored rows. Deterministic given
/// the same predictions.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub accuracy: f64,
    /// Sorted distinct labels observed in either the truth or predictions
    pub labels: Vec<i64>,
    pub confusion: Vec<Vec<usize>>,
    pub per_class: Vec<ClassMetrics>,
    pub macro_avg: AverageMetrics,
    pub weighted_avg: AverageMetrics,
    pub total: usize,
}

/// Score predictions against true labels.
///
/// # Panics
/// Panics if the slices differ in length or are empty; callers always
/// evaluate a non-empty test partition.
pub fn evaluate(y_true: &[i64], y_pred: &[i64]) -> Evaluation {
    assert_eq!(y_true.len(), y_pred.len(), "label/prediction length mismatch");
    assert!(!y_true.is_empty(), "nothing to evaluate");

    let mut labels: Vec<i64> = y_true.iter().chain(y_pred.iter()).copied().collect();
    labels.sort_unstable();
    labels.dedup();

    let index_of = |label: i64| labels.iter().position(|&l| l == label).expect("known label");

    let n_classes = labels.len();
    let mut confusion = vec![vec![0usize; n_classes]; n_classes];
    let mut correct = 0usize;

    for (&t, &p) in y_true.iter().zip(y_pred.iter()) {
        confusion[index_of(t)][index_of(p)] += 1;
        if t == p {
            correct += 1;
        }
    }

    let total = y_true.len();
    let accuracy = correct as f64 / total as f64;

    let per_class: Vec<ClassMetrics> = labels
        .iter()
        .enumerate()
        .map(|(i, &label)| {
            let tp = confusion[i][i];
            let support: usize = confusion[i].iter().sum();
            let predicted: usize = confusion.iter().map(|row| row[i]).sum();

            let precision = ratio(tp, predicted);
            let recall = ratio(tp, support);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };

            ClassMetrics {
                label,
                precision,
                recall,
                f1,
                support,
            }
        })
        .collect();

    let macro_avg = AverageMetrics {
        precision: mean(per_class.iter().map(|c| c.precision)),
        recall: mean(per_class.iter().map(|c| c.recall)),
        f1: mean(per_class.iter().map(|c| c.f1)),
    };

    let weighted_avg = AverageMetrics {
        precision: weighted(per_class.iter().map(|c| (c.precision, c.support)), total),
        recall: weighted(per_class.iter().map(|c| (c.recall, c.support)), total),
        f1: weighted(per_class.iter().map(|c| (c.f1, c.support)), total),
    };

    Evaluation {
        accuracy,
        labels,
        confusion,
        per_class,
        macro_avg,
        weighted_avg,
        total,
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn weighted(values: impl Iterator<Item = (f64, usize)>, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    values.map(|(v, w)| v * w as f64).sum::<f64>() / total as f64
}

impl Evaluation {
    /// Confusion matrix table (rows = true, cols = predicted).
    pub fn confusion_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);

        let mut header = vec![Cell::new("true \\ pred").add_attribute(Attribute::Bold)];
        header.extend(
            self.labels
                .iter()
                .map(|l| Cell::new(l).add_attribute(Attribute::Bold)),
        );
        table.set_header(header);

        for (i, label) in self.labels.iter().enumerate() {
            let mut row = vec![Cell::new(label).add_attribute(Attribute::Bold)];
            row.extend(
                self.confusion[i]
                    .iter()
                    .map(|count| Cell::new(count).set_alignment(CellAlignment::Right)),
            );
            table.add_row(row);
        }

        table
    }

    /// Per-class precision/recall/F1/support table with accuracy, macro
    /// and weighted average rows (2 decimal places).
    pub fn classification_report_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("").add_attribute(Attribute::Bold),
            Cell::new("precision").add_attribute(Attribute::Bold),
            Cell::new("recall").add_attribute(Attribute::Bold),
            Cell::new("f1-score").add_attribute(Attribute::Bold),
            Cell::new("support").add_attribute(Attribute::Bold),
        ]);

        let num = |v: f64| Cell::new(format!("{:.2}", v)).set_alignment(CellAlignment::Right);

        for class in &self.per_class {
            table.add_row(vec![
                Cell::new(class.label),
                num(class.precision),
                num(class.recall),
                num(class.f1),
                Cell::new(class.support).set_alignment(CellAlignment::Right),
            ]);
        }

        table.add_row(vec![
            Cell::new("accuracy"),
            Cell::new(""),
            Cell::new(""),
            num(self.accuracy),
            Cell::new(self.total).set_alignment(CellAlignment::Right),
        ]);
        table.add_row(vec![
            Cell::new("macro avg"),
            num(self.macro_avg.precision),
            num(self.macro_avg.recall),
            num(self.macro_avg.f1),
            Cell::new(self.total).set_alignment(CellAlignment::Right),
        ]);
        table.add_row(vec![
            Cell::new("weighted avg"),
            num(self.weighted_avg.precision),
            num(self.weighted_avg.recall),
            num(self.weighted_avg.f1),
            Cell::new(self.total).set_alignment(CellAlignment::Right),
        ]);

        table
    }
}
