//! End-of-run summary: a table on stdout and an optional JSON file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::pipeline::RunSummary;

pub fn print_summary(summary: &RunSummary) {
    println!("{}", summary_table(summary));
}

/// Builds the summary table: data sizes, held-out scores, and prediction counts.
pub fn summary_table(summary: &RunSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let confusion = &summary.evaluation.confusion;
    let rows: Vec<(&str, Cell)> = vec![
        ("Historical rows", Cell::new(summary.historical_rows)),
        ("Training rows", Cell::new(summary.train_rows)),
        ("Held-out rows", Cell::new(summary.test_rows)),
        (
            "Accuracy",
            Cell::new(format!("{:.2}", summary.evaluation.accuracy))
                .add_attribute(Attribute::Bold),
        ),
        ("Correctly approved", Cell::new(confusion.true_approved)),
        (
            "Wrongly approved",
            count_cell(confusion.false_approved, Color::Red),
        ),
        ("Correctly flagged", Cell::new(confusion.true_flagged)),
        (
            "Wrongly flagged",
            count_cell(confusion.false_flagged, Color::Yellow),
        ),
        ("New requests", Cell::new(summary.predictions.requests)),
        (
            "Auto-approved",
            Cell::new(summary.predictions.approved).fg(Color::Green),
        ),
        (
            "Flagged",
            count_cell(summary.predictions.flagged, Color::Yellow),
        ),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), value]);
    }
    table
}

/// Writes `summary` as pretty-printed JSON.
pub fn write_summary_json(summary: &RunSummary, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).context("serialize run summary")?;
    fs::write(path, json + "\n")
        .with_context(|| format!("write run summary: {}", path.display()))?;
    Ok(())
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}
