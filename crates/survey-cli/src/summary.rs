use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use survey_ingest::format_numeric;
use survey_model::IssueSeverity;

use crate::types::ScoreResult;

pub fn print_summary(result: &ScoreResult) {
    println!("Dataset: {} ({} respondents)", result.dataset, result.records);
    if let Some(path) = &result.output {
        println!("Output: {}", path.display());
    }
    if !result.audit.imputations.is_empty() {
        for imputation in &result.audit.imputations {
            println!(
                "Imputed {}: {} cell(s) filled with mean {}",
                imputation.column,
                imputation.filled,
                format_numeric(imputation.mean)
            );
        }
    }
    if !result.summaries.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Construct"),
            header_cell("Items"),
            header_cell("N"),
            header_cell("Missing"),
            header_cell("Mean"),
            header_cell("SD"),
            header_cell("Min"),
            header_cell("Max"),
        ]);
        apply_summary_table_style(&mut table);
        for idx in 1..8 {
            align_column(&mut table, idx, CellAlignment::Right);
        }
        for summary in &result.summaries {
            table.add_row(vec![
                Cell::new(&summary.construct).add_attribute(Attribute::Bold),
                Cell::new(summary.items),
                Cell::new(summary.n),
                missing_cell(summary.missing),
                stat_cell(summary.mean),
                stat_cell(summary.sd),
                stat_cell(summary.min),
                stat_cell(summary.max),
            ]);
        }
        println!("{table}");
    }
    print_issue_table(result);
}

fn print_issue_table(result: &ScoreResult) {
    if result.validation.issues.is_empty() {
        return;
    }
    let mut issues: Vec<_> = result.validation.issues.iter().collect();
    issues.sort_by_key(|issue| severity_rank(issue.severity));
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Category"),
        header_cell("Column"),
        header_cell("Count"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for issue in issues {
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(&issue.category),
            Cell::new(issue.column.clone().unwrap_or_else(|| "-".to_string())),
            count_cell(issue.count),
            Cell::new(&issue.message),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn stat_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) => Cell::new(format_numeric(value)),
        None => dim_cell("-"),
    }
}

fn missing_cell(missing: usize) -> Cell {
    if missing > 0 {
        Cell::new(missing).fg(Color::Yellow)
    } else {
        dim_cell(missing)
    }
}

fn count_cell(count: Option<u64>) -> Cell {
    match count {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn dim_cell(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        IssueSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
        IssueSeverity::Info => Cell::new("INFO").fg(Color::Cyan),
    }
}

fn severity_rank(severity: IssueSeverity) -> u8 {
    match severity {
        IssueSeverity::Error => 0,
        IssueSeverity::Warning => 1,
        IssueSeverity::Info => 2,
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
