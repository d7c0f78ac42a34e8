use adif_cli::check::{CheckReport, Finding, Severity};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use crate::commands::ConvertSummary;

pub fn print_convert_summary(summary: &ConvertSummary) {
    println!(
        "Converted {} ({}) -> {} ({})",
        summary.input.display(),
        summary.input_format,
        summary.output.display(),
        summary.output_format
    );
    println!("Records: {}", summary.records);
    if summary.issues.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Issue")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (idx, issue) in summary.issues.iter().enumerate() {
        table.add_row(vec![Cell::new(idx + 1), Cell::new(issue).fg(Color::Yellow)]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

pub fn print_check_reports(reports: &[CheckReport]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Format"),
        header_cell("Records"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for report in reports {
        table.add_row(vec![
            Cell::new(report.path.display()),
            Cell::new(report.format),
            Cell::new(report.records),
            count_cell(report.error_count(), Color::Red),
            count_cell(report.warning_count(), Color::Yellow),
        ]);
    }
    println!("{table}");

    let mut findings: Vec<(&CheckReport, &Finding)> = reports
        .iter()
        .flat_map(|report| report.findings.iter().map(move |f| (report, f)))
        .collect();
    if findings.is_empty() {
        return;
    }
    findings.sort_by_key(|(_, f)| severity_rank(f.severity));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Severity"),
        header_cell("Record"),
        header_cell("Field"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Percentage(25)),
        ColumnConstraint::LowerBoundary(Width::Fixed(8)),
        ColumnConstraint::LowerBoundary(Width::Fixed(6)),
    ]);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    for (report, finding) in findings {
        table.add_row(vec![
            Cell::new(report.path.display()),
            severity_cell(finding.severity),
            finding
                .record
                .map_or_else(|| dim_cell("header"), Cell::new),
            Cell::new(finding.field.as_deref().unwrap_or("-")),
            Cell::new(&finding.message),
        ]);
    }
    println!();
    println!("Findings:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR").fg(Color::Red),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn severity_rank(severity: Severity) -> u8 {
    match severity {
        Severity::Error => 0,
        Severity::Warning => 1,
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
