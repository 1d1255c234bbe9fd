/// Terminal output for sitelog commands
use crate::core::assignment::contractor_tag;
use crate::report::ContractorReport;
use colored::*;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color as TableColor, ContentArrangement, Table};

pub fn section_header(title: &str) {
    println!("\n{}", title.bold().cyan());
}

pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn info(message: &str) {
    println!("{} {}", "●".blue(), message);
}

pub fn warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Nothing-to-show marker
pub fn empty(message: &str) {
    println!("{} {}", "◌".dimmed(), message);
}

/// One `├─`/`└─` line, with an optional `label: value` suffix
pub fn tree_item(is_last: bool, label: &str, value: Option<&str>) {
    let branch = if is_last { "└─" } else { "├─" };
    match value {
        Some(value) => println!("{} {}: {}", branch.dimmed(), label, value),
        None => println!("{} {}", branch.dimmed(), label),
    }
}

/// Rounded table holding one row per site unit
pub fn unit_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            ["Unit", "Contractor", "Tag", "Tasks", "Photos"]
                .into_iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold).fg(TableColor::Cyan)),
        );
    table
}

pub fn add_unit_row(table: &mut Table, unit: &str, contractor: &str, tasks: usize, photos: usize) {
    table.add_row(vec![
        Cell::new(unit),
        Cell::new(contractor).fg(contractor_color(contractor)),
        Cell::new(contractor_tag(contractor)),
        Cell::new(tasks),
        Cell::new(photos),
    ]);
}

/// Site grid colour of a contractor
pub fn contractor_color(contractor: &str) -> TableColor {
    match contractor {
        "IADECCO" => TableColor::Red,
        "YAMATO" => TableColor::Blue,
        "INITI INDAH" => TableColor::Green,
        _ => TableColor::Grey,
    }
}

/// Contractor heading, report text and the photo files it would export
pub fn print_contractor_report(report: &ContractorReport, file_date: &str) {
    section_header(&report.contractor);
    println!("{}", "─".repeat(report.contractor.chars().count()).dimmed());
    println!("{}", report.text);

    if report.photos.is_empty() {
        return;
    }
    println!();
    info(&format!("{} photo(s)", report.photos.len()));
    let last = report.photos.len() - 1;
    for (i, photo) in report.photos.iter().enumerate() {
        tree_item(
            i == last,
            &photo.filename(file_date),
            Some(&format!("{} bytes", photo.bytes.len())),
        );
    }
}
