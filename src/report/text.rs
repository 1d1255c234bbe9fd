use crate::core::report_store::{ReportStore, UnitRecord};
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::fmt::Write;

/// Integer formed by every digit in `name`, 0 when there are none.
///
/// "Unit12A" → 12, "B1-F2" → 12. Digit runs too long for a u64 saturate.
pub fn unit_number(name: &str) -> u64 {
    let digits: String = name.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

/// Numeric part first, then the full name ignoring case, then the exact
/// name so the order stays total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    unit_number(a)
        .cmp(&unit_number(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

pub fn sorted_units(units: &IndexMap<String, UnitRecord>) -> Vec<&str> {
    let mut names: Vec<&str> = units.keys().map(String::as_str).collect();
    names.sort_by(|a, b| natural_cmp(a, b));
    names
}

/// Priority contractors first (in the given order, when present), then
/// every other contractor in lexical order.
pub fn ordered_contractors(report: &ReportStore, priority: &[String]) -> Vec<String> {
    let mut ordered: Vec<String> = Vec::new();
    for contractor in priority {
        if report.units(contractor).is_some() && !ordered.contains(contractor) {
            ordered.push(contractor.clone());
        }
    }

    let mut rest: Vec<String> = report
        .contractors()
        .filter(|c| !priority.iter().any(|p| p == c))
        .map(str::to_string)
        .collect();
    rest.sort();

    ordered.extend(rest);
    ordered
}

/// Plain-text report for one contractor.
///
/// ```text
/// YAMATO
/// Unit2:
/// -Pour slab
///
/// Unit3A:
/// -Rebar Installation for Column on 2F
/// ```
/// Units without tasks are left out of the text; surrounding whitespace is
/// trimmed, so a contractor with no tasks yields just its name.
pub fn generate_text(contractor: &str, units: Option<&IndexMap<String, UnitRecord>>) -> String {
    let mut output = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(&mut output, "{}", contractor);

    if let Some(units) = units {
        for unit in sorted_units(units) {
            let record = &units[unit];
            if record.tasks.is_empty() {
                continue;
            }
            let _ = writeln!(&mut output, "{}:", unit);
            for task in &record.tasks {
                let _ = writeln!(&mut output, "-{}", task.text);
            }
            let _ = writeln!(&mut output);
        }
    }

    output.trim().to_string()
}
