/// Static unit → contractor assignment table
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Contractor name returned for units missing from every table entry
pub const UNASSIGNED: &str = "Unassigned";

/// Ordered table of contractor → units it is responsible for.
///
/// The table is fixed for the life of a process: it is built once from the
/// configuration and never mutated, so [`Assignments::resolve`] depends on
/// nothing but the table itself. If the table changes between runs, data
/// stored under a unit's previous contractor stays under that key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignments {
    table: IndexMap<String, Vec<String>>,
}

impl Assignments {
    pub fn new(table: IndexMap<String, Vec<String>>) -> Self {
        Self { table }
    }

    /// Owning contractor of `unit`, or [`UNASSIGNED`].
    ///
    /// When a unit is listed under several contractors the first entry in
    /// table order wins.
    pub fn resolve(&self, unit: &str) -> &str {
        self.table
            .iter()
            .find(|(_, units)| units.iter().any(|u| u == unit))
            .map(|(contractor, _)| contractor.as_str())
            .unwrap_or(UNASSIGNED)
    }

    /// Contractor names in table order
    pub fn contractors(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    pub fn units_of(&self, contractor: &str) -> &[String] {
        self.table
            .get(contractor)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for Assignments {
    fn default() -> Self {
        let mut table = IndexMap::new();
        table.insert(
            "IADECCO".to_string(),
            to_units(&["Unit1", "Unit8", "Unit9", "Unit10", "Unit11", "Unit14", "Unit15"]),
        );
        table.insert(
            "YAMATO".to_string(),
            to_units(&[
                "Unit2", "Unit3A", "Unit12A", "Unit12B", "Unit16", "Unit17", "Unit18", "Unit19",
            ]),
        );
        table.insert(
            "INITI INDAH".to_string(),
            to_units(&["Unit3B", "Unit5", "Unit6", "Unit7"]),
        );
        Self { table }
    }
}

fn to_units(units: &[&str]) -> Vec<String> {
    units.iter().map(|u| u.to_string()).collect()
}

/// Three-letter contractor tag shown next to a unit; blank for [`UNASSIGNED`].
pub fn contractor_tag(contractor: &str) -> String {
    if contractor == UNASSIGNED {
        String::new()
    } else {
        contractor.chars().take(3).collect()
    }
}
