/// Guided task naming
///
/// Builds task descriptions the way the on-site picker does: the foreman
/// picks a task kind, then one or two rounds of multi-select options
/// (structural targets, then floors). The result is a plain string handed
/// to the report store, which never interprets it.
use serde::{Deserialize, Serialize};

const FLOORS: &[&str] = &["GF", "1F", "2F", "3F", "RF"];
const FLOORS_LIFT_GF: &[&str] = &["GF", "1F", "2F", "3F", "RF", "Lift"];
const FLOORS_LIFT: &[&str] = &["1F", "2F", "3F", "RF", "Lift"];
const EXCAVATION: &[&str] = &["Pile cap", "Retaining wall", "Septic tank", "Ground tank"];
const REBAR_STRUCT: &[&str] = &["Pile cap", "Retaining wall", "Beam", "Slab", "Column"];
const REBAR_FAB: &[&str] = &["Pile cap", "Beam", "Slab", "Retaining wall", "Column"];
const CASTING: &[&str] = &["Slab", "Beam", "Pile cap", "Retaining wall", "Column", "Car port slope"];
const FORMWORK: &[&str] = &["Pile cap", "Beam", "Slab", "Retaining wall", "Column"];
const DEMOLISHING: &[&str] = &["Beam", "Slab", "Retaining wall", "Column"];
const LEAN_CONCRETE: &[&str] = &["Retaining wall", "Beam", "Pile cap", "Slab"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    Floor,
    FloorLiftGf,
    FloorLift,
    ExcavationTargets,
    RebarStructTargets,
    RebarFabTargets,
    CastingTargets,
    FormworkTargets,
    DemolishingTargets,
    LeanConcreteTargets,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 10] = [
        TaskCategory::Floor,
        TaskCategory::FloorLiftGf,
        TaskCategory::FloorLift,
        TaskCategory::ExcavationTargets,
        TaskCategory::RebarStructTargets,
        TaskCategory::RebarFabTargets,
        TaskCategory::CastingTargets,
        TaskCategory::FormworkTargets,
        TaskCategory::DemolishingTargets,
        TaskCategory::LeanConcreteTargets,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskCategory::Floor => "floor",
            TaskCategory::FloorLiftGf => "floor_lift_gf",
            TaskCategory::FloorLift => "floor_lift",
            TaskCategory::ExcavationTargets => "excavation_targets",
            TaskCategory::RebarStructTargets => "rebar_struct_targets",
            TaskCategory::RebarFabTargets => "rebar_fab_targets",
            TaskCategory::CastingTargets => "casting_targets",
            TaskCategory::FormworkTargets => "formwork_targets",
            TaskCategory::DemolishingTargets => "demolishing_targets",
            TaskCategory::LeanConcreteTargets => "lean_concrete_targets",
        }
    }

    /// Choices offered in the first selection round
    pub fn options(self) -> &'static [&'static str] {
        match self {
            TaskCategory::Floor => FLOORS,
            TaskCategory::FloorLiftGf => FLOORS_LIFT_GF,
            TaskCategory::FloorLift => FLOORS_LIFT,
            TaskCategory::ExcavationTargets => EXCAVATION,
            TaskCategory::RebarStructTargets => REBAR_STRUCT,
            TaskCategory::RebarFabTargets => REBAR_FAB,
            TaskCategory::CastingTargets => CASTING,
            TaskCategory::FormworkTargets => FORMWORK,
            TaskCategory::DemolishingTargets => DEMOLISHING,
            TaskCategory::LeanConcreteTargets => LEAN_CONCRETE,
        }
    }

    fn is_floor_pick(self) -> bool {
        matches!(
            self,
            TaskCategory::Floor | TaskCategory::FloorLiftGf | TaskCategory::FloorLift
        )
    }

    /// Prefix of the second round for two-step categories
    fn two_step_prefix(self) -> Option<&'static str> {
        match self {
            TaskCategory::RebarStructTargets => Some("Rebar Installation"),
            TaskCategory::CastingTargets => Some("Casting concrete"),
            TaskCategory::FormworkTargets => Some("Form work installation"),
            TaskCategory::DemolishingTargets => Some("Demolishing formwork"),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        TaskCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| format!("Unknown task category: {}", s))
    }
}

/// Outcome of confirming one selection round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Finished task text
    Done(String),
    /// A floor round follows; the pending name already carries the targets
    PickFloors,
    /// Nothing selected, no task produced
    Cancelled,
}

/// One guided naming session
#[derive(Debug, Clone)]
pub struct GuidedTask {
    name: String,
    category: TaskCategory,
    awaiting_floors: bool,
}

impl GuidedTask {
    pub fn begin(name: impl Into<String>, category: TaskCategory) -> Self {
        Self {
            name: name.into(),
            category,
            awaiting_floors: false,
        }
    }

    /// Title shown above the current round
    pub fn title(&self) -> String {
        if self.awaiting_floors {
            format!("{} on...", self.name)
        } else {
            format!("{} for...", self.name)
        }
    }

    pub fn options(&self) -> &'static [&'static str] {
        if self.awaiting_floors {
            FLOORS
        } else {
            self.category.options()
        }
    }

    /// Confirm the current round with the picked values, in pick order.
    pub fn confirm<S: AsRef<str>>(&mut self, selection: &[S]) -> Step {
        let picked = dedup_in_order(selection);
        if picked.is_empty() {
            return Step::Cancelled;
        }
        let joined = picked.join(", ");

        if self.awaiting_floors {
            return Step::Done(format!("{} on {}", self.name, joined));
        }

        if let Some(prefix) = self.category.two_step_prefix() {
            self.name = format!("{} for {}", prefix, joined);
            self.awaiting_floors = true;
            return Step::PickFloors;
        }

        let text = match self.category {
            TaskCategory::LeanConcreteTargets => format!("Lean concrete for {}", joined),
            TaskCategory::RebarFabTargets => format!("Rebar fabrication for {}", joined),
            TaskCategory::ExcavationTargets => format!("{} for {}", self.name, joined),
            c if c.is_floor_pick() => format!("{} on {}", self.name, joined),
            _ => format!("{} for {}", self.name, joined),
        };
        Step::Done(text)
    }
}

/// Run a whole session in one call: `targets` feeds the first round of
/// target categories, `floors` feeds floor rounds.
pub fn compose<S: AsRef<str>>(
    name: &str,
    category: TaskCategory,
    targets: &[S],
    floors: &[S],
) -> Option<String> {
    let mut task = GuidedTask::begin(name, category);
    let first = if category.is_floor_pick() { floors } else { targets };
    match task.confirm(first) {
        Step::Done(text) => Some(text),
        Step::PickFloors => match task.confirm(floors) {
            Step::Done(text) => Some(text),
            _ => None,
        },
        Step::Cancelled => None,
    }
}

fn dedup_in_order<S: AsRef<str>>(selection: &[S]) -> Vec<&str> {
    let mut picked: Vec<&str> = Vec::with_capacity(selection.len());
    for value in selection {
        let value = value.as_ref().trim();
        if !value.is_empty() && !picked.contains(&value) {
            picked.push(value);
        }
    }
    picked
}
