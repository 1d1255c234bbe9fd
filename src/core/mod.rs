pub mod assignment;
pub mod clock;
pub mod config;
pub mod paths;
pub mod photo;
pub mod report_store;
pub mod session;
pub mod task_phrase;

pub use assignment::{Assignments, UNASSIGNED};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use photo::PhotoRef;
pub use report_store::{PersistedPayload, ReportStore, UnitRecord};
pub use session::Session;
