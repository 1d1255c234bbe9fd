/// Superseding report renders
///
/// Every full render takes a token from a [`RenderGate`] when it is called.
/// While resolving photos it re-checks the token; once a newer render has
/// started, the older one abandons its output without touching the board.
use crate::core::report_store::ReportStore;
use crate::report::{ContractorReport, ReportGenerator};
use crate::storage::persistence::Persistence;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RenderToken(u64);

#[derive(Debug, Default)]
pub struct RenderGate {
    generation: AtomicU64,
}

impl RenderGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, superseding every earlier token
    pub fn begin(&self) -> RenderToken {
        RenderToken(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, token: RenderToken) -> bool {
        self.generation.load(Ordering::SeqCst) == token.0
    }
}

/// Last published set of contractor reports
#[derive(Debug, Default)]
pub struct ReportBoard {
    inner: Mutex<BoardState>,
}

#[derive(Debug, Default, Clone)]
struct BoardState {
    generation: u64,
    reports: Vec<ContractorReport>,
}

impl ReportBoard {
    pub fn reports(&self) -> Vec<ContractorReport> {
        self.state().reports
    }

    /// Generation of the render currently on display; 0 before the first one
    pub fn generation(&self) -> u64 {
        self.state().generation
    }

    fn state(&self) -> BoardState {
        match self.inner.lock() {
            Ok(state) => state.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn publish(&self, token: RenderToken, reports: Vec<ContractorReport>) {
        let mut state = match self.inner.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.generation = token.0;
        state.reports = reports;
    }
}

/// Renders every contractor's report onto a shared board
pub struct Renderer {
    persistence: Arc<Persistence>,
    priority: Vec<String>,
    gate: RenderGate,
    board: ReportBoard,
}

impl Renderer {
    pub fn new(persistence: Arc<Persistence>, priority: Vec<String>) -> Self {
        Self {
            persistence,
            priority,
            gate: RenderGate::new(),
            board: ReportBoard::default(),
        }
    }

    pub fn board(&self) -> &ReportBoard {
        &self.board
    }

    /// Render all contractors. The generation token is taken when this is
    /// called, before the returned future is first polled. Resolves to
    /// whether the output was published.
    pub fn render_all<'a>(&'a self, report: &'a ReportStore) -> impl Future<Output = bool> + 'a {
        let token = self.gate.begin();
        async move {
            let generator = ReportGenerator::new(report, &self.persistence);
            let mut reports = Vec::new();

            for contractor in crate::report::text::ordered_contractors(report, &self.priority) {
                match generator
                    .generate_while(&contractor, || self.gate.is_current(token))
                    .await
                {
                    Some(rendered) => reports.push(rendered),
                    None => {
                        warn!("Render {:?} superseded, dropping its output", token);
                        return false;
                    }
                }
            }

            if !self.gate.is_current(token) {
                warn!("Render {:?} superseded, dropping its output", token);
                return false;
            }
            debug!("Publishing render {:?} ({} contractors)", token, reports.len());
            self.board.publish(token, reports);
            true
        }
    }
}
