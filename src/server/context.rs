use std::sync::Arc;

use crate::driver::{self, BrowserLauncher};
use crate::planner::{Planner, Ranker};
use crate::report::ReportStore;
use crate::runner::{Analyzer, EventEmitter, Executor, Orchestrator};
use crate::utils::Config;

/// Services shared by every request.
///
/// Built once at startup. None of the services hold resources, so there is
/// nothing to tear down.
pub struct AppContext {
    pub config: Config,
    pub planner: Planner,
    pub ranker: Ranker,
    pub orchestrator: Orchestrator,
}

impl AppContext {
    /// Context backed by a real Playwright browser
    pub fn new(config: Config, events: EventEmitter) -> Self {
        let launcher = driver::default_launcher(&config);
        Self::with_launcher(config, launcher, events)
    }

    pub fn with_launcher(
        config: Config,
        launcher: Arc<dyn BrowserLauncher>,
        events: EventEmitter,
    ) -> Self {
        let executor = Executor::new(launcher, config.target_url.clone(), config.screenshots_dir());
        let store = ReportStore::new(config.reports_dir());
        let orchestrator = Orchestrator::new(executor, Analyzer::new(), store).with_events(events);

        Self {
            config,
            planner: Planner::new(),
            ranker: Ranker::new(),
            orchestrator,
        }
    }

    pub fn store(&self) -> &ReportStore {
        self.orchestrator.store()
    }
}
