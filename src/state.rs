use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::Repositories;
use crate::rpc::{self, ProcedureTable};

/// Shared per-process state handed to every procedure.
#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub config: Arc<AppConfig>,
    pub procedures: Arc<ProcedureTable>,
}

impl AppState {
    pub fn new(repos: Repositories, config: AppConfig) -> Self {
        Self {
            repos,
            config: Arc::new(config),
            procedures: Arc::new(rpc::procedures()),
        }
    }

    /// Memory-backed state with the given configuration.
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(Repositories::in_memory(), config)
    }
}
