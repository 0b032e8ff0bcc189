use std::sync::Arc;

use crate::services::draft_flow::DraftFlowService;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub drafts: Arc<DraftFlowService>,
}

impl AppState {
    pub fn new(drafts: DraftFlowService) -> Self {
        Self {
            drafts: Arc::new(drafts),
        }
    }
}
