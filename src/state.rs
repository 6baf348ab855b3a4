use std::sync::Arc;

use crate::services::financials_service::FinancialsService;

#[derive(Clone)]
pub struct AppState {
    pub financials: Arc<FinancialsService>,
}

impl AppState {
    pub fn new(financials: FinancialsService) -> Self {
        Self {
            financials: Arc::new(financials),
        }
    }
}
