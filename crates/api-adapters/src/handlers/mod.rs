use std::sync::Arc;

use services::BoardService;

pub mod ads;
pub mod users;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<BoardService>,
}

impl AppState {
    pub fn new(service: BoardService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
