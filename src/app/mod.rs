pub mod error;
pub mod handlers;
pub mod routes;

use crate::core::service::SynthesisService;

#[derive(Clone)]
pub struct AppState {
    pub service: SynthesisService,
}

impl AppState {
    pub fn new(service: SynthesisService) -> Self {
        Self { service }
    }
}

pub use routes::build_router;
