//! Shared application state.

use crate::classifier::Classifier;
use neo_validation::ValidationPipeline;
use std::sync::Arc;

/// State shared by all request handlers.
///
/// The classifier is loaded once at startup; handlers only ever borrow
/// it through the trait object.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn Classifier>,
    pub pipeline: Arc<ValidationPipeline>,
}

impl AppState {
    pub fn new(classifier: Arc<dyn Classifier>, pipeline: ValidationPipeline) -> Self {
        Self {
            classifier,
            pipeline: Arc::new(pipeline),
        }
    }
}
