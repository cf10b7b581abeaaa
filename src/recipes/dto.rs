use serde::{Deserialize, Serialize};

use super::services::Suggestion;
use crate::inventory::services::ClassifiedItem;

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    pub ingredients: Vec<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FromInventoryRequest {
    /// Narrow the near-expiry items to these names; all of them when absent or empty.
    #[serde(default)]
    pub selected: Vec<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct FromInventoryResponse {
    pub eligible: Vec<ClassifiedItem>,
    pub suggestions: Vec<Suggestion<'static>>,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub feedback: String,
}
