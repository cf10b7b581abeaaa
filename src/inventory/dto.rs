use serde::{Deserialize, Serialize};
use time::Date;

use super::repo_types::{iso_date, Category};
use super::services::{ClassifiedItem, Skipped, Statistics};

#[derive(Debug, Deserialize)]
pub struct NewItem {
    pub name: String,
    #[serde(with = "iso_date")]
    pub expiry_date: Date,
    #[serde(default, deserialize_with = "iso_date::option::deserialize")]
    pub added_date: Option<Date>,
    #[serde(default)]
    pub category: Category,
}

#[derive(Debug, Deserialize)]
pub struct AddItemsRequest {
    pub items: Vec<NewItem>,
}

#[derive(Debug, Serialize)]
pub struct AddItemsResponse {
    pub added: usize,
    pub skipped: Vec<Skipped>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteItemRequest {
    pub name: String,
    #[serde(with = "iso_date")]
    pub expiry_date: Date,
}

#[derive(Debug, Serialize)]
pub struct ClearedResponse {
    pub removed: u64,
}

#[derive(Debug, Serialize)]
pub struct InventoryResponse {
    pub total: usize,
    pub shown: usize,
    pub items: Vec<ClassifiedItem>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: Statistics,
}
