pub mod catalog;
mod dto;
pub mod fuzzy;
pub mod handlers;
pub mod matcher;
pub mod repo;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::read_routes())
        .merge(handlers::write_routes())
}
