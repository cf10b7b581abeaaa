//! Tagline of the day.

use axum::{routing::get, Json, Router};
use serde::Serialize;
use time::Date;

use crate::{expiry, state::AppState};

pub const TAGLINES: [&str; 10] = [
    "Freshness First: Track, Save, Enjoy!",
    "Keep Your Kitchen Fresh and Organized!",
    "Never Let Your Food Go to Waste!",
    "Track Expiry Dates with Ease!",
    "Stay Fresh, Stay Healthy!",
    "Your Personal Food Inventory Manager!",
    "Smart Tracking for Smart Kitchens!",
    "Say Goodbye to Food Waste!",
    "Fresh Food, Happy Life!",
    "Organize Your Pantry Like a Pro!",
];

/// Same tagline all day, a different one (usually) the next.
pub fn tagline_for(date: Date) -> &'static str {
    let idx = date.to_julian_day().rem_euclid(TAGLINES.len() as i32) as usize;
    TAGLINES[idx]
}

#[derive(Debug, Serialize)]
struct TaglineResponse {
    tagline: &'static str,
}

async fn get_tagline() -> Json<TaglineResponse> {
    Json(TaglineResponse {
        tagline: tagline_for(expiry::today()),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/tagline", get(get_tagline))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Duration;

    #[test]
    fn stable_within_a_day_and_rotates_across_days() {
        let day = date!(2024 - 03 - 15);
        assert_eq!(tagline_for(day), tagline_for(day));

        let week: std::collections::HashSet<_> = (0..10)
            .map(|i| tagline_for(day + Duration::days(i)))
            .collect();
        assert_eq!(week.len(), TAGLINES.len());
    }
}
