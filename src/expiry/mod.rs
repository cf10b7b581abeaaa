//! Expiry classification: turns a calendar expiry date into an urgency state.
//!
//! Everything here is a pure function of its arguments. "Today" is always
//! passed in explicitly; only [`today`] reads the wall clock.

use serde::Serialize;
use time::{Date, OffsetDateTime};

/// Inclusive upper bound (in days) of the window whose items feed recipe suggestions.
pub const NEAR_EXPIRY_DAYS: i64 = 7;

/// Current calendar day in the server's local time zone, or UTC when the
/// local offset cannot be determined.
pub fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

/// Whole days from `today` until `expiry_date`; negative once expired.
pub fn days_until(expiry_date: Date, today: Date) -> i64 {
    (expiry_date - today).whole_days()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryState {
    Expired,
    ExpiresToday,
    Critical,
    Warning,
    Fresh,
}

impl ExpiryState {
    /// Alert priority order, most urgent first.
    pub const PRIORITY: [ExpiryState; 5] = [
        ExpiryState::Expired,
        ExpiryState::ExpiresToday,
        ExpiryState::Critical,
        ExpiryState::Warning,
        ExpiryState::Fresh,
    ];

    /// Human label, e.g. `"Expires Today"`.
    pub fn label(&self) -> &'static str {
        match self {
            ExpiryState::Expired => "Expired",
            ExpiryState::ExpiresToday => "Expires Today",
            ExpiryState::Critical => "Critical",
            ExpiryState::Warning => "Warning",
            ExpiryState::Fresh => "Fresh",
        }
    }
}

/// Boundary table, first match wins:
/// `< 0` expired, `0` expires today, `1..=3` critical, `4..=7` warning, `> 7` fresh.
pub fn classify(days_until: i64) -> ExpiryState {
    match days_until {
        d if d < 0 => ExpiryState::Expired,
        0 => ExpiryState::ExpiresToday,
        1..=3 => ExpiryState::Critical,
        4..=7 => ExpiryState::Warning,
        _ => ExpiryState::Fresh,
    }
}

/// Recipe-suggestion eligibility; separate from [`classify`].
pub fn is_near_expiry(days_until: i64) -> bool {
    (0..=NEAR_EXPIRY_DAYS).contains(&days_until)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Presentation {
    pub icon: &'static str,
    pub color: &'static str,
}

pub fn present(state: ExpiryState) -> Presentation {
    let (icon, color) = match state {
        ExpiryState::Expired => ("🚨", "#FFB3BA"),
        ExpiryState::ExpiresToday => ("⚠️", "#FFDFBA"),
        ExpiryState::Critical => ("⏰", "#FFFFBA"),
        ExpiryState::Warning => ("📌", "#BAFFC9"),
        ExpiryState::Fresh => ("✅", "#BAE1FF"),
    };
    Presentation { icon, color }
}

/// One-line alert text for an item `days_until` days from expiry.
pub fn alert_message(name: &str, days_until: i64) -> String {
    match days_until {
        d if d < 0 => format!("{} expired {} day(s) ago", name, -d),
        0 => format!("{} expires TODAY", name),
        1 => format!("{} expires TOMORROW", name),
        d => format!("{} expires in {} day(s)", name, d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn days_until_counts_whole_days() {
        let today = date!(2024 - 01 - 01);
        assert_eq!(days_until(date!(2024 - 01 - 04), today), 3);
        assert_eq!(days_until(date!(2024 - 01 - 01), today), 0);
        assert_eq!(days_until(date!(2023 - 12 - 30), today), -2);
        assert_eq!(days_until(date!(2024 - 03 - 01), today), 60);
    }

    #[test]
    fn classify_boundaries() {
        let cases = [
            (-1, ExpiryState::Expired),
            (0, ExpiryState::ExpiresToday),
            (1, ExpiryState::Critical),
            (3, ExpiryState::Critical),
            (4, ExpiryState::Warning),
            (7, ExpiryState::Warning),
            (8, ExpiryState::Fresh),
        ];
        for (d, expected) in cases {
            assert_eq!(classify(d), expected, "days_until = {}", d);
        }
        assert_eq!(classify(i64::MIN), ExpiryState::Expired);
        assert_eq!(classify(i64::MAX), ExpiryState::Fresh);
    }

    #[test]
    fn near_expiry_window_is_zero_through_seven() {
        assert!(!is_near_expiry(-1));
        assert!(is_near_expiry(0));
        assert!(is_near_expiry(7));
        assert!(!is_near_expiry(8));
    }

    #[test]
    fn three_days_out_is_critical_with_alarm_icon() {
        let today = date!(2024 - 05 - 10);
        let expiry = today + time::Duration::days(3);
        let d = days_until(expiry, today);
        assert_eq!(d, 3);
        let state = classify(d);
        assert_eq!(state, ExpiryState::Critical);
        assert_eq!(present(state).icon, "⏰");
    }

    #[test]
    fn every_state_has_distinct_presentation() {
        let colors: std::collections::HashSet<_> = ExpiryState::PRIORITY
            .iter()
            .map(|s| present(*s).color)
            .collect();
        assert_eq!(colors.len(), 5);
        assert_eq!(present(ExpiryState::Expired).color, "#FFB3BA");
        assert_eq!(present(ExpiryState::Fresh).color, "#BAE1FF");
    }

    #[test]
    fn alert_messages() {
        assert_eq!(alert_message("Milk", -2), "Milk expired 2 day(s) ago");
        assert_eq!(alert_message("Milk", 0), "Milk expires TODAY");
        assert_eq!(alert_message("Milk", 1), "Milk expires TOMORROW");
        assert_eq!(alert_message("Milk", 5), "Milk expires in 5 day(s)");
    }

    #[test]
    fn today_is_within_a_day_of_utc() {
        let utc = OffsetDateTime::now_utc().date();
        assert!(days_until(today(), utc).abs() <= 1);
    }

    #[test]
    fn state_serializes_snake_case() {
        let json = serde_json::to_string(&ExpiryState::ExpiresToday).unwrap();
        assert_eq!(json, "\"expires_today\"");
    }
}
