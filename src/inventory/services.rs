use serde::{Deserialize, Serialize};
use time::Date;
use tracing::{debug, info, warn};

use super::repo::ItemStore;
use super::repo_types::{iso_date, Category, FoodItem, UserId};
use crate::expiry::{self, ExpiryState, Presentation};

/// Dashboard "expiring soon" window: `0..=5` days out.
pub const EXPIRING_SOON_DAYS: i64 = 5;

/// Candidate item as submitted by a user, before validation.
#[derive(Debug, Clone)]
pub struct ItemDraft {
    pub name: String,
    pub expiry_date: Date,
    pub added_date: Option<Date>,
    pub category: Category,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Skipped {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Default, Serialize)]
pub struct AddOutcome {
    pub added: usize,
    pub skipped: Vec<Skipped>,
}

/// Adds each draft in order. Blank names and duplicates are skipped and
/// reported, never fatal.
pub async fn add_items(
    store: &dyn ItemStore,
    user: UserId,
    drafts: Vec<ItemDraft>,
    today: Date,
) -> anyhow::Result<AddOutcome> {
    let mut outcome = AddOutcome::default();
    for draft in drafts {
        let item = match FoodItem::new(
            &draft.name,
            draft.expiry_date,
            draft.added_date,
            draft.category,
            today,
        ) {
            Ok(item) => item,
            Err(e) => {
                debug!(%user, error = %e, "item draft rejected");
                outcome.skipped.push(Skipped {
                    name: draft.name,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let name = item.name.clone();
        if store.add(user, item).await? {
            info!(%user, name = %name, expiry = %draft.expiry_date, "item added");
            outcome.added += 1;
        } else {
            warn!(%user, name = %name, expiry = %draft.expiry_date, "duplicate item skipped");
            outcome.skipped.push(Skipped {
                name,
                reason: "an item with the same name and expiry date already exists".into(),
            });
        }
    }
    Ok(outcome)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Name,
    ExpiryDate,
    Category,
    DaysUntilExpiry,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub category: Option<Category>,
    #[serde(default)]
    pub sort: SortKey,
}

/// An item together with its classification for the evaluation day.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedItem {
    #[serde(flatten)]
    pub item: FoodItem,
    pub days_left: i64,
    pub status: ExpiryState,
    pub status_label: &'static str,
    #[serde(flatten)]
    pub presentation: Presentation,
}

impl ClassifiedItem {
    pub fn new(item: FoodItem, today: Date) -> Self {
        let days_left = expiry::days_until(item.expiry_date, today);
        let status = expiry::classify(days_left);
        Self {
            item,
            days_left,
            status,
            status_label: status.label(),
            presentation: expiry::present(status),
        }
    }
}

pub fn list_items(items: Vec<FoodItem>, query: &ListQuery, today: Date) -> Vec<ClassifiedItem> {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut rows: Vec<ClassifiedItem> = items
        .into_iter()
        .filter(|i| {
            needle
                .as_deref()
                .map_or(true, |n| i.name.to_lowercase().contains(n))
        })
        .filter(|i| query.category.map_or(true, |c| i.category == c))
        .map(|i| ClassifiedItem::new(i, today))
        .collect();

    match query.sort {
        SortKey::Name => rows.sort_by_key(|r| r.item.name.to_lowercase()),
        SortKey::ExpiryDate => rows.sort_by_key(|r| r.item.expiry_date),
        SortKey::Category => rows.sort_by_key(|r| r.item.category.as_str()),
        SortKey::DaysUntilExpiry => rows.sort_by_key(|r| r.days_left),
    }
    rows
}

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct Statistics {
    pub total_items: usize,
    pub expired_count: usize,
    pub expiring_soon: usize,
    pub fresh_items: usize,
}

pub fn statistics(items: &[FoodItem], today: Date) -> Statistics {
    let mut stats = Statistics {
        total_items: items.len(),
        ..Default::default()
    };
    for item in items {
        let d = expiry::days_until(item.expiry_date, today);
        if d < 0 {
            stats.expired_count += 1;
        } else if d <= EXPIRING_SOON_DAYS {
            stats.expiring_soon += 1;
        }
    }
    stats.fresh_items = stats.total_items - stats.expired_count - stats.expiring_soon;
    stats
}

#[derive(Debug, Serialize)]
pub struct Alert {
    pub name: String,
    #[serde(with = "iso_date")]
    pub expiry_date: Date,
    pub days_left: i64,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AlertGroup {
    pub status: ExpiryState,
    pub label: &'static str,
    #[serde(flatten)]
    pub presentation: Presentation,
    pub alerts: Vec<Alert>,
}

/// Items grouped by urgency, most urgent group first; empty groups omitted.
pub fn alerts(items: &[FoodItem], today: Date) -> Vec<AlertGroup> {
    ExpiryState::PRIORITY
        .into_iter()
        .filter_map(|state| {
            let alerts: Vec<Alert> = items
                .iter()
                .filter_map(|item| {
                    let d = expiry::days_until(item.expiry_date, today);
                    (expiry::classify(d) == state).then(|| Alert {
                        name: item.name.clone(),
                        expiry_date: item.expiry_date,
                        days_left: d,
                        message: expiry::alert_message(&item.name, d),
                    })
                })
                .collect();
            (!alerts.is_empty()).then(|| AlertGroup {
                status: state,
                label: state.label(),
                presentation: expiry::present(state),
                alerts,
            })
        })
        .collect()
}

/// Items within the near-expiry window, soonest first.
pub fn near_expiry(items: Vec<FoodItem>, today: Date) -> Vec<ClassifiedItem> {
    let mut rows: Vec<ClassifiedItem> = items
        .into_iter()
        .map(|i| ClassifiedItem::new(i, today))
        .filter(|r| expiry::is_near_expiry(r.days_left))
        .collect();
    rows.sort_by_key(|r| r.days_left);
    rows
}
