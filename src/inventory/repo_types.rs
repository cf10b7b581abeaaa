use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;
use uuid::Uuid;

use crate::error::DomainError;

/// `YYYY-MM-DD` serde adapter for [`Date`].
pub mod iso_date {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};
    use time::{format_description::FormatItem, macros::format_description, Date};

    const FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

    pub fn serialize<S: Serializer>(date: &Date, s: S) -> Result<S::Ok, S::Error> {
        let text = date.format(FORMAT).map_err(serde::ser::Error::custom)?;
        s.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Date, D::Error> {
        let text = String::deserialize(d)?;
        Date::parse(text.trim(), FORMAT).map_err(D::Error::custom)
    }

    pub mod option {
        use serde::{de::Error as _, Deserialize, Deserializer};
        use time::Date;

        use super::FORMAT;

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Date>, D::Error> {
            Option::<String>::deserialize(d)?
                .map(|text| Date::parse(text.trim(), FORMAT).map_err(D::Error::custom))
                .transpose()
        }
    }
}

/// Opaque per-user key for item collections.
pub type UserId = Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Dairy,
    Vegetables,
    Fruits,
    Meat,
    Seafood,
    Grains,
    Bakery,
    Beverages,
    Condiments,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Dairy,
        Category::Vegetables,
        Category::Fruits,
        Category::Meat,
        Category::Seafood,
        Category::Grains,
        Category::Bakery,
        Category::Beverages,
        Category::Condiments,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Dairy => "Dairy",
            Category::Vegetables => "Vegetables",
            Category::Fruits => "Fruits",
            Category::Meat => "Meat",
            Category::Seafood => "Seafood",
            Category::Grains => "Grains",
            Category::Bakery => "Bakery",
            Category::Beverages => "Beverages",
            Category::Condiments => "Condiments",
            Category::Other => "Other",
        }
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::invalid(format!("unknown category '{}'", s)))
    }
}

/// A tracked food item. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    #[serde(with = "iso_date")]
    pub expiry_date: Date,
    #[serde(with = "iso_date")]
    pub added_date: Date,
    pub category: Category,
}

impl FoodItem {
    pub fn new(
        name: &str,
        expiry_date: Date,
        added_date: Option<Date>,
        category: Category,
        today: Date,
    ) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::invalid("item name must not be empty"));
        }
        Ok(Self {
            name: name.to_string(),
            expiry_date,
            added_date: added_date.unwrap_or(today),
            category,
        })
    }

    /// Case-folded form of `name` used for identity, in memory and in the
    /// `food_items.name_key` column alike.
    pub fn name_key(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Identity is (name ignoring case, expiry date).
    pub fn same_identity(&self, name: &str, expiry_date: Date) -> bool {
        self.expiry_date == expiry_date && Self::name_key(&self.name) == Self::name_key(name)
    }

    pub fn is_duplicate_of(&self, other: &FoodItem) -> bool {
        self.same_identity(&other.name, other.expiry_date)
    }
}

/// `food_items` row.
#[derive(Debug, FromRow)]
pub struct FoodItemRow {
    pub name: String,
    pub expiry_date: Date,
    pub added_date: Date,
    pub category: String,
}

impl TryFrom<FoodItemRow> for FoodItem {
    type Error = DomainError;

    fn try_from(r: FoodItemRow) -> Result<Self, Self::Error> {
        Ok(Self {
            name: r.name,
            expiry_date: r.expiry_date,
            added_date: r.added_date,
            category: r.category.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn new_trims_and_defaults_added_date() {
        let today = date!(2024 - 01 - 01);
        let item = FoodItem::new("  Milk ", date!(2024 - 01 - 05), None, Category::Dairy, today)
            .unwrap();
        assert_eq!(item.name, "Milk");
        assert_eq!(item.added_date, today);
    }

    #[test]
    fn blank_name_is_invalid() {
        let err = FoodItem::new(
            "   ",
            date!(2024 - 01 - 05),
            None,
            Category::Other,
            date!(2024 - 01 - 01),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn identity_ignores_case_category_and_added_date() {
        let today = date!(2024 - 01 - 01);
        let a = FoodItem::new("Milk", date!(2024 - 01 - 05), None, Category::Dairy, today)
            .unwrap();
        let b = FoodItem::new(
            "mILK",
            date!(2024 - 01 - 05),
            Some(date!(2023 - 12 - 20)),
            Category::Beverages,
            today,
        )
        .unwrap();
        let c = FoodItem::new("milk", date!(2024 - 01 - 06), None, Category::Dairy, today)
            .unwrap();
        assert!(a.is_duplicate_of(&b));
        assert!(!a.is_duplicate_of(&c));
    }

    #[test]
    fn identity_folds_non_ascii_case() {
        let today = date!(2024 - 01 - 01);
        let a = FoodItem::new("Äpfel", date!(2024 - 01 - 05), None, Category::Fruits, today)
            .unwrap();
        assert_eq!(FoodItem::name_key("  ÄPFEL "), "äpfel");
        assert_eq!(FoodItem::name_key(&a.name), FoodItem::name_key("äPFEL"));
        assert!(a.same_identity("ÄPFEL", date!(2024 - 01 - 05)));
        assert!(!a.same_identity("Apfel", date!(2024 - 01 - 05)));
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("dairy".parse::<Category>().unwrap(), Category::Dairy);
        assert_eq!(" SEAFOOD ".parse::<Category>().unwrap(), Category::Seafood);
        assert!("Snacks".parse::<Category>().is_err());
        assert_eq!(Category::default(), Category::Other);
    }

    #[test]
    fn dates_serialize_as_iso() {
        let item = FoodItem::new(
            "Bread",
            date!(2024 - 02 - 09),
            Some(date!(2024 - 02 - 01)),
            Category::Bakery,
            date!(2024 - 02 - 01),
        )
        .unwrap();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["expiry_date"], "2024-02-09");
        assert_eq!(json["category"], "Bakery");

        let back: FoodItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }
}
