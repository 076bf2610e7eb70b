//! Collection queries: text search, category and price-bracket filters, and
//! the totals shown above the item list.

use serde::{Deserialize, Serialize};

use crate::item::{MakeupItem, MakeupType};

/// Price brackets over the amount actually paid.
///
/// Every bracket except `All` and `Gifts` excludes gifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PriceBracket {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "gifts")]
    Gifts,
    #[serde(rename = "free")]
    Free,
    #[serde(rename = "0-50")]
    UpTo50,
    #[serde(rename = "50-100")]
    From50To100,
    #[serde(rename = "100-200")]
    From100To200,
    #[serde(rename = "200-500")]
    From200To500,
    #[serde(rename = "500+")]
    Above500,
}

impl PriceBracket {
    pub fn contains(self, item: &MakeupItem) -> bool {
        let paid = item.acquisition_price;
        match self {
            PriceBracket::All => true,
            PriceBracket::Gifts => item.was_gift,
            _ if item.was_gift => false,
            PriceBracket::Free => paid == 0.0,
            PriceBracket::UpTo50 => paid > 0.0 && paid <= 50.0,
            PriceBracket::From50To100 => paid > 50.0 && paid <= 100.0,
            PriceBracket::From100To200 => paid > 100.0 && paid <= 200.0,
            PriceBracket::From200To500 => paid > 200.0 && paid <= 500.0,
            PriceBracket::Above500 => paid > 500.0,
        }
    }
}

/// Combined list filter. The default matches every item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemFilter {
    /// Case-insensitive substring matched against name, brand and shade.
    pub search: String,
    pub kind: Option<MakeupType>,
    pub price: PriceBracket,
}

impl ItemFilter {
    pub fn matches(&self, item: &MakeupItem) -> bool {
        self.matches_search(item)
            && self.kind.map_or(true, |kind| item.kind == kind)
            && self.price.contains(item)
    }

    pub fn apply<'a>(&self, items: &'a [MakeupItem]) -> Vec<&'a MakeupItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }

    fn matches_search(&self, item: &MakeupItem) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        item.name.to_lowercase().contains(&needle)
            || item.brand.to_lowercase().contains(&needle)
            || item
                .shade
                .as_deref()
                .is_some_and(|shade| shade.to_lowercase().contains(&needle))
    }
}

/// Headline numbers for a collection.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CollectionSummary {
    pub item_count: usize,
    /// Sum of market prices.
    pub total_value: f64,
    /// Sum of amounts actually paid, gifts excluded.
    pub total_spent: f64,
    pub gift_count: usize,
}

impl CollectionSummary {
    pub fn of(items: &[MakeupItem]) -> Self {
        items.iter().fold(Self::default(), |mut acc, item| {
            acc.item_count += 1;
            acc.total_value += item.price;
            if item.was_gift {
                acc.gift_count += 1;
            } else {
                acc.total_spent += item.acquisition_price;
            }
            acc
        })
    }
}

/// Categories present in `items`, sorted by label.
pub fn distinct_types(items: &[MakeupItem]) -> Vec<MakeupType> {
    let mut kinds: Vec<MakeupType> = Vec::new();
    for item in items {
        if !kinds.contains(&item.kind) {
            kinds.push(item.kind);
        }
    }
    kinds.sort_by_key(|kind| kind.label());
    kinds
}
