//! The `MakeupItem` entity, its category labels, and the write/read pricing rules.
//!
//! Two normalizations live here, and they differ:
//!
//! - **Write time** ([`MakeupItemInput::finalize`]): a gift always stores an
//!   acquisition price of 0; otherwise an absent or zero acquisition price
//!   falls back to the market price.
//! - **Read time** ([`MakeupItem::from_legacy`]): records written before the
//!   acquisition fields existed get `acquisitionPrice = price ?? 0` and
//!   `wasGift = false`. Nothing is persisted until the next write.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::ItemId;

// ---------------------------------------------------------------------------
// Category labels
// ---------------------------------------------------------------------------

/// Fixed set of product categories.
///
/// The wire representation is the (Portuguese) label shown in the UI. Labels
/// outside the set read as [`MakeupType::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MakeupType {
    Foundation,
    Concealer,
    Powder,
    Blush,
    Bronzer,
    Highlighter,
    Lipstick,
    Gloss,
    LipLiner,
    Mascara,
    Eyeliner,
    EyePencil,
    Eyeshadow,
    Primer,
    SettingSpray,
    #[default]
    Other,
}

impl MakeupType {
    /// Every category, in form order.
    pub const ALL: [MakeupType; 16] = [
        MakeupType::Foundation,
        MakeupType::Concealer,
        MakeupType::Powder,
        MakeupType::Blush,
        MakeupType::Bronzer,
        MakeupType::Highlighter,
        MakeupType::Lipstick,
        MakeupType::Gloss,
        MakeupType::LipLiner,
        MakeupType::Mascara,
        MakeupType::Eyeliner,
        MakeupType::EyePencil,
        MakeupType::Eyeshadow,
        MakeupType::Primer,
        MakeupType::SettingSpray,
        MakeupType::Other,
    ];

    /// Wire label for this category.
    pub fn label(self) -> &'static str {
        match self {
            MakeupType::Foundation => "Base",
            MakeupType::Concealer => "Corretivo",
            MakeupType::Powder => "Pó",
            MakeupType::Blush => "Blush",
            MakeupType::Bronzer => "Bronzer",
            MakeupType::Highlighter => "Highlighter",
            MakeupType::Lipstick => "Batom",
            MakeupType::Gloss => "Gloss",
            MakeupType::LipLiner => "Lápis de Boca",
            MakeupType::Mascara => "Rímel",
            MakeupType::Eyeliner => "Delineador",
            MakeupType::EyePencil => "Lápis de Olho",
            MakeupType::Eyeshadow => "Sombra",
            MakeupType::Primer => "Primer",
            MakeupType::SettingSpray => "Fixador",
            MakeupType::Other => "Outros",
        }
    }

    /// Look up a category by its exact wire label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

impl From<String> for MakeupType {
    fn from(label: String) -> Self {
        Self::from_label(label.trim()).unwrap_or_default()
    }
}

impl From<MakeupType> for String {
    fn from(kind: MakeupType) -> Self {
        kind.label().to_string()
    }
}

impl std::fmt::Display for MakeupType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A stored makeup item. Wire format is camelCase JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakeupItem {
    pub id: ItemId,
    pub name: String,
    pub brand: String,
    #[serde(rename = "type")]
    pub kind: MakeupType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shade: Option<String>,
    #[serde(default, with = "lenient_date")]
    pub purchase_date: Option<NaiveDate>,
    /// Market/reference value.
    pub price: f64,
    /// Amount actually paid. Always 0 for gifts.
    pub acquisition_price: f64,
    pub was_gift: bool,
    #[serde(default)]
    pub notes: String,
}

impl MakeupItem {
    /// Build an item from a stored record, filling fields that older records
    /// never had.
    ///
    /// Fails only when the record carries no id.
    pub fn from_legacy(record: MakeupItemInput) -> Result<Self, CoreError> {
        let id = record
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| CoreError::Validation("stored record has no id".into()))?;

        Ok(Self {
            id,
            name: record.name,
            brand: record.brand,
            kind: record.kind.unwrap_or_default(),
            shade: record.shade,
            purchase_date: record.purchase_date,
            price: record.price.unwrap_or(0.0),
            acquisition_price: record.acquisition_price.or(record.price).unwrap_or(0.0),
            was_gift: record.was_gift.unwrap_or(false),
            notes: record.notes.unwrap_or_default(),
        })
    }

    /// Parse a raw stored JSON value and apply [`MakeupItem::from_legacy`].
    ///
    /// A `purchaseDate` that is not an ISO date is logged and read as absent
    /// instead of failing the whole record.
    pub fn from_value(mut value: serde_json::Value) -> Result<Self, CoreError> {
        drop_unreadable_purchase_date(&mut value);
        let record: MakeupItemInput = serde_json::from_value(value)
            .map_err(|e| CoreError::Validation(format!("malformed item record: {e}")))?;
        Self::from_legacy(record)
    }
}

fn drop_unreadable_purchase_date(record: &mut serde_json::Value) {
    let Some(fields) = record.as_object_mut() else {
        return;
    };
    let readable = match fields.get("purchaseDate") {
        None | Some(serde_json::Value::Null) => true,
        Some(serde_json::Value::String(raw)) => lenient_date::parse(raw).is_ok(),
        Some(_) => false,
    };
    if !readable {
        let raw = fields.remove("purchaseDate");
        tracing::warn!(
            item_id = ?fields.get("id"),
            purchase_date = ?raw,
            "Ignoring unreadable purchase date on stored item"
        );
    }
}

// ---------------------------------------------------------------------------
// Input DTO
// ---------------------------------------------------------------------------

/// Lenient item payload: request bodies, bulk elements, and legacy records.
///
/// Every field may be absent. [`finalize`](Self::finalize) turns it into a
/// [`MakeupItem`] for writing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MakeupItemInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    pub name: String,
    pub brand: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<MakeupType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shade: Option<String>,
    #[serde(with = "lenient_date", skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquisition_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub was_gift: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl MakeupItemInput {
    /// Check the fields the entry form requires.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("name is required".into()));
        }
        if self.brand.trim().is_empty() {
            return Err(CoreError::Validation("brand is required".into()));
        }
        if self.kind.is_none() {
            return Err(CoreError::Validation("type is required".into()));
        }
        validate_amount("price", self.price)?;
        validate_amount("acquisitionPrice", self.acquisition_price)?;
        Ok(())
    }

    /// Validate and build the record to store under `id`, applying the
    /// write-time pricing rule.
    pub fn finalize(self, id: ItemId) -> Result<MakeupItem, CoreError> {
        self.validate()?;

        let price = self.price.unwrap_or(0.0);
        let was_gift = self.was_gift.unwrap_or(false);

        Ok(MakeupItem {
            id,
            name: self.name,
            brand: self.brand,
            kind: self.kind.unwrap_or_default(),
            shade: self.shade.filter(|s| !s.trim().is_empty()),
            purchase_date: self.purchase_date,
            price,
            acquisition_price: resolve_acquisition_price(price, self.acquisition_price, was_gift),
            was_gift,
            notes: self.notes.unwrap_or_default(),
        })
    }
}

impl From<MakeupItem> for MakeupItemInput {
    fn from(item: MakeupItem) -> Self {
        Self {
            id: Some(item.id),
            name: item.name,
            brand: item.brand,
            kind: Some(item.kind),
            shade: item.shade,
            purchase_date: item.purchase_date,
            price: Some(item.price),
            acquisition_price: Some(item.acquisition_price),
            was_gift: Some(item.was_gift),
            notes: Some(item.notes),
        }
    }
}

/// Amount actually paid for an item.
///
/// Gifts cost nothing. An unset (or zero) paid amount means "paid the
/// listed price".
pub fn resolve_acquisition_price(price: f64, paid: Option<f64>, was_gift: bool) -> f64 {
    if was_gift {
        return 0.0;
    }
    match paid {
        Some(p) if p > 0.0 => p,
        _ => price,
    }
}

fn validate_amount(field: &str, value: Option<f64>) -> Result<(), CoreError> {
    match value {
        Some(v) if !v.is_finite() => Err(CoreError::Validation(format!(
            "{field} must be a finite number"
        ))),
        Some(v) if v < 0.0 => Err(CoreError::Validation(format!(
            "{field} must not be negative"
        ))),
        _ => Ok(()),
    }
}

/// `YYYY-MM-DD` dates where an empty string means "no date".
///
/// Longer ISO timestamps are accepted and truncated to the date part. Any
/// other text is an error; stored records are cleaned up before this runs.
mod lenient_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.serialize_str(&d.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse(&raw).map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }

    pub fn parse(raw: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let date_part = trimmed.get(..10).unwrap_or(trimmed);
        NaiveDate::parse_from_str(date_part, FORMAT).map(Some)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ruby_woo() -> MakeupItemInput {
        MakeupItemInput {
            name: "Ruby Woo".into(),
            brand: "MAC".into(),
            kind: Some(MakeupType::Lipstick),
            price: Some(120.0),
            acquisition_price: Some(0.0),
            was_gift: Some(false),
            ..Default::default()
        }
    }

    #[test]
    fn unset_paid_amount_defaults_to_price() {
        let item = ruby_woo().finalize("1".into()).unwrap();
        assert_eq!(item.acquisition_price, 120.0);
        assert!(!item.was_gift);
    }

    #[test]
    fn explicit_paid_amount_is_kept() {
        let input = MakeupItemInput {
            acquisition_price: Some(89.9),
            ..ruby_woo()
        };
        let item = input.finalize("1".into()).unwrap();
        assert_eq!(item.acquisition_price, 89.9);
    }

    #[test]
    fn gift_always_costs_zero() {
        let input = MakeupItemInput {
            was_gift: Some(true),
            acquisition_price: Some(75.0),
            ..ruby_woo()
        };
        let item = input.finalize("1".into()).unwrap();
        assert_eq!(item.acquisition_price, 0.0);
        assert_eq!(item.price, 120.0);
    }

    #[test]
    fn blank_shade_is_dropped() {
        let input = MakeupItemInput {
            shade: Some("   ".into()),
            ..ruby_woo()
        };
        assert_eq!(input.finalize("1".into()).unwrap().shade, None);
    }

    #[test]
    fn validation_requires_name_brand_and_type() {
        let no_name = MakeupItemInput {
            name: " ".into(),
            ..ruby_woo()
        };
        assert!(matches!(no_name.validate(), Err(CoreError::Validation(m)) if m.contains("name")));

        let no_brand = MakeupItemInput {
            brand: String::new(),
            ..ruby_woo()
        };
        assert!(matches!(no_brand.validate(), Err(CoreError::Validation(m)) if m.contains("brand")));

        let no_type = MakeupItemInput {
            kind: None,
            ..ruby_woo()
        };
        assert!(matches!(no_type.validate(), Err(CoreError::Validation(m)) if m.contains("type")));
    }

    #[test]
    fn validation_rejects_negative_and_non_finite_amounts() {
        let negative = MakeupItemInput {
            price: Some(-1.0),
            ..ruby_woo()
        };
        assert!(negative.finalize("1".into()).is_err());

        let nan = MakeupItemInput {
            acquisition_price: Some(f64::NAN),
            ..ruby_woo()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn legacy_record_without_paid_amount_uses_price() {
        let item = MakeupItem::from_value(json!({
            "id": "42",
            "name": "Velvet Teddy",
            "brand": "MAC",
            "type": "Batom",
            "price": 99.5
        }))
        .unwrap();

        assert_eq!(item.acquisition_price, 99.5);
        assert!(!item.was_gift);
        assert_eq!(item.kind, MakeupType::Lipstick);
    }

    #[test]
    fn legacy_record_without_any_price_defaults_to_zero() {
        let item = MakeupItem::from_value(json!({
            "id": "7",
            "name": "Sample",
            "brand": "Unknown"
        }))
        .unwrap();

        assert_eq!(item.price, 0.0);
        assert_eq!(item.acquisition_price, 0.0);
        assert_eq!(item.kind, MakeupType::Other);
    }

    #[test]
    fn legacy_migration_does_not_rewrite_stored_paid_amount() {
        let item = MakeupItem::from_value(json!({
            "id": "9",
            "name": "Gifted Palette",
            "brand": "Urban Decay",
            "type": "Sombra",
            "price": 300,
            "acquisitionPrice": 0,
            "wasGift": true
        }))
        .unwrap();

        assert_eq!(item.acquisition_price, 0.0);
        assert!(item.was_gift);
    }

    #[test]
    fn record_without_id_cannot_be_loaded() {
        let err = MakeupItem::from_value(json!({"name": "Orphan"})).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn labels_map_to_categories() {
        let kind: MakeupType = serde_json::from_value(json!("Lápis de Boca")).unwrap();
        assert_eq!(kind, MakeupType::LipLiner);
        assert_eq!(serde_json::to_value(MakeupType::Powder).unwrap(), json!("Pó"));

        let unknown: MakeupType = serde_json::from_value(json!("Glitter")).unwrap();
        assert_eq!(unknown, MakeupType::Other);
    }

    #[test]
    fn empty_and_timestamp_dates_are_lenient() {
        let input: MakeupItemInput =
            serde_json::from_value(json!({"purchaseDate": ""})).unwrap();
        assert_eq!(input.purchase_date, None);

        let input: MakeupItemInput =
            serde_json::from_value(json!({"purchaseDate": "2024-03-05T10:00:00.000Z"})).unwrap();
        assert_eq!(input.purchase_date, NaiveDate::from_ymd_opt(2024, 3, 5));
    }

    #[test]
    fn stored_record_with_unreadable_date_loads_without_it() {
        let item = MakeupItem::from_value(json!({
            "id": "1", "name": "Old", "brand": "B", "type": "Batom",
            "price": 30, "purchaseDate": "15/03/2024"
        }))
        .unwrap();
        assert_eq!(item.id, "1");
        assert_eq!(item.purchase_date, None);
        assert_eq!(item.acquisition_price, 30.0);

        let numeric = MakeupItem::from_value(json!({"id": "2", "purchaseDate": 20240315})).unwrap();
        assert_eq!(numeric.purchase_date, None);
    }

    #[test]
    fn written_input_with_unreadable_date_is_rejected() {
        let result =
            serde_json::from_value::<MakeupItemInput>(json!({"purchaseDate": "15/03/2024"}));
        assert!(result.is_err());
    }

    #[test]
    fn item_serializes_with_wire_field_names() {
        let input = MakeupItemInput {
            purchase_date: NaiveDate::from_ymd_opt(2024, 1, 15),
            ..ruby_woo()
        };
        let json = serde_json::to_value(input.finalize("abc".into()).unwrap()).unwrap();

        assert_eq!(json["id"], "abc");
        assert_eq!(json["type"], "Batom");
        assert_eq!(json["purchaseDate"], "2024-01-15");
        assert_eq!(json["acquisitionPrice"], 120.0);
        assert_eq!(json["wasGift"], false);
        assert!(json.get("shade").is_none());
    }
}
