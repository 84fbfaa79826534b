//! Food Waste Log Entry

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{deserialize_amount, deserialize_id, Entity, ItemId};
use super::pantry_item::Category;

/// Why an item was thrown away
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WasteReason {
    Expired,
    Spoiled,
    Leftover,
    #[serde(other)]
    Other,
}

impl WasteReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            WasteReason::Expired => "expired",
            WasteReason::Spoiled => "spoiled",
            WasteReason::Leftover => "leftover",
            WasteReason::Other => "other",
        }
    }
}

/// One wasted item, persisted under `foodWasteLog`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteEntry {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: ItemId,
    pub name: String,
    pub category: Category,
    pub reason: WasteReason,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub estimated_value: f64,
    pub date_wasted: DateTime<Utc>,
    pub original_expiry: NaiveDate,
}

impl Entity for WasteEntry {
    type Id = ItemId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
