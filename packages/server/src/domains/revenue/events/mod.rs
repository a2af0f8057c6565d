//! Revenue ledger events.

use serde::{Deserialize, Serialize};

use crate::common::RevenueEntryId;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RevenueEvent {
    EntryRecorded { entry_id: RevenueEntryId },
    EntryConfirmed { entry_id: RevenueEntryId },
    EntryRefunded { entry_id: RevenueEntryId },
}
