pub(crate) mod init;

use crate::hash::NumHasher;
use std::collections::HashMap;

/// A type alias for the numeric item type. Item runtime IDs may be negative.
pub type ItemID = i32;

/// Translates between item string IDs and their runtime IDs in both directions.
pub struct ItemIndex {
    runtime_ids: HashMap<String, ItemID>,
    names: HashMap<ItemID, String, NumHasher>,
}

impl ItemIndex {
    /// Returns the runtime ID of the item with the given string ID.
    #[inline]
    pub fn runtime_id(&self, name: &str) -> Option<ItemID> {
        self.runtime_ids.get(name).copied()
    }

    /// Returns the string ID of the item with the given runtime ID.
    #[inline]
    pub fn name(&self, id: ItemID) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Returns the number of item string IDs in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.runtime_ids.len()
    }

    /// Returns whether the table holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.runtime_ids.is_empty()
    }

    /// Returns an iterator over every string ID and its runtime ID in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ItemID)> + '_ {
        self.runtime_ids
            .iter()
            .map(|(name, &id)| (name.as_str(), id))
    }
}
