use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ItemEffect {
    Heal(u32),
    MpHeal(u32),
}

/// A consumable. Unlike skills, items are used up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub effect: ItemEffect,
}

/// Stock of consumables keyed by item id.
///
/// An id missing from the map has quantity 0. Entries that drop to 0 are
/// removed so equality does not depend on history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: BTreeMap<String, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quantity(&self, item_id: &str) -> u32 {
        self.items.get(item_id).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Non-empty stacks in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(id, qty)| (id.as_str(), *qty))
    }

    /// Stacks cap at `u32::MAX`.
    pub(crate) fn insert(&mut self, item_id: &str, qty: u32) {
        if qty == 0 {
            return;
        }
        let stack = self.items.entry(item_id.to_string()).or_insert(0);
        *stack = stack.saturating_add(qty);
    }

    pub(crate) fn take(&mut self, item_id: &str, qty: u32) {
        let remaining = self.quantity(item_id).saturating_sub(qty);
        if remaining == 0 {
            self.items.remove(item_id);
        } else {
            self.items.insert(item_id.to_string(), remaining);
        }
    }
}
