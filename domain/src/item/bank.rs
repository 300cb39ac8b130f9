//! Append-only item banks
//!
//! The durable output of the pipeline. Banks only grow during a run; an
//! external collaborator owns long-term storage and clearing.

use super::entities::{Item, ItemId};
use serde::{Deserialize, Serialize};

/// An ordered, append-only collection of items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemBank {
    items: Vec<Item>,
}

impl ItemBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single item
    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Append a batch of items, preserving their order
    pub fn extend(&mut self, items: impl IntoIterator<Item = Item>) {
        self.items.extend(items);
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.iter().any(|i| &i.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }
}

/// The accepted and rejected banks carried across runs
///
/// An item appears in at most one of the two per run. Mutation is confined
/// to the orchestrator's critical section — nothing else writes here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemBanks {
    pub accepted: ItemBank,
    pub rejected: ItemBank,
}

impl ItemBanks {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::entities::ItemKind;

    #[test]
    fn test_push_preserves_order() {
        let mut bank = ItemBank::new();
        let first = Item::new(ItemKind::ShortAnswer, "first", "a");
        let second = Item::new(ItemKind::ShortAnswer, "second", "b");
        bank.push(first.clone());
        bank.push(second.clone());

        assert_eq!(bank.len(), 2);
        assert_eq!(bank.items()[0].id, first.id);
        assert_eq!(bank.items()[1].id, second.id);
    }

    #[test]
    fn test_contains() {
        let mut bank = ItemBank::new();
        let item = Item::new(ItemKind::ShortAnswer, "q", "a");
        let id = item.id.clone();
        bank.push(item);

        assert!(bank.contains(&id));
        assert!(!bank.contains(&ItemId::generate()));
    }
}
