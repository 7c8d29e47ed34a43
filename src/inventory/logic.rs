//! Item stock bookkeeping and item effects.
//!
//! Stock operations take an inventory by reference and return a new one; the
//! caller's copy is never touched.

use super::data::ITEM_CATALOGUE;
use super::types::{Inventory, Item, ItemEffect};
use crate::core::constants::STARTING_ITEMS;
use crate::units::Unit;
use rand::Rng;

/// Result of applying an item to a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemUse {
    /// Amount actually restored after capping at the unit's maximum.
    pub restored: u32,
    pub message: String,
}

pub fn starting_inventory() -> Inventory {
    STARTING_ITEMS
        .iter()
        .fold(Inventory::new(), |inv, (id, qty)| {
            add_item_to_inventory(&inv, id, *qty)
        })
}

pub fn add_item_to_inventory(inventory: &Inventory, item_id: &str, qty: u32) -> Inventory {
    let mut next = inventory.clone();
    next.insert(item_id, qty);
    next
}

/// Removes `qty` of `item_id`.
///
/// Callers must check stock with [`get_item_quantity`] first. Over-removal is
/// not reported; the stack just bottoms out at zero.
pub fn remove_item_from_inventory(inventory: &Inventory, item_id: &str, qty: u32) -> Inventory {
    let mut next = inventory.clone();
    next.take(item_id, qty);
    next
}

pub fn get_item_quantity(inventory: &Inventory, item_id: &str) -> u32 {
    inventory.quantity(item_id)
}

/// Applies an item's effect to `target`, reporting the post-cap amount.
pub fn apply_item_effect(item: &Item, target: &mut Unit) -> ItemUse {
    match item.effect {
        ItemEffect::Heal(value) => {
            let restored = target.restore_hp(value);
            ItemUse {
                restored,
                message: format!("{} recovered {} HP!", target.name, restored),
            }
        }
        ItemEffect::MpHeal(value) => {
            let restored = target.restore_mp(value);
            ItemUse {
                restored,
                message: format!("{} recovered {} MP!", target.name, restored),
            }
        }
    }
}

/// Picks one catalogue item uniformly.
pub fn roll_collected_item<R: Rng + ?Sized>(rng: &mut R) -> &'static Item {
    &ITEM_CATALOGUE[rng.gen_range(0..ITEM_CATALOGUE.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::data::get_item;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn wounded_unit() -> Unit {
        let mut unit = Unit::new("tester", "Tester", 40, 20, 5, 5);
        unit.hp = 10;
        unit.mp = 2;
        unit
    }

    #[test]
    fn test_add_creates_and_increments() {
        let inv = Inventory::new();
        let inv = add_item_to_inventory(&inv, "potion", 2);
        let inv = add_item_to_inventory(&inv, "potion", 3);
        assert_eq!(get_item_quantity(&inv, "potion"), 5);
    }

    #[test]
    fn test_add_caps_full_stack() {
        let inv = add_item_to_inventory(&Inventory::new(), "potion", u32::MAX);
        let inv = add_item_to_inventory(&inv, "potion", 1);
        assert_eq!(get_item_quantity(&inv, "potion"), u32::MAX);
    }

    #[test]
    fn test_add_leaves_original_untouched() {
        let original = Inventory::new();
        let updated = add_item_to_inventory(&original, "herb", 1);
        assert_eq!(get_item_quantity(&original, "herb"), 0);
        assert_eq!(get_item_quantity(&updated, "herb"), 1);
    }

    #[test]
    fn test_absent_item_has_zero_quantity() {
        assert_eq!(get_item_quantity(&Inventory::new(), "elixir"), 0);
    }

    #[test]
    fn test_remove_to_zero_drops_entry() {
        let inv = add_item_to_inventory(&Inventory::new(), "potion", 2);
        let inv = remove_item_from_inventory(&inv, "potion", 2);
        assert_eq!(get_item_quantity(&inv, "potion"), 0);
        assert_eq!(inv, Inventory::new());
    }

    #[test]
    fn test_over_removal_never_goes_negative() {
        let inv = add_item_to_inventory(&Inventory::new(), "potion", 1);
        let inv = remove_item_from_inventory(&inv, "potion", 5);
        assert_eq!(get_item_quantity(&inv, "potion"), 0);
    }

    #[test]
    fn test_starting_inventory() {
        let inv = starting_inventory();
        assert_eq!(get_item_quantity(&inv, "potion"), 3);
        assert_eq!(get_item_quantity(&inv, "mp_potion"), 1);
    }

    #[test]
    fn test_heal_item_reports_capped_amount() {
        let mut unit = wounded_unit();
        unit.hp = 35;
        let potion = get_item("potion").unwrap();
        let used = apply_item_effect(potion, &mut unit);
        assert_eq!(used.restored, 5);
        assert_eq!(unit.hp, 40);
        assert!(used.message.contains("recovered 5 HP"));
    }

    #[test]
    fn test_mp_item_restores_mp_only() {
        let mut unit = wounded_unit();
        let ether = get_item("mp_potion").unwrap();
        let used = apply_item_effect(ether, &mut unit);
        assert_eq!(used.restored, 15);
        assert_eq!(unit.mp, 17);
        assert_eq!(unit.hp, 10);
    }

    #[test]
    fn test_collected_item_comes_from_pool() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let item = roll_collected_item(&mut rng);
            assert!(get_item(item.id).is_some());
        }
    }
}
