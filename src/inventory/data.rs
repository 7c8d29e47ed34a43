//! Item catalogue.

use super::types::{Item, ItemEffect};

pub const ITEM_CATALOGUE: [Item; 4] = [
    Item {
        id: "potion",
        name: "Potion",
        description: "Restores 20 HP",
        effect: ItemEffect::Heal(20),
    },
    Item {
        id: "high_potion",
        name: "High Potion",
        description: "Restores 50 HP",
        effect: ItemEffect::Heal(50),
    },
    Item {
        id: "herb",
        name: "Herb",
        description: "Restores 10 HP",
        effect: ItemEffect::Heal(10),
    },
    Item {
        id: "mp_potion",
        name: "Ether",
        description: "Restores 15 MP",
        effect: ItemEffect::MpHeal(15),
    },
];

pub fn get_item(item_id: &str) -> Option<&'static Item> {
    ITEM_CATALOGUE.iter().find(|item| item.id == item_id)
}
