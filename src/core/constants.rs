// Party
pub const MAX_COMPANIONS: usize = 3;

// Dungeon layout
pub const DUNGEON_MAX_STEP: u32 = 20;
pub const MIDBOSS_STEP: u32 = 10;
pub const FINAL_BOSS_STEP: u32 = 20;
pub const WATER_STEPS: [u32; 2] = [5, 15];

// Dungeon rolls (independent per arrival)
pub const ENCOUNTER_CHANCE: f64 = 0.2;
pub const ITEM_COLLECT_CHANCE: f64 = 0.2;

// Battle log: stored in full, displayed truncated
pub const BATTLE_LOG_DISPLAY_LINES: usize = 8;

// Starting inventory: (item id, quantity)
pub const STARTING_ITEMS: [(&str, u32); 2] = [("potion", 3), ("mp_potion", 1)];

/// Returns true for steps that hold a water source (camp option).
pub fn is_water_step(step: u32) -> bool {
    WATER_STEPS.contains(&step)
}

/// Returns true for fixed boss steps.
pub fn is_boss_step(step: u32) -> bool {
    step == MIDBOSS_STEP || step == FINAL_BOSS_STEP
}
