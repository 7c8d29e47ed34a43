//! Fixed unit roster: the hero, hireable companions, and every enemy.

use super::types::{Party, Skill, SkillKind, Unit, UnitRole};

pub const CAVE_BOSS_ID: &str = "cave-boss";
pub const MID_BOSS_ID: &str = "mid-boss";
pub const FINAL_BOSS_ID: &str = "final-boss";

pub fn create_hero() -> Unit {
    Unit::new("hero", "Hero", 40, 20, 8, 6)
        .with_role(UnitRole::Hero)
        .with_skill(Skill::new(
            "hero-slash",
            "Slash",
            4,
            14,
            "A focused sword strike",
            SkillKind::Attack,
        ))
        .with_skill(Skill::new(
            "hero-heal",
            "Heal",
            5,
            -20,
            "Restores a little HP",
            SkillKind::Heal,
        ))
}

pub fn create_initial_party() -> Party {
    Party::new(create_hero())
}

/// Companions available at the tavern, in display order.
pub fn hire_candidates() -> Vec<Unit> {
    vec![
        Unit::new("warrior", "Warrior", 36, 20, 9, 4).with_skill(Skill::new(
            "warrior-smash",
            "Power Smash",
            6,
            18,
            "A heavy blow",
            SkillKind::Attack,
        )),
        Unit::new("archer", "Archer", 28, 15, 7, 8).with_skill(Skill::new(
            "archer-volley",
            "Arrow Volley",
            5,
            12,
            "A quick flurry of arrows",
            SkillKind::Attack,
        )),
        Unit::new("monk", "Monk", 30, 20, 8, 7)
            .with_skill(Skill::new(
                "monk-focus",
                "Focus",
                4,
                0,
                "Steadies the mind",
                SkillKind::Buff,
            ))
            .with_skill(Skill::new(
                "monk-chi",
                "Chi Heal",
                6,
                -15,
                "Channels inner strength",
                SkillKind::Heal,
            )),
        Unit::new("mage", "Mage", 22, 40, 11, 5)
            .with_skill(Skill::new(
                "mage-fire",
                "Fire",
                6,
                22,
                "A spell of flame",
                SkillKind::Attack,
            ))
            .with_skill(Skill::new(
                "mage-heal",
                "Greater Heal",
                10,
                -30,
                "A powerful healing spell",
                SkillKind::Heal,
            )),
    ]
}

pub fn find_candidate(candidate_id: &str) -> Option<Unit> {
    hire_candidates().into_iter().find(|c| c.id == candidate_id)
}

/// Enemies only ever make basic attacks, so no enemy carries skills.
pub fn create_cave_boss() -> Unit {
    Unit::new(CAVE_BOSS_ID, "Lord of the Cave", 80, 30, 10, 5).with_role(UnitRole::Boss)
}

pub fn create_mid_boss() -> Unit {
    Unit::new(MID_BOSS_ID, "Gatekeeper Ogre", 90, 0, 11, 4).with_role(UnitRole::Boss)
}

pub fn create_final_boss() -> Unit {
    Unit::new(FINAL_BOSS_ID, "Abyssal Tyrant", 150, 40, 14, 6).with_role(UnitRole::Boss)
}

/// Regular enemies that can appear in random dungeon encounters.
pub fn dungeon_enemy_roster() -> Vec<Unit> {
    vec![
        Unit::new("goblin", "Goblin", 25, 0, 5, 6).with_role(UnitRole::Monster),
        Unit::new("bat", "Cave Bat", 16, 0, 4, 9).with_role(UnitRole::Monster),
        Unit::new("slime", "Slime", 30, 0, 3, 2).with_role(UnitRole::Monster),
        Unit::new("skeleton", "Skeleton", 32, 0, 7, 4).with_role(UnitRole::Monster),
    ]
}
