use serde::{Deserialize, Serialize};

use crate::core::constants::MAX_COMPANIONS;

/// What a skill does when it resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillKind {
    Attack,
    /// Heal magnitude is stored as a negative `damage` value.
    Heal,
    /// Spends MP, changes no stats.
    Buff,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub mp_cost: u32,
    /// Positive values hurt the target; heal skills carry a negative value.
    pub damage: i32,
    pub description: String,
    pub kind: SkillKind,
}

impl Skill {
    pub fn new(
        id: &str,
        name: &str,
        mp_cost: u32,
        damage: i32,
        description: &str,
        kind: SkillKind,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            mp_cost,
            damage,
            description: description.to_string(),
            kind,
        }
    }

    /// Heal skills and buffs are cast on allies, attack skills on enemies.
    pub fn targets_allies(&self) -> bool {
        matches!(self.kind, SkillKind::Heal | SkillKind::Buff)
    }

    pub fn heal_amount(&self) -> u32 {
        self.damage.unsigned_abs()
    }
}

/// Identity role of a combat participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitRole {
    Hero,
    Companion,
    Monster,
    Boss,
}

/// A character or an enemy. Both share the same combat shape.
///
/// Invariants: `hp <= max_hp` and `mp <= max_mp`. A unit at 0 hp is dead and
/// takes no part in targeting or turn order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
    pub atk: i32,
    pub spd: i32,
    #[serde(default)]
    pub skills: Vec<Skill>,
    pub role: UnitRole,
}

impl Unit {
    /// Creates a unit at full hp and mp.
    pub fn new(id: &str, name: &str, max_hp: u32, max_mp: u32, atk: i32, spd: i32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            hp: max_hp,
            max_hp,
            mp: max_mp,
            max_mp,
            atk,
            spd,
            skills: Vec::new(),
            role: UnitRole::Companion,
        }
    }

    pub fn with_role(mut self, role: UnitRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skills.push(skill);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_hero(&self) -> bool {
        self.role == UnitRole::Hero
    }

    pub fn is_boss(&self) -> bool {
        self.role == UnitRole::Boss
    }

    pub fn skill(&self, skill_id: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.id == skill_id)
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// Raises hp up to `max_hp`. Returns the amount actually restored.
    pub fn restore_hp(&mut self, amount: u32) -> u32 {
        let old = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - old
    }

    /// Raises mp up to `max_mp`. Returns the amount actually restored.
    pub fn restore_mp(&mut self, amount: u32) -> u32 {
        let old = self.mp;
        self.mp = self.mp.saturating_add(amount).min(self.max_mp);
        self.mp - old
    }

    pub fn restore_full(&mut self) {
        self.hp = self.max_hp;
        self.mp = self.max_mp;
    }
}

/// The player's party: a hero plus up to three companions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub hero: Unit,
    pub companions: Vec<Unit>,
}

impl Party {
    pub fn new(hero: Unit) -> Self {
        Self {
            hero,
            companions: Vec::new(),
        }
    }

    pub fn has_room(&self) -> bool {
        self.companions.len() < MAX_COMPANIONS
    }

    pub fn contains(&self, unit_id: &str) -> bool {
        self.members().any(|m| m.id == unit_id)
    }

    /// Hero first, then companions in hiring order.
    pub fn members(&self) -> impl Iterator<Item = &Unit> {
        std::iter::once(&self.hero).chain(self.companions.iter())
    }

    pub fn len(&self) -> usize {
        1 + self.companions.len()
    }

    /// Member by battle-order index (0 is the hero).
    pub fn member(&self, index: usize) -> Option<&Unit> {
        match index {
            0 => Some(&self.hero),
            i => self.companions.get(i - 1),
        }
    }

    pub fn member_mut(&mut self, index: usize) -> Option<&mut Unit> {
        match index {
            0 => Some(&mut self.hero),
            i => self.companions.get_mut(i - 1),
        }
    }

    pub fn is_wiped(&self) -> bool {
        !self.members().any(Unit::is_alive)
    }
}
