use std::fmt;

use serde::{Deserialize, Serialize};

pub const MORALE_MIN: i32 = 2;
pub const MORALE_MAX: i32 = 12;

/// Clamp a morale rating into the 2d6 range.
pub fn clamp_morale(value: i32) -> i32 {
    value.clamp(MORALE_MIN, MORALE_MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    #[serde(alias = "pc")]
    PlayerCharacter,
    #[serde(alias = "mob")]
    Adversary,
}

impl Kind {
    pub fn parse(s: &str) -> Option<Kind> {
        match s.to_lowercase().as_str() {
            "pc" => Some(Kind::PlayerCharacter),
            "mob" => Some(Kind::Adversary),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::PlayerCharacter => write!(f, "PC"),
            Kind::Adversary => write!(f, "Mob"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Alive,
    Defeated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoraleStatus {
    Normal,
    Panicked,
    Routed,
}

/// Identifier handed out once per combatant; never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Damage ledger and derived XP for a player character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Experience {
    pub damage_dealt: i64,
    pub damage_taken: i64,
    pub from_damage_taken: i64,
    pub from_damage_dealt: i64,
    pub bonus: i64,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub kind: Kind,
    pub name: String,
    pub max_hp: i32,
    pub hp: i32,
    pub status: Status,
    pub stunned: bool,
    morale: i32,
    pub morale_status: MoraleStatus,
    pub min_hp: i32,
    /// Present exactly for player characters.
    pub experience: Option<Experience>,
}

impl Combatant {
    pub fn new(id: CombatantId, kind: Kind, name: String, max_hp: i32, morale: i32, min_hp: i32) -> Self {
        Self {
            id,
            kind,
            name,
            max_hp,
            hp: max_hp,
            status: Status::Alive,
            stunned: false,
            morale: clamp_morale(morale),
            morale_status: MoraleStatus::Normal,
            min_hp,
            experience: match kind {
                Kind::PlayerCharacter => Some(Experience::default()),
                Kind::Adversary => None,
            },
        }
    }

    pub fn morale(&self) -> i32 {
        self.morale
    }

    pub fn set_morale(&mut self, value: i32) {
        self.morale = clamp_morale(value);
    }

    pub fn is_pc(&self) -> bool {
        self.kind == Kind::PlayerCharacter
    }

    pub fn is_alive(&self) -> bool {
        self.status == Status::Alive
    }
}
