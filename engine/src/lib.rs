//! Encounter tracking for tabletop combat: a roster of player characters and
//! adversaries, damage with stun and defeat rules, 2d6 morale checks and
//! experience accounting, driven one command line at a time.

pub mod combat;
pub mod combatant;
pub mod command;
pub mod config;
pub mod content;
pub mod dice;
pub mod error;
pub mod morale;
pub mod property;
pub mod registry;
pub mod tracker;
pub mod xp;

pub use combatant::{
    Combatant, CombatantId, Experience, Kind, MORALE_MAX, MORALE_MIN, MoraleStatus, Status,
    clamp_morale,
};
pub use config::{RosterEntry, Rules, TrackerConfig};
pub use dice::{Dice, DiceError, DiceExpr, DiceResolver};
pub use error::TrackerError;
pub use morale::{CheckKind, CheckOutcome, MoraleCheck};
pub use registry::{ClearScope, Entry, Registry, Slot, Snapshot};
pub use tracker::Tracker;
