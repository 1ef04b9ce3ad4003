use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::combatant::Kind;

/// Per-kind defaults applied when a combatant is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Rules {
    pub pc_morale: i32,
    pub mob_morale: i32,
    pub pc_min_hp: i32,
    pub mob_min_hp: i32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            pc_morale: 9,
            mob_morale: 7,
            pc_min_hp: -10,
            mob_min_hp: 0,
        }
    }
}

impl Rules {
    pub fn morale_for(&self, kind: Kind) -> i32 {
        match kind {
            Kind::PlayerCharacter => self.pc_morale,
            Kind::Adversary => self.mob_morale,
        }
    }

    pub fn min_hp_for(&self, kind: Kind) -> i32 {
        match kind {
            Kind::PlayerCharacter => self.pc_min_hp,
            Kind::Adversary => self.mob_min_hp,
        }
    }
}

/// A combatant to create at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RosterEntry {
    pub name: String,
    /// Dice expression or plain number.
    pub hp: String,
    #[serde(default = "default_kind")]
    pub kind: Kind,
    #[serde(default)]
    pub morale: Option<i32>,
}

fn default_kind() -> Kind {
    Kind::Adversary
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct TrackerConfig {
    /// Fixed seed for reproducible dice; entropy when absent.
    pub seed: Option<u64>,
    pub rules: Rules,
    /// Allow-list of command names. `None` enables everything.
    pub commands: Option<Vec<String>>,
    pub roster: Vec<RosterEntry>,
}

impl TrackerConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("failed to parse YAML config")
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("failed to parse JSON config")
    }

    /// Parse config text, choosing the format from the file extension.
    pub fn from_str_for_path(text: &str, path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(text),
            Some("json") => Self::from_json_str(text),
            other => bail!(
                "unsupported config extension {:?} for {} (expected .yaml, .yml or .json)",
                other.unwrap_or(""),
                path.display()
            ),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::from_str_for_path(&text, path)
            .with_context(|| format!("invalid config: {}", path.display()))
    }
}
