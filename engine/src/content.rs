use std::collections::HashMap;

use anyhow::{Context, Result, anyhow};

use crate::config::RosterEntry;

pub fn builtin_encounters() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("starter", include_str!("../content/encounters/starter.yaml")),
        (
            "goblin_ambush",
            include_str!("../content/encounters/goblin_ambush.yaml"),
        ),
    ])
}

/// Look up a built-in encounter and parse its roster.
pub fn encounter(name: &str) -> Result<Vec<RosterEntry>> {
    let encounters = builtin_encounters();
    let text = encounters.get(name).ok_or_else(|| {
        let mut known: Vec<_> = encounters.keys().copied().collect();
        known.sort_unstable();
        anyhow!("unknown encounter '{}' (known: {})", name, known.join(", "))
    })?;
    serde_yaml::from_str(text).with_context(|| format!("failed to parse encounter: {}", name))
}
