use serde::Serialize;

use crate::combat::{DamageReport, apply_damage, credit_dealt, credit_taken};
use crate::combatant::{Combatant, CombatantId, Kind, clamp_morale};
use crate::config::Rules;
use crate::dice::DiceResolver;
use crate::error::{Result, TrackerError};
use crate::morale::{CheckKind, MoraleCheck, morale_check};
use crate::xp::{recompute_xp, reset_xp};

/// Position of a combatant inside its own sequence. Only valid until the
/// next removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub kind: Kind,
    pub pos: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearScope {
    Pcs,
    Mobs,
    All,
}

impl ClearScope {
    pub const NAMES: [&'static str; 3] = ["pcs", "mobs", "all"];

    pub fn parse(s: &str) -> Option<ClearScope> {
        match s.to_lowercase().as_str() {
            "pcs" => Some(ClearScope::Pcs),
            "mobs" => Some(ClearScope::Mobs),
            "all" => Some(ClearScope::All),
            _ => None,
        }
    }
}

/// One row of a read-only roster view.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    pub index: usize,
    #[serde(flatten)]
    pub combatant: Combatant,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub entries: Vec<Entry>,
}

/// Player characters first, then adversaries. Display indices are derived
/// from that order on every lookup; ids are not.
#[derive(Debug, Clone)]
pub struct Registry {
    pcs: Vec<Combatant>,
    mobs: Vec<Combatant>,
    next_id: u32,
    rules: Rules,
}

impl Registry {
    pub fn new(rules: Rules) -> Self {
        Self {
            pcs: Vec::new(),
            mobs: Vec::new(),
            next_id: 1,
            rules,
        }
    }

    pub fn len(&self) -> usize {
        self.pcs.len() + self.mobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pcs(&self) -> &[Combatant] {
        &self.pcs
    }

    /// All combatants in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.pcs.iter().chain(self.mobs.iter())
    }

    fn seq(&self, kind: Kind) -> &Vec<Combatant> {
        match kind {
            Kind::PlayerCharacter => &self.pcs,
            Kind::Adversary => &self.mobs,
        }
    }

    fn seq_mut(&mut self, kind: Kind) -> &mut Vec<Combatant> {
        match kind {
            Kind::PlayerCharacter => &mut self.pcs,
            Kind::Adversary => &mut self.mobs,
        }
    }

    /// Create a combatant. HP comes from the dice resolver; if it fails
    /// nothing is registered.
    pub fn add(
        &mut self,
        dice: &mut dyn DiceResolver,
        kind: Kind,
        raw_name: &str,
        hp_expr: &str,
        morale: Option<&str>,
        mut log: impl FnMut(String),
    ) -> Result<CombatantId> {
        let name = validate_name(raw_name)?;
        let hp = dice.roll(hp_expr)?;

        let default_morale = clamp_morale(self.rules.morale_for(kind));
        let morale = match morale {
            None => default_morale,
            Some(text) => match text.trim().parse::<i32>() {
                Ok(m) => clamp_morale(m),
                Err(_) => {
                    tracing::warn!(morale = text, "unreadable morale, using default");
                    log(format!(
                        "[WARN] invalid morale '{}', using default {}",
                        text, default_morale
                    ));
                    default_morale
                }
            },
        };

        let final_name = self.disambiguate(kind, &name, &mut log);
        let id = CombatantId(self.next_id);
        self.next_id += 1;

        let combatant = Combatant::new(id, kind, final_name, hp, morale, self.rules.min_hp_for(kind));
        log(format!(
            "[ADD][{}] {} with {} HP, morale {} ({})",
            combatant.name,
            kind,
            hp,
            combatant.morale(),
            id
        ));
        tracing::info!(name = %combatant.name, %id, hp, "combatant added");
        self.seq_mut(kind).push(combatant);
        if kind == Kind::PlayerCharacter {
            self.recompute_xp();
        }
        Ok(id)
    }

    /// Pick the name for a newcomer, renaming a lone unsuffixed namesake to
    /// `"<name> 1"` on the way.
    fn disambiguate(&mut self, kind: Kind, name: &str, log: &mut impl FnMut(String)) -> String {
        let lower = name.to_lowercase();
        let seq = self.seq_mut(kind);
        let matches: Vec<usize> = seq
            .iter()
            .enumerate()
            .filter(|(_, c)| c.name.to_lowercase().split(' ').next() == Some(lower.as_str()))
            .map(|(i, _)| i)
            .collect();

        match matches.as_slice() {
            [] => name.to_string(),
            [only] => {
                let existing = &mut seq[*only];
                if !existing.name.contains(' ') {
                    let renamed = format!("{} 1", existing.name);
                    log(format!("[ADD][{}] renamed to {}", existing.name, renamed));
                    existing.name = renamed;
                }
                format!("{} 2", name)
            }
            many => format!("{} {}", name, many.len() + 1),
        }
    }

    /// Resolve a 1-based display index, or `#<id>` for a stable id.
    pub fn resolve(&self, handle: &str) -> Result<Slot> {
        let handle = handle.trim();
        let invalid = || TrackerError::InvalidIndex(handle.to_string(), self.len());

        if let Some(id) = handle.strip_prefix('#') {
            let id: u32 = id.parse().map_err(|_| invalid())?;
            return [Kind::PlayerCharacter, Kind::Adversary]
                .into_iter()
                .find_map(|kind| {
                    self.seq(kind)
                        .iter()
                        .position(|c| c.id.0 == id)
                        .map(|pos| Slot { kind, pos })
                })
                .ok_or_else(invalid);
        }

        let index: usize = handle.parse().map_err(|_| invalid())?;
        if index == 0 || index > self.len() {
            return Err(invalid());
        }
        let pos = index - 1;
        if pos < self.pcs.len() {
            Ok(Slot {
                kind: Kind::PlayerCharacter,
                pos,
            })
        } else {
            Ok(Slot {
                kind: Kind::Adversary,
                pos: pos - self.pcs.len(),
            })
        }
    }

    pub fn display_index(&self, slot: Slot) -> usize {
        match slot.kind {
            Kind::PlayerCharacter => slot.pos + 1,
            Kind::Adversary => self.pcs.len() + slot.pos + 1,
        }
    }

    pub fn get(&self, slot: Slot) -> Option<&Combatant> {
        self.seq(slot.kind).get(slot.pos)
    }

    pub fn get_mut(&mut self, slot: Slot) -> Option<&mut Combatant> {
        self.seq_mut(slot.kind).get_mut(slot.pos)
    }

    pub fn find(&self, handle: &str) -> Result<&Combatant> {
        let slot = self.resolve(handle)?;
        self.get(slot)
            .ok_or_else(|| TrackerError::InvalidIndex(handle.to_string(), self.len()))
    }

    pub fn find_mut(&mut self, handle: &str) -> Result<&mut Combatant> {
        let slot = self.resolve(handle)?;
        let total = self.len();
        self.get_mut(slot)
            .ok_or_else(|| TrackerError::InvalidIndex(handle.to_string(), total))
    }

    pub fn remove(&mut self, handle: &str) -> Result<Combatant> {
        let slot = self.resolve(handle)?;
        let removed = self.seq_mut(slot.kind).remove(slot.pos);
        tracing::info!(name = %removed.name, id = %removed.id, "combatant removed");
        if removed.is_pc() {
            self.recompute_xp();
        }
        Ok(removed)
    }

    /// Empty one or both sequences; returns how many combatants went away.
    pub fn clear(&mut self, scope: ClearScope) -> usize {
        let mut removed = 0;
        if matches!(scope, ClearScope::Pcs | ClearScope::All) {
            removed += self.pcs.len();
            self.pcs.clear();
        }
        if matches!(scope, ClearScope::Mobs | ClearScope::All) {
            removed += self.mobs.len();
            self.mobs.clear();
        }
        removed
    }

    /// Undirected damage. Ledgers stay untouched.
    pub fn damage(&mut self, handle: &str, amount: i32, log: impl FnMut(String)) -> Result<DamageReport> {
        let target = self.find_mut(handle)?;
        let is_pc = target.is_pc();
        let report = apply_damage(target, amount, log);
        if is_pc {
            self.recompute_xp();
        }
        Ok(report)
    }

    /// Directed damage: like `damage`, plus dealt/taken bookkeeping for
    /// player characters on either end.
    pub fn combat(
        &mut self,
        attacker: &str,
        target: &str,
        amount: i32,
        mut log: impl FnMut(String),
    ) -> Result<DamageReport> {
        let attacker_slot = self.resolve(attacker)?;
        let target_slot = self.resolve(target)?;
        let total = self.len();
        let missing = |h: &str| TrackerError::InvalidIndex(h.to_string(), total);

        let attacker_name = self.get(attacker_slot).ok_or_else(|| missing(attacker))?.name.clone();
        let victim = self.get_mut(target_slot).ok_or_else(|| missing(target))?;
        log(format!("[COMBAT] {} hits {} for {}", attacker_name, victim.name, amount));
        let report = apply_damage(victim, amount, &mut log);
        credit_taken(victim, amount);

        let striker = self.get_mut(attacker_slot).ok_or_else(|| missing(attacker))?;
        credit_dealt(striker, amount);

        self.recompute_xp();
        Ok(report)
    }

    pub fn morale_check(
        &mut self,
        kind: CheckKind,
        handle: &str,
        dice: &mut dyn DiceResolver,
        log: impl FnMut(String),
    ) -> Result<MoraleCheck> {
        let c = self.find_mut(handle)?;
        Ok(morale_check(kind, c, || dice.die(6), log))
    }

    pub fn recompute_xp(&mut self) {
        recompute_xp(&mut self.pcs);
    }

    pub fn reset_xp(&mut self) {
        reset_xp(&mut self.pcs);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            entries: self
                .iter()
                .enumerate()
                .map(|(i, c)| Entry {
                    index: i + 1,
                    combatant: c.clone(),
                })
                .collect(),
        }
    }
}

/// Python-style title case: the first letter of every run of letters is
/// upper-cased, the rest lower-cased.
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_alpha = false;
    for ch in raw.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// Title-case and reject names that would collide with generated suffixes.
fn validate_name(raw: &str) -> Result<String> {
    let words: Vec<&str> = raw.split_whitespace().collect();
    if words.is_empty() {
        return Err(TrackerError::InvalidName(raw.to_string(), "name is empty"));
    }
    if words.len() > 1 && words[words.len() - 1].chars().all(|c| c.is_ascii_digit()) {
        return Err(TrackerError::InvalidName(
            raw.to_string(),
            "numeric suffixes are assigned automatically",
        ));
    }
    Ok(title_case(&words.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_matches_word_boundaries() {
        assert_eq!(title_case("goblin"), "Goblin");
        assert_eq!(title_case("GOBLIN archer"), "Goblin Archer");
        assert_eq!(title_case("o'neil"), "O'Neil");
        assert_eq!(title_case("orc2x"), "Orc2X");
    }

    #[test]
    fn names_collapse_whitespace() {
        assert_eq!(validate_name("  cave   troll ").unwrap(), "Cave Troll");
    }

    #[test]
    fn manual_numeric_suffix_is_rejected() {
        assert!(matches!(
            validate_name("goblin 2"),
            Err(TrackerError::InvalidName(_, _))
        ));
        // a lone number is a (strange) name, not a suffix
        assert_eq!(validate_name("7").unwrap(), "7");
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(validate_name("   ").is_err());
    }
}
