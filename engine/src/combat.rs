use crate::combatant::{Combatant, Status};

/// What a single `apply_damage` call changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageReport {
    pub hp_before: i32,
    pub hp_after: i32,
    /// The stun rule fired on this hit (the target may already have been stunned).
    pub stun_triggered: bool,
    /// The target crossed its defeat threshold on this hit.
    pub defeated_now: bool,
}

/// A hit stuns when it takes at least a quarter of positive HP, or lands on
/// a target already below zero.
pub fn stuns(hp_before: i32, amount: i32) -> bool {
    (hp_before > 0 && 4 * amount as i64 >= hp_before as i64) || hp_before < 0
}

/// Apply undirected damage: stun check on the pre-hit HP, subtract with no
/// floor, then the defeat check. A negative amount heals but never revives.
pub fn apply_damage(target: &mut Combatant, amount: i32, mut log: impl FnMut(String)) -> DamageReport {
    let before = target.hp;
    let stun_triggered = stuns(before, amount);
    target.hp = before.saturating_sub(amount);
    let change = if amount < 0 {
        format!("+{}", -(amount as i64))
    } else {
        format!("−{}", amount)
    };
    log(format!(
        "[DMG][{}] {} → {} ({})",
        target.name, before, target.hp, change
    ));

    if stun_triggered {
        if !target.stunned {
            log(format!("[STUN][{}] is stunned", target.name));
        }
        target.stunned = true;
    }

    let mut defeated_now = false;
    if target.hp <= target.min_hp && target.status != Status::Defeated {
        target.status = Status::Defeated;
        defeated_now = true;
        log(format!(
            "[STATE][{}] drops to {} HP (threshold {}) → Defeated",
            target.name, target.hp, target.min_hp
        ));
    }

    DamageReport {
        hp_before: before,
        hp_after: target.hp,
        stun_triggered,
        defeated_now,
    }
}

/// Directed hits feed the damage ledgers. Only player characters keep
/// ledgers; adversaries are left alone.
pub fn credit_dealt(attacker: &mut Combatant, amount: i32) {
    if let Some(xp) = attacker.experience.as_mut() {
        xp.damage_dealt += amount as i64;
    }
}

pub fn credit_taken(target: &mut Combatant, amount: i32) {
    if let Some(xp) = target.experience.as_mut() {
        xp.damage_taken += amount as i64;
    }
}
