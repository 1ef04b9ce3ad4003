use crate::combatant::Combatant;

pub const XP_PER_DAMAGE_TAKEN: i64 = 20;
pub const XP_PER_DAMAGE_DEALT: i64 = 10;

/// Recompute every XP field from the damage ledgers alone.
///
/// Defeated player characters score nothing. Survivors split a bonus worth
/// the party's total damage taken, evenly and rounded down. Adversaries in
/// the slice are ignored, so the whole roster can be passed in.
pub fn recompute_xp(roster: &mut [Combatant]) {
    let (taken_sum, alive) = roster
        .iter()
        .filter(|c| c.is_alive())
        .filter_map(|c| c.experience.as_ref())
        .fold((0i64, 0i64), |(sum, n), xp| (sum + xp.damage_taken, n + 1));
    let bonus = if alive > 0 {
        (taken_sum * XP_PER_DAMAGE_TAKEN).div_euclid(alive)
    } else {
        0
    };

    for c in roster.iter_mut() {
        let alive = c.is_alive();
        let Some(xp) = c.experience.as_mut() else {
            continue;
        };
        if alive {
            xp.from_damage_taken = xp.damage_taken * XP_PER_DAMAGE_TAKEN;
            xp.from_damage_dealt = xp.damage_dealt * XP_PER_DAMAGE_DEALT;
            xp.bonus = bonus;
        } else {
            xp.from_damage_taken = 0;
            xp.from_damage_dealt = 0;
            xp.bonus = 0;
        }
        xp.total = xp.from_damage_taken + xp.from_damage_dealt + xp.bonus;
    }
}

/// Zero the damage ledgers, then recompute.
pub fn reset_xp(roster: &mut [Combatant]) {
    for xp in roster.iter_mut().filter_map(|c| c.experience.as_mut()) {
        xp.damage_dealt = 0;
        xp.damage_taken = 0;
    }
    recompute_xp(roster);
}
