use crate::combatant::{Combatant, MORALE_MAX, MoraleStatus};

/// Bonus added to the roll for a panic check.
pub const PANIC_MODIFIER: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    Braveness,
    Boldness,
    Panic,
    Rally,
}

impl CheckKind {
    pub const NAMES: [&'static str; 4] = ["braveness", "boldness", "panic", "rally"];

    pub fn parse(s: &str) -> Option<CheckKind> {
        match s.to_lowercase().as_str() {
            "braveness" => Some(CheckKind::Braveness),
            "boldness" => Some(CheckKind::Boldness),
            "panic" => Some(CheckKind::Panic),
            "rally" => Some(CheckKind::Rally),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CheckKind::Braveness => "braveness",
            CheckKind::Boldness => "boldness",
            CheckKind::Panic => "panic",
            CheckKind::Rally => "rally",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Braveness or panic passed; nothing changes.
    Held,
    Panicked,
    /// Boldness passed and morale went up (or stayed at the cap).
    Improved { from: i32, to: i32 },
    Routed,
    Rallied,
    /// Rally failed; status stays as it was.
    StillShaken,
    /// Rally on a combatant that was never shaken. No dice are rolled.
    AlreadyNormal,
}

impl CheckOutcome {
    pub fn passed(self) -> bool {
        matches!(
            self,
            CheckOutcome::Held
                | CheckOutcome::Improved { .. }
                | CheckOutcome::Rallied
                | CheckOutcome::AlreadyNormal
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoraleCheck {
    pub kind: CheckKind,
    /// The two d6 faces; `None` when no roll was needed.
    pub dice: Option<(i32, i32)>,
    /// Dice sum plus any modifier.
    pub total: i32,
    pub threshold: i32,
    pub outcome: CheckOutcome,
}

/// Roll 2d6 against the combatant's morale and apply the transition for
/// `kind`. Never touches HP or stun.
pub fn morale_check(
    kind: CheckKind,
    c: &mut Combatant,
    mut d6: impl FnMut() -> i32,
    mut log: impl FnMut(String),
) -> MoraleCheck {
    let threshold = c.morale();

    if kind == CheckKind::Rally && c.morale_status == MoraleStatus::Normal {
        log(format!("[MORALE][{}] rally: already normal", c.name));
        return MoraleCheck {
            kind,
            dice: None,
            total: 0,
            threshold,
            outcome: CheckOutcome::AlreadyNormal,
        };
    }

    let (a, b) = (d6(), d6());
    let modifier = if kind == CheckKind::Panic { PANIC_MODIFIER } else { 0 };
    let total = a + b + modifier;
    let passed = total >= threshold;

    let outcome = match (kind, passed) {
        (CheckKind::Braveness | CheckKind::Panic, true) => CheckOutcome::Held,
        (CheckKind::Braveness | CheckKind::Panic, false) => {
            c.morale_status = MoraleStatus::Panicked;
            CheckOutcome::Panicked
        }
        (CheckKind::Boldness, true) => {
            let from = c.morale();
            c.set_morale((from + 1).min(MORALE_MAX));
            CheckOutcome::Improved { from, to: c.morale() }
        }
        (CheckKind::Boldness, false) => {
            c.morale_status = MoraleStatus::Routed;
            CheckOutcome::Routed
        }
        (CheckKind::Rally, true) => {
            c.morale_status = MoraleStatus::Normal;
            CheckOutcome::Rallied
        }
        (CheckKind::Rally, false) => CheckOutcome::StillShaken,
    };

    let roll_text = if modifier != 0 {
        format!("2d6={}+{} {:+} = {}", a, b, modifier, total)
    } else {
        format!("2d6={}+{} = {}", a, b, total)
    };
    let verdict = match outcome {
        CheckOutcome::Held => "HOLDS".to_string(),
        CheckOutcome::Panicked => "PANICKED".to_string(),
        CheckOutcome::Improved { from, to } => format!("BOLD (morale {} → {})", from, to),
        CheckOutcome::Routed => "ROUTED".to_string(),
        CheckOutcome::Rallied => "RALLIES".to_string(),
        CheckOutcome::StillShaken => format!("still {:?}", c.morale_status),
        CheckOutcome::AlreadyNormal => "already normal".to_string(),
    };
    log(format!(
        "[MORALE][{}] {} {} vs morale {} → {}",
        c.name,
        kind.name(),
        roll_text,
        threshold,
        verdict
    ));

    MoraleCheck {
        kind,
        dice: Some((a, b)),
        total,
        threshold,
        outcome,
    }
}
