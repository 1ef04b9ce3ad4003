use super::{Command, arity, parse_amount};
use crate::combatant::Kind;
use crate::dice::DiceResolver;
use crate::error::{Result, TrackerError};
use crate::morale::CheckKind;
use crate::property::parse_mutation;
use crate::registry::ClearScope;
use crate::tracker::Tracker;

pub struct Add;
pub struct Damage;
pub struct Combat;
pub struct Check;
pub struct Rally;
pub struct Unstun;
pub struct Set;
pub struct Remove;
pub struct Clear;
pub struct Reset;
pub struct Xp;
pub struct Roll;
pub struct List;
pub struct Help;
pub struct Exit;

impl Command for Add {
    fn name(&self) -> &'static str {
        "add"
    }
    fn usage(&self) -> &'static str {
        "add <name> <hp-expr> [pc|mob] [morale]"
    }
    fn summary(&self) -> &'static str {
        "create a combatant (mob by default)"
    }
    fn run(&self, tracker: &mut Tracker, args: &[String]) -> Result<bool> {
        let args = arity(self, args, 2, 4)?;
        let kind = match args.get(2) {
            None => Kind::Adversary,
            Some(text) => Kind::parse(text)
                .ok_or_else(|| TrackerError::unknown("kind", text, &["pc", "mob"]))?,
        };
        let (registry, dice, out) = tracker.parts();
        registry.add(
            dice,
            kind,
            &args[0],
            &args[1],
            args.get(3).map(String::as_str),
            |line| out.push(line),
        )?;
        Ok(true)
    }
}

impl Command for Damage {
    fn name(&self) -> &'static str {
        "damage"
    }
    fn usage(&self) -> &'static str {
        "damage <index> <amount>"
    }
    fn summary(&self) -> &'static str {
        "apply damage with no attacker"
    }
    fn run(&self, tracker: &mut Tracker, args: &[String]) -> Result<bool> {
        let args = arity(self, args, 2, 2)?;
        let amount = parse_amount(&args[1])?;
        let (registry, _, out) = tracker.parts();
        registry.damage(&args[0], amount, |line| out.push(line))?;
        Ok(true)
    }
}

impl Command for Combat {
    fn name(&self) -> &'static str {
        "combat"
    }
    fn usage(&self) -> &'static str {
        "combat <attacker> <target> <amount>"
    }
    fn summary(&self) -> &'static str {
        "apply damage from one combatant to another, tracking XP"
    }
    fn run(&self, tracker: &mut Tracker, args: &[String]) -> Result<bool> {
        let args = arity(self, args, 3, 3)?;
        let amount = parse_amount(&args[2])?;
        let (registry, _, out) = tracker.parts();
        registry.combat(&args[0], &args[1], amount, |line| out.push(line))?;
        Ok(true)
    }
}

fn run_check(tracker: &mut Tracker, kind: CheckKind, handle: &str) -> Result<bool> {
    let (registry, dice, out) = tracker.parts();
    registry.morale_check(kind, handle, dice, |line| out.push(line))?;
    Ok(true)
}

impl Command for Check {
    fn name(&self) -> &'static str {
        "check"
    }
    fn usage(&self) -> &'static str {
        "check <braveness|boldness|panic|rally> <index>"
    }
    fn summary(&self) -> &'static str {
        "roll a 2d6 morale check"
    }
    fn run(&self, tracker: &mut Tracker, args: &[String]) -> Result<bool> {
        let args = arity(self, args, 2, 2)?;
        let kind = CheckKind::parse(&args[0])
            .ok_or_else(|| TrackerError::unknown("check", &args[0], &CheckKind::NAMES))?;
        run_check(tracker, kind, &args[1])
    }
}

impl Command for Rally {
    fn name(&self) -> &'static str {
        "rally"
    }
    fn usage(&self) -> &'static str {
        "rally <index>"
    }
    fn summary(&self) -> &'static str {
        "shorthand for check rally"
    }
    fn run(&self, tracker: &mut Tracker, args: &[String]) -> Result<bool> {
        let args = arity(self, args, 1, 1)?;
        run_check(tracker, CheckKind::Rally, &args[0])
    }
}

impl Command for Unstun {
    fn name(&self) -> &'static str {
        "unstun"
    }
    fn usage(&self) -> &'static str {
        "unstun <index>"
    }
    fn summary(&self) -> &'static str {
        "clear the stunned flag"
    }
    fn run(&self, tracker: &mut Tracker, args: &[String]) -> Result<bool> {
        let args = arity(self, args, 1, 1)?;
        let (registry, _, out) = tracker.parts();
        let c = registry.find_mut(&args[0])?;
        if c.stunned {
            c.stunned = false;
            out.push(format!("[STUN][{}] is no longer stunned", c.name));
        } else {
            out.push(format!("[STUN][{}] was not stunned", c.name));
        }
        Ok(true)
    }
}

impl Command for Set {
    fn name(&self) -> &'static str {
        "set"
    }
    fn usage(&self) -> &'static str {
        "set <morale|minHp|stunned|moraleStatus|status> <index> <value>"
    }
    fn summary(&self) -> &'static str {
        "overwrite one combatant property"
    }
    fn run(&self, tracker: &mut Tracker, args: &[String]) -> Result<bool> {
        let args = arity(self, args, 3, 3)?;
        let mutation = parse_mutation(&args[0], &args[2])?;
        let (registry, _, out) = tracker.parts();
        let c = registry.find_mut(&args[1])?;
        let (before, after) = mutation.apply(c);
        out.push(format!(
            "[SET][{}] {}: {} → {}",
            c.name,
            mutation.property(),
            before,
            after
        ));
        Ok(true)
    }
}

impl Command for Remove {
    fn name(&self) -> &'static str {
        "remove"
    }
    fn usage(&self) -> &'static str {
        "remove <index>"
    }
    fn summary(&self) -> &'static str {
        "delete a combatant"
    }
    fn run(&self, tracker: &mut Tracker, args: &[String]) -> Result<bool> {
        let args = arity(self, args, 1, 1)?;
        let (registry, _, out) = tracker.parts();
        let removed = registry.remove(&args[0])?;
        out.push(format!("[REMOVE] {} ({})", removed.name, removed.id));
        Ok(true)
    }
}

impl Command for Clear {
    fn name(&self) -> &'static str {
        "clear"
    }
    fn usage(&self) -> &'static str {
        "clear <pcs|mobs|all>"
    }
    fn summary(&self) -> &'static str {
        "delete every combatant in a group"
    }
    fn run(&self, tracker: &mut Tracker, args: &[String]) -> Result<bool> {
        let args = arity(self, args, 1, 1)?;
        let scope = ClearScope::parse(&args[0])
            .ok_or_else(|| TrackerError::unknown("scope", &args[0], &ClearScope::NAMES))?;
        let (registry, _, out) = tracker.parts();
        let removed = registry.clear(scope);
        out.push(format!("[REMOVE] cleared {} combatant(s)", removed));
        Ok(true)
    }
}

impl Command for Reset {
    fn name(&self) -> &'static str {
        "reset"
    }
    fn usage(&self) -> &'static str {
        "reset"
    }
    fn summary(&self) -> &'static str {
        "zero damage dealt/taken for all PCs"
    }
    fn run(&self, tracker: &mut Tracker, args: &[String]) -> Result<bool> {
        arity(self, args, 0, 0)?;
        let (registry, _, out) = tracker.parts();
        registry.reset_xp();
        out.push("[XP] damage counters reset".to_string());
        Ok(true)
    }
}

impl Command for Xp {
    fn name(&self) -> &'static str {
        "xp"
    }
    fn usage(&self) -> &'static str {
        "xp [calculate|show]"
    }
    fn summary(&self) -> &'static str {
        "recalculate (default) or print PC experience"
    }
    fn run(&self, tracker: &mut Tracker, args: &[String]) -> Result<bool> {
        let args = arity(self, args, 0, 1)?;
        let mode = args.first().map(|s| s.to_lowercase());
        let (registry, _, out) = tracker.parts();
        match mode.as_deref() {
            None | Some("calculate") => {
                registry.recompute_xp();
                out.push(format!(
                    "[XP] recalculated for {} player character(s)",
                    registry.pcs().len()
                ));
                Ok(true)
            }
            Some("show") => {
                if registry.pcs().is_empty() {
                    out.push("[XP] no player characters".to_string());
                }
                for pc in registry.pcs() {
                    if let Some(xp) = &pc.experience {
                        out.push(format!(
                            "[XP][{}] taken {} ({}) + dealt {} ({}) + bonus {} = {}",
                            pc.name,
                            xp.damage_taken,
                            xp.from_damage_taken,
                            xp.damage_dealt,
                            xp.from_damage_dealt,
                            xp.bonus,
                            xp.total
                        ));
                    }
                }
                Ok(false)
            }
            Some(_) => Err(TrackerError::unknown(
                "xp mode",
                &args[0],
                &["calculate", "show"],
            )),
        }
    }
}

impl Command for Roll {
    fn name(&self) -> &'static str {
        "roll"
    }
    fn usage(&self) -> &'static str {
        "roll <expr>"
    }
    fn summary(&self) -> &'static str {
        "roll a dice expression without touching the roster"
    }
    fn run(&self, tracker: &mut Tracker, args: &[String]) -> Result<bool> {
        let args = arity(self, args, 1, usize::MAX)?;
        let expr = args.join(" ");
        let (_, dice, out) = tracker.parts();
        let total = dice.roll(&expr)?;
        out.push(format!("[ROLL] {} = {}", expr, total));
        Ok(false)
    }
}

impl Command for List {
    fn name(&self) -> &'static str {
        "list"
    }
    fn usage(&self) -> &'static str {
        "list"
    }
    fn summary(&self) -> &'static str {
        "redraw the roster"
    }
    fn run(&self, _tracker: &mut Tracker, args: &[String]) -> Result<bool> {
        arity(self, args, 0, 0)?;
        Ok(true)
    }
}

impl Command for Help {
    fn name(&self) -> &'static str {
        "help"
    }
    fn usage(&self) -> &'static str {
        "help"
    }
    fn summary(&self) -> &'static str {
        "show this list"
    }
    fn run(&self, tracker: &mut Tracker, _args: &[String]) -> Result<bool> {
        let lines: Vec<String> = tracker
            .commands()
            .map(|c| format!("- {:<58} {}", c.usage(), c.summary()))
            .collect();
        let (_, _, out) = tracker.parts();
        out.push("Available commands:".to_string());
        out.extend(lines);
        out.push("Indices are 1-based display positions; use #<id> for a stable id.".to_string());
        Ok(false)
    }
}

impl Command for Exit {
    fn name(&self) -> &'static str {
        "exit"
    }
    fn usage(&self) -> &'static str {
        "exit"
    }
    fn summary(&self) -> &'static str {
        "leave the tracker"
    }
    fn run(&self, tracker: &mut Tracker, _args: &[String]) -> Result<bool> {
        tracker.request_exit();
        Ok(false)
    }
}
