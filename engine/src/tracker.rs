use std::panic::{AssertUnwindSafe, catch_unwind};

use indexmap::IndexMap;

use crate::command::{ALWAYS_ENABLED, COMMANDS, Command, tokenize};
use crate::config::{RosterEntry, TrackerConfig};
use crate::dice::Dice;
use crate::error::Result;
use crate::registry::{Registry, Snapshot};

/// One running session: the roster, the dice, the command table and the
/// log lines produced since the last `take_output`.
pub struct Tracker {
    registry: Registry,
    dice: Dice,
    commands: IndexMap<&'static str, &'static dyn Command>,
    output: Vec<String>,
    exit_requested: bool,
}

impl Tracker {
    /// A tracker with an empty roster. Dice are seeded from the config when
    /// it carries a seed.
    pub fn new(config: &TrackerConfig) -> Self {
        let dice = match config.seed {
            Some(seed) => Dice::from_seed(seed),
            None => Dice::from_entropy(),
        };
        Self::with_dice(config, dice)
    }

    pub fn with_dice(config: &TrackerConfig, dice: Dice) -> Self {
        let commands = build_table(config.commands.as_deref());
        Self {
            registry: Registry::new(config.rules),
            dice,
            commands,
            output: Vec::new(),
            exit_requested: false,
        }
    }

    /// `new` plus the config's starting roster.
    pub fn from_config(config: &TrackerConfig) -> Result<Self> {
        let mut tracker = Self::new(config);
        tracker.load_roster(&config.roster)?;
        Ok(tracker)
    }

    /// Add every entry through the normal naming and dice pipeline. Stops at
    /// the first entry that fails.
    pub fn load_roster(&mut self, entries: &[RosterEntry]) -> Result<usize> {
        for entry in entries {
            let morale = entry.morale.map(|m| m.to_string());
            let (registry, dice, out) = self.parts();
            registry.add(
                dice,
                entry.kind,
                &entry.name,
                &entry.hp,
                morale.as_deref(),
                |line| out.push(line),
            )?;
        }
        Ok(entries.len())
    }

    /// Run one input line. Returns whether the roster view should refresh.
    /// Every failure ends up in the output buffer; nothing escapes.
    pub fn exec(&mut self, line: &str) -> bool {
        let tokens = match tokenize(line) {
            Ok(tokens) => tokens,
            Err(e) => {
                self.output.push(format!("Error: {}", e));
                return false;
            }
        };
        let Some((name, args)) = tokens.split_first() else {
            return false;
        };
        let Some(command) = self.commands.get(name.as_str()).copied() else {
            tracing::debug!(command = %name, "unknown command");
            self.output.push(format!("Unknown command: {}", name));
            return false;
        };

        self.dispatch(command, args)
    }

    /// Run one handler. Errors and panics both become an `Error:` line with
    /// no refresh; the roster is left as the handler left it.
    fn dispatch(&mut self, command: &dyn Command, args: &[String]) -> bool {
        let name = command.name();
        tracing::debug!(command = name, ?args, "dispatch");
        match catch_unwind(AssertUnwindSafe(|| command.run(self, args))) {
            Ok(Ok(refresh)) => {
                if refresh {
                    self.registry.recompute_xp();
                }
                refresh
            }
            Ok(Err(e)) => {
                tracing::debug!(command = name, error = %e, "command rejected");
                self.output.push(format!("Error: {}", e));
                false
            }
            Err(_) => {
                tracing::error!(command = name, "command panicked");
                self.output
                    .push(format!("Error: unexpected failure in '{}'", name));
                false
            }
        }
    }

    /// Drain the log lines produced so far.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn dice_mut(&mut self) -> &mut Dice {
        &mut self.dice
    }

    pub fn snapshot(&self) -> Snapshot {
        self.registry.snapshot()
    }

    /// Enabled commands in table order.
    pub fn commands(&self) -> impl Iterator<Item = &'static dyn Command> + '_ {
        self.commands.values().copied()
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub(crate) fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub(crate) fn parts(&mut self) -> (&mut Registry, &mut Dice, &mut Vec<String>) {
        (&mut self.registry, &mut self.dice, &mut self.output)
    }
}

fn build_table(allow: Option<&[String]>) -> IndexMap<&'static str, &'static dyn Command> {
    if let Some(allow) = allow {
        for name in allow {
            if !COMMANDS.iter().any(|c| c.name() == name) {
                tracing::warn!(command = %name, "config enables an unknown command");
            }
        }
    }
    COMMANDS
        .iter()
        .copied()
        .filter(|c| match allow {
            None => true,
            Some(allow) => {
                ALWAYS_ENABLED.contains(&c.name()) || allow.iter().any(|a| a == c.name())
            }
        })
        .map(|c| (c.name(), c))
        .collect()
}
