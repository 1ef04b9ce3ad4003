//! The command table.
//!
//! Every command is a unit struct implementing [`Command`]. The tracker
//! builds its lookup table once from [`COMMANDS`], filtered by the config's
//! allow-list.

mod handlers;
mod tokenize;

pub use handlers::*;
pub use tokenize::tokenize;

use crate::error::{Result, TrackerError};
use crate::tracker::Tracker;

pub trait Command: Sync {
    fn name(&self) -> &'static str;
    fn usage(&self) -> &'static str;
    fn summary(&self) -> &'static str;
    /// Validate `args`, mutate the tracker and say whether the roster view
    /// should be redrawn.
    fn run(&self, tracker: &mut Tracker, args: &[String]) -> Result<bool>;
}

pub static COMMANDS: &[&dyn Command] = &[
    &Add, &Damage, &Combat, &Check, &Rally, &Unstun, &Set, &Remove, &Clear, &Reset, &Xp, &Roll,
    &List, &Help, &Exit,
];

/// Commands that stay enabled whatever the config says.
pub const ALWAYS_ENABLED: [&str; 2] = ["help", "exit"];

/// Check the argument count against `min..=max`.
pub(crate) fn arity<'a>(
    cmd: &dyn Command,
    args: &'a [String],
    min: usize,
    max: usize,
) -> Result<&'a [String]> {
    if args.len() < min || args.len() > max {
        return Err(TrackerError::Usage(cmd.usage()));
    }
    Ok(args)
}

/// Damage amounts are whole numbers; a negative amount heals.
pub(crate) fn parse_amount(value: &str) -> Result<i32> {
    value.trim().parse::<i32>().map_err(|_| TrackerError::InvalidNumber {
        what: "amount",
        value: value.to_string(),
    })
}
