use crate::combatant::{Combatant, MoraleStatus, Status};
use crate::error::{Result, TrackerError};

/// A validated overwrite of one combatant field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Morale(i32),
    MinHp(i32),
    Stunned(bool),
    MoraleStatus(MoraleStatus),
    Status(Status),
}

type Validator = fn(&str) -> Result<Mutation>;

/// Property name → validator. Names match case-insensitively.
pub const PROPERTIES: &[(&str, Validator)] = &[
    ("morale", parse_morale),
    ("minHp", parse_min_hp),
    ("stunned", parse_stunned),
    ("moraleStatus", parse_morale_status),
    ("status", parse_status),
];

pub fn property_names() -> Vec<&'static str> {
    PROPERTIES.iter().map(|(name, _)| *name).collect()
}

/// Build the mutation for `property = value`, or explain why not.
pub fn parse_mutation(property: &str, value: &str) -> Result<Mutation> {
    let (_, validate) = PROPERTIES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(property))
        .ok_or_else(|| TrackerError::unknown("property", property, &property_names()))?;
    validate(value.trim())
}

fn parse_int(what: &'static str, value: &str) -> Result<i32> {
    value.parse().map_err(|_| TrackerError::InvalidNumber {
        what,
        value: value.to_string(),
    })
}

fn literal<T: Copy>(property: &'static str, value: &str, table: &[(&str, T)]) -> Result<T> {
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(value))
        .map(|(_, v)| *v)
        .ok_or_else(|| TrackerError::InvalidLiteral {
            property,
            value: value.to_string(),
            expected: table
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
                .join(", "),
        })
}

fn parse_morale(value: &str) -> Result<Mutation> {
    parse_int("morale", value).map(Mutation::Morale)
}

fn parse_min_hp(value: &str) -> Result<Mutation> {
    parse_int("minHp", value).map(Mutation::MinHp)
}

fn parse_stunned(value: &str) -> Result<Mutation> {
    literal("stunned", value, &[("true", true), ("false", false)]).map(Mutation::Stunned)
}

fn parse_morale_status(value: &str) -> Result<Mutation> {
    literal(
        "moraleStatus",
        value,
        &[
            ("normal", MoraleStatus::Normal),
            ("panicked", MoraleStatus::Panicked),
            ("routed", MoraleStatus::Routed),
        ],
    )
    .map(Mutation::MoraleStatus)
}

fn parse_status(value: &str) -> Result<Mutation> {
    literal(
        "status",
        value,
        &[("alive", Status::Alive), ("defeated", Status::Defeated)],
    )
    .map(Mutation::Status)
}

impl Mutation {
    pub fn property(self) -> &'static str {
        match self {
            Mutation::Morale(_) => "morale",
            Mutation::MinHp(_) => "minHp",
            Mutation::Stunned(_) => "stunned",
            Mutation::MoraleStatus(_) => "moraleStatus",
            Mutation::Status(_) => "status",
        }
    }

    /// Write the field and return its old and new values for the log.
    pub fn apply(self, c: &mut Combatant) -> (String, String) {
        match self {
            Mutation::Morale(v) => {
                let before = c.morale();
                c.set_morale(v);
                (before.to_string(), c.morale().to_string())
            }
            Mutation::MinHp(v) => {
                let before = c.min_hp;
                c.min_hp = v;
                (before.to_string(), v.to_string())
            }
            Mutation::Stunned(v) => {
                let before = c.stunned;
                c.stunned = v;
                (before.to_string(), v.to_string())
            }
            Mutation::MoraleStatus(v) => {
                let before = c.morale_status;
                c.morale_status = v;
                (format!("{:?}", before), format!("{:?}", v))
            }
            Mutation::Status(v) => {
                let before = c.status;
                c.status = v;
                (format!("{:?}", before), format!("{:?}", v))
            }
        }
    }
}
