use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

const MAX_COUNT: u32 = 1000;
const MAX_SIDES: u32 = 1000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiceError {
    #[error("empty expression")]
    Empty,
    #[error("cannot read '{term}' in '{expr}'")]
    Malformed { term: String, expr: String },
    #[error("dice must be between 1d1 and 1000d1000, got {0}d{1}")]
    OutOfRange(u32, u32),
    #[error("result of '{0}' does not fit in an integer")]
    Overflow(String),
}

/// Something that turns die notation into a number.
///
/// The tracker only ever talks to dice through this trait, so a table can
/// swap in physical rolls or a scripted sequence.
pub trait DiceResolver {
    /// Evaluate a full expression such as `2d6+3`.
    fn roll(&mut self, expr: &str) -> Result<i32, DiceError>;
    /// Roll a single die with `sides` faces.
    fn die(&mut self, sides: u32) -> i32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    Dice { count: u32, sides: u32 },
    Flat(i32),
}

/// A parsed `NdM [+-] ...` chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceExpr {
    terms: Vec<(i32, Term)>,
    source: String,
}

impl DiceExpr {
    pub fn parse(src: &str) -> Result<Self, DiceError> {
        let cleaned: String = src
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        if cleaned.is_empty() {
            return Err(DiceError::Empty);
        }

        let mut terms = Vec::new();
        let mut sign = 1;
        let mut start = 0;
        for (i, c) in cleaned.char_indices() {
            if c != '+' && c != '-' {
                continue;
            }
            if i == start {
                // only a leading sign may stand without a term before it
                if i != 0 {
                    return Err(malformed(&cleaned[i..], src));
                }
            } else {
                terms.push((sign, parse_term(&cleaned[start..i], src)?));
            }
            sign = if c == '-' { -1 } else { 1 };
            start = i + 1;
        }
        if start >= cleaned.len() {
            return Err(malformed(&cleaned, src));
        }
        terms.push((sign, parse_term(&cleaned[start..], src)?));

        Ok(Self {
            terms,
            source: src.trim().to_string(),
        })
    }

    pub fn terms(&self) -> impl Iterator<Item = (i32, Term)> + '_ {
        self.terms.iter().copied()
    }

    /// Evaluate with a per-die callback (`sides -> face`).
    pub fn eval(&self, mut die: impl FnMut(u32) -> i32) -> Result<i32, DiceError> {
        let mut total: i64 = 0;
        for (sign, term) in &self.terms {
            let value: i64 = match *term {
                Term::Flat(n) => n as i64,
                Term::Dice { count, sides } => (0..count).map(|_| die(sides) as i64).sum(),
            };
            total += *sign as i64 * value;
        }
        i32::try_from(total).map_err(|_| DiceError::Overflow(self.source.clone()))
    }
}

fn malformed(term: &str, expr: &str) -> DiceError {
    DiceError::Malformed {
        term: term.to_string(),
        expr: expr.to_string(),
    }
}

fn parse_term(term: &str, expr: &str) -> Result<Term, DiceError> {
    match term.split_once('d') {
        Some((count, sides)) => {
            let count: u32 = if count.is_empty() {
                1
            } else {
                count.parse().map_err(|_| malformed(term, expr))?
            };
            let sides: u32 = sides.parse().map_err(|_| malformed(term, expr))?;
            if count == 0 || sides == 0 || count > MAX_COUNT || sides > MAX_SIDES {
                return Err(DiceError::OutOfRange(count, sides));
            }
            Ok(Term::Dice { count, sides })
        }
        None => term
            .parse::<i32>()
            .map(Term::Flat)
            .map_err(|_| malformed(term, expr)),
    }
}

/// Seeded dice with optional queued results.
///
/// Queued totals answer the next `roll` calls (after the expression has been
/// validated), queued faces answer the next `die` calls. Once a queue runs
/// dry the RNG takes over.
pub struct Dice {
    rng: ChaCha8Rng,
    totals: VecDeque<i32>,
    faces: VecDeque<i32>,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            totals: VecDeque::new(),
            faces: VecDeque::new(),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            totals: VecDeque::new(),
            faces: VecDeque::new(),
        }
    }

    pub fn queue_totals(&mut self, totals: impl IntoIterator<Item = i32>) {
        self.totals.extend(totals);
    }

    pub fn queue_faces(&mut self, faces: impl IntoIterator<Item = i32>) {
        self.faces.extend(faces);
    }

    pub fn d6(&mut self) -> i32 {
        self.die(6)
    }
}

impl DiceResolver for Dice {
    fn roll(&mut self, expr: &str) -> Result<i32, DiceError> {
        let parsed = DiceExpr::parse(expr)?;
        if let Some(total) = self.totals.pop_front() {
            return Ok(total);
        }
        parsed.eval(|sides| self.die(sides))
    }

    fn die(&mut self, sides: u32) -> i32 {
        if let Some(face) = self.faces.pop_front() {
            return face;
        }
        self.rng.gen_range(1..=sides.max(1)) as i32
    }
}
