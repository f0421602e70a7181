//! Synthetic node labels
//!
//! Every nested record without a key of its own becomes a blank node whose
//! label is `<ROLE>_<suffix>`. Labels only need to be unique within a run.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::fmt;

/// Alphabet without look-alike characters (no 0/O, 1/I/l)
pub const SHORT_ID_ALPHABET: &[u8] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Suffix length of generated labels
pub const SHORT_ID_LEN: usize = 5;

/// What a synthetic node stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntheticRole {
    Overlay,
    Similar,
    LdcType,
    LdcArgument,
    Argument,
    Constraint,
    RelatedQnode,
}

impl SyntheticRole {
    pub fn tag(&self) -> &'static str {
        match self {
            SyntheticRole::Overlay => "OVERLAY",
            SyntheticRole::Similar => "SIMILAR",
            SyntheticRole::LdcType => "LDCTYPE",
            SyntheticRole::LdcArgument => "LDCARG",
            SyntheticRole::Argument => "ARG",
            SyntheticRole::Constraint => "CONSTRAINT",
            SyntheticRole::RelatedQnode => "WDNODE",
        }
    }
}

impl fmt::Display for SyntheticRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Source of synthetic node labels
pub trait IdGenerator {
    /// Next label for a node of the given role; never repeats within a run
    fn next_label(&mut self, role: SyntheticRole) -> String;
}

/// Random short labels, e.g. `OVERLAY_x7Hq2`
pub struct ShortIdGenerator {
    rng: StdRng,
    issued: HashSet<String>,
}

impl ShortIdGenerator {
    /// Generator seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            issued: HashSet::new(),
        }
    }

    /// Generator with a fixed seed, reproducible across runs
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            issued: HashSet::new(),
        }
    }

    fn suffix(&mut self) -> String {
        (0..SHORT_ID_LEN)
            .map(|_| SHORT_ID_ALPHABET[self.rng.gen_range(0..SHORT_ID_ALPHABET.len())] as char)
            .collect()
    }
}

impl Default for ShortIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for ShortIdGenerator {
    fn next_label(&mut self, role: SyntheticRole) -> String {
        loop {
            let label = format!("{}_{}", role.tag(), self.suffix());
            if self.issued.insert(label.clone()) {
                return label;
            }
        }
    }
}

/// Counter-based labels, e.g. `OVERLAY_1`, `SIMILAR_2`
///
/// One counter is shared by all roles.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_label(&mut self, role: SyntheticRole) -> String {
        self.next += 1;
        format!("{}_{}", role.tag(), self.next)
    }
}
