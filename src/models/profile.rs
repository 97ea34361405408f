use serde::{Deserialize, Serialize};

/// A short tandem repeat motif together with its expected occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrMotif {
    pub motif: String,
    pub expected: u32,
}

impl StrMotif {
    pub fn new(motif: impl Into<String>, expected: u32) -> Self {
        Self {
            motif: motif.into(),
            expected,
        }
    }
}

/// DNA profile for one person: the STR motifs in file order plus the
/// interest flag set during evidence scans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub motifs: Vec<StrMotif>,
    #[serde(default)]
    pub of_interest: bool,
}

impl Profile {
    pub fn new(motifs: Vec<StrMotif>) -> Self {
        Self {
            motifs,
            of_interest: false,
        }
    }
}
