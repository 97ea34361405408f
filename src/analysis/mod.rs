//! Matching of STR profiles against the unknown evidence sequences.

use serde::{Deserialize, Serialize};

use crate::models::{Profile, StrMotif};

/// Comparison between one motif's expected and observed occurrence counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotifMatch {
    pub motif: String,
    pub expected: u32,
    pub observed: u32,
    pub matched: bool,
}

/// Outcome of evaluating one profile against the evidence sequences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub matched: usize,
    pub required: usize,
    pub of_interest: bool,
    pub motifs: Vec<MotifMatch>,
}

/// Counts non-overlapping occurrences of `motif` in `sequence`.
///
/// Scanning is greedy left to right: each hit advances the cursor past the
/// matched region, so overlapping repeats are counted once. A motif longer
/// than the sequence (or empty, which the cursor could never step past)
/// occurs zero times.
pub fn occurrences(sequence: &str, motif: &str) -> usize {
    if motif.is_empty() || motif.len() > sequence.len() {
        return 0;
    }
    let mut count = 0;
    let mut rest = sequence;
    while let Some(pos) = rest.find(motif) {
        count += 1;
        rest = &rest[pos + motif.len()..];
    }
    count
}

/// Observed occurrences of one motif across both evidence sequences combined.
pub fn observed_occurrences(motif: &StrMotif, first: &str, second: &str) -> u32 {
    (occurrences(first, &motif.motif) + occurrences(second, &motif.motif)) as u32
}

/// Evaluates a profile against the evidence sequences.
///
/// A motif matches only when its combined observed count equals the expected
/// count exactly, never "at least". The profile is of interest when at least
/// half of its motifs, rounded up, match; a profile without motifs trivially
/// qualifies.
pub fn evaluate_profile(profile: &Profile, first: &str, second: &str) -> MatchOutcome {
    let required = profile.motifs.len().div_ceil(2);
    let motifs: Vec<MotifMatch> = profile
        .motifs
        .iter()
        .map(|motif| {
            let observed = observed_occurrences(motif, first, second);
            MotifMatch {
                motif: motif.motif.clone(),
                expected: motif.expected,
                observed,
                matched: observed == motif.expected,
            }
        })
        .collect();
    let matched = motifs.iter().filter(|m| m.matched).count();
    MatchOutcome {
        matched,
        required,
        of_interest: matched >= required,
        motifs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occurrences_are_counted_without_overlap() {
        assert_eq!(occurrences("AGAGGTCCGCGTA", "AGG"), 1);
        assert_eq!(occurrences("AAAA", "AA"), 2);
        assert_eq!(occurrences("AGATAGATAGAT", "AGAT"), 3);
    }

    #[test]
    fn occurrences_degenerate_inputs_count_zero() {
        assert_eq!(occurrences("ACG", "ACGT"), 0);
        assert_eq!(occurrences("ACGT", ""), 0);
        assert_eq!(occurrences("", "ACGT"), 0);
        assert_eq!(occurrences("ACGT", "TTT"), 0);
    }

    #[test]
    fn motif_requires_exact_count_not_at_least() {
        let profile = Profile::new(vec![StrMotif::new("AGG", 0)]);
        let outcome = evaluate_profile(&profile, "AGAGGTCCGCGTA", "GACACGTTTATG");
        assert_eq!(outcome.motifs[0].observed, 1);
        assert!(!outcome.motifs[0].matched);
        assert!(!outcome.of_interest);
    }

    #[test]
    fn half_of_motifs_rounded_up_must_match() {
        // Three motifs need two matches; one match is not enough.
        let profile = Profile::new(vec![
            StrMotif::new("AGAT", 3),
            StrMotif::new("TTTT", 9),
            StrMotif::new("GATA", 9),
        ]);
        let outcome = evaluate_profile(&profile, "AGATAGATAGAT", "");
        assert_eq!(outcome.required, 2);
        assert_eq!(outcome.matched, 1);
        assert!(!outcome.of_interest);

        let profile = Profile::new(vec![
            StrMotif::new("AGAT", 3),
            StrMotif::new("TTTT", 0),
            StrMotif::new("GATA", 9),
        ]);
        let outcome = evaluate_profile(&profile, "AGATAGATAGAT", "");
        assert_eq!(outcome.matched, 2);
        assert!(outcome.of_interest);
    }

    #[test]
    fn profile_without_motifs_trivially_qualifies() {
        let outcome = evaluate_profile(&Profile::new(Vec::new()), "ACGT", "ACGT");
        assert_eq!(outcome.required, 0);
        assert!(outcome.of_interest);
    }

    #[test]
    fn both_sequences_contribute_to_observed_count() {
        let motif = StrMotif::new("AGAT", 5);
        assert_eq!(observed_occurrences(&motif, "AGATAGATAGAT", "AGATAGAT"), 5);
    }
}
