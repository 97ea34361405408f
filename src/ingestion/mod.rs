//! Case-file loading.
//!
//! A case file is a plain-text evidence bundle: the two unknown sequences on
//! the first two lines, a person count on the third, then whitespace
//! separated person records (first name, last name, motif count, and that
//! many motif/expected-count pairs). Record tokens may wrap across lines.
//!
//! Parsing fails fast on malformed input so a store is never left partially
//! built; tokens past the final record are ignored.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

use crate::models::{Profile, StrMotif};
use crate::store::ProfileStore;

/// Parsed contents of a case file.
#[derive(Debug, Clone)]
pub struct CaseFile {
    pub first_sequence: String,
    pub second_sequence: String,
    pub people: Vec<PersonRecord>,
}

/// One person's database record before insertion, keyed "Last, First".
#[derive(Debug, Clone)]
pub struct PersonRecord {
    pub full_name: String,
    pub motifs: Vec<StrMotif>,
}

/// Counters describing a completed load.
#[derive(Debug, Clone, Default)]
pub struct LoadSummary {
    pub people: usize,
    pub duplicates_ignored: usize,
}

pub fn read_case_file<P: AsRef<Path>>(path: P) -> Result<CaseFile> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read case file {}", path.display()))?;
    parse_case_file(&data).with_context(|| format!("Malformed case file {}", path.display()))
}

pub fn parse_case_file(input: &str) -> Result<CaseFile> {
    let mut lines = input.lines();
    let first_sequence = lines
        .next()
        .context("Missing first unknown sequence")?
        .trim()
        .to_string();
    let second_sequence = lines
        .next()
        .context("Missing second unknown sequence")?
        .trim()
        .to_string();
    let count_line = lines.next().context("Missing person count")?.trim();
    let person_count: usize = count_line
        .parse()
        .with_context(|| format!("Invalid person count {count_line:?}"))?;

    let mut tokens = lines.flat_map(|line| line.split_whitespace());
    let mut people = Vec::with_capacity(person_count);
    for index in 0..person_count {
        people.push(parse_person(&mut tokens, index + 1)?);
    }

    Ok(CaseFile {
        first_sequence,
        second_sequence,
        people,
    })
}

fn parse_person<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    person: usize,
) -> Result<PersonRecord> {
    let first = tokens
        .next()
        .with_context(|| format!("Person {person}: missing first name"))?;
    let last = tokens
        .next()
        .with_context(|| format!("Person {person}: missing last name"))?;
    let full_name = format!("{last}, {first}");

    let motif_count: usize = tokens
        .next()
        .with_context(|| format!("Person {person}: missing STR count"))?
        .parse()
        .with_context(|| format!("Person {person}: invalid STR count"))?;

    let mut motifs = Vec::with_capacity(motif_count);
    for _ in 0..motif_count {
        let motif = tokens
            .next()
            .with_context(|| format!("Person {person}: missing STR motif"))?;
        let expected: u32 = tokens
            .next()
            .with_context(|| format!("Person {person}: missing occurrence count for {motif}"))?
            .parse()
            .with_context(|| format!("Person {person}: invalid occurrence count for {motif}"))?;
        motifs.push(StrMotif::new(motif, expected));
    }

    Ok(PersonRecord { full_name, motifs })
}

/// Builds the in-memory store from a parsed case file by repeated insertion.
/// Duplicate names are counted but otherwise silently ignored, matching the
/// store's insert semantics.
pub fn load_store(case_file: &CaseFile) -> (ProfileStore, LoadSummary) {
    let mut store = ProfileStore::new();
    store.set_unknown_sequences(&case_file.first_sequence, &case_file.second_sequence);
    let mut summary = LoadSummary::default();
    for person in &case_file.people {
        if store.contains(&person.full_name) {
            summary.duplicates_ignored += 1;
            continue;
        }
        store.insert(person.full_name.clone(), Profile::new(person.motifs.clone()));
        summary.people += 1;
    }
    (store, summary)
}

/// SHA-256 digest of a case file, recorded in reports for provenance.
pub fn hash_case_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let mut file = File::open(path)
        .with_context(|| format!("Unable to open {} for hashing", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buf = [0_u8; 8192];
    loop {
        let read = file.read(&mut buf)?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}
