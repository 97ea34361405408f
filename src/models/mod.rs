pub mod profile;

pub use profile::{Profile, StrMotif};
