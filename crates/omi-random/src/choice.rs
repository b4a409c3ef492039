//! Picking one of several user-supplied options.

use rand::Rng;
use rand::rngs::StdRng;

use crate::error::{RandomError, RandomResult};

/// Split raw input into options on whitespace and commas.
///
/// Both ASCII `,` and full-width `，` separate options; empty pieces are
/// dropped.
pub fn parse_options(input: &str) -> Vec<String> {
    input
        .split(|c: char| c.is_whitespace() || c == ',' || c == '，')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Pick one of `options` uniformly.
///
/// Blank options are ignored; at least two must remain.
pub fn pick_one<S: AsRef<str>>(options: &[S], rng: &mut StdRng) -> RandomResult<String> {
    let usable: Vec<&str> = options
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .collect();
    if usable.len() < 2 {
        return Err(RandomError::TooFewOptions(usable.len()));
    }
    Ok(usable[rng.random_range(0..usable.len())].to_string())
}
