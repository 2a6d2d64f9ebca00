use anyhow::{anyhow, Result};

use crate::model::timelog::{Location, Reason};

pub fn expand_key<'a>(key: &str, candidates: &[&'a str]) -> Result<&'a str> {
    let key = key.trim().to_lowercase();

    // 1. Exact match
    if let Some(exact) = candidates.iter().find(|&&c| c == key) {
        return Ok(*exact);
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(&key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0]),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Accepts any unambiguous prefix, e.g. `sick` or `vac`.
pub fn parse_reason(input: &str) -> Result<Reason> {
    let names: Vec<&str> = Reason::ALL.iter().map(Reason::as_str).collect();
    Ok(expand_key(input, &names)?.parse()?)
}

pub fn parse_location(input: &str) -> Result<Location> {
    let names: Vec<&str> = Location::ALL.iter().map(Location::as_str).collect();
    Ok(expand_key(input, &names)?.parse()?)
}
