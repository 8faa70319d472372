use anyhow::{Context, Result, bail};
use std::collections::HashSet;

/// Seed used when the command line names none.
pub const DEFAULT_SEED: u64 = 1337;

/// Largest range a single `a-b` token may expand to.
const MAX_RANGE_LEN: u64 = 10_000;

/// Resolve CLI seed tokens into a de-duplicated, ordered list.
///
/// Supports literal integers (negative values use their magnitude) and
/// inclusive ranges written `start-end` or `start..=end`.
///
/// # Errors
///
/// Returns an error for tokens that are neither numbers nor ranges, and for
/// ranges that run backwards or are too long.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seen = HashSet::new();
    let mut seeds = Vec::new();

    for token in tokens.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
        for seed in expand_token(token)? {
            if seen.insert(seed) {
                seeds.push(seed);
            }
        }
    }

    if seeds.is_empty() {
        seeds.push(DEFAULT_SEED);
    }
    Ok(seeds)
}

fn expand_token(token: &str) -> Result<Vec<u64>> {
    if let Ok(value) = token.parse::<u64>() {
        return Ok(vec![value]);
    }
    if let Ok(value) = token.parse::<i64>() {
        return Ok(vec![value.unsigned_abs()]);
    }

    let Some((start, end)) = token.split_once("..=").or_else(|| token.split_once('-')) else {
        bail!("Unrecognized seed token: {token}");
    };
    let start: u64 = start
        .parse()
        .with_context(|| format!("bad range start in {token}"))?;
    let end: u64 = end
        .parse()
        .with_context(|| format!("bad range end in {token}"))?;
    if end < start {
        bail!("Seed range {token} runs backwards");
    }
    if end - start >= MAX_RANGE_LEN {
        bail!("Seed range {token} is longer than {MAX_RANGE_LEN}");
    }
    Ok((start..=end).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn numbers_and_ranges_expand_in_order() {
        let seeds = resolve_seed_inputs(&tokens(&["7", "1-3", "2..=4", "-9"])).unwrap();
        assert_eq!(seeds, vec![7, 1, 2, 3, 4, 9]);
    }

    #[test]
    fn empty_input_uses_default_seed() {
        assert_eq!(resolve_seed_inputs(&tokens(&["", " "])).unwrap(), vec![DEFAULT_SEED]);
    }

    #[test]
    fn garbage_and_backwards_ranges_are_rejected() {
        assert!(resolve_seed_inputs(&tokens(&["banana"])).is_err());
        assert!(resolve_seed_inputs(&tokens(&["9-3"])).is_err());
        assert!(resolve_seed_inputs(&tokens(&["0-999999"])).is_err());
    }
}
