use anyhow::{Result, bail};
use chargen_game::{Seed, fresh_seed};
use std::collections::HashSet;

/// Fallback seed when the caller supplies none.
pub const DEFAULT_SEED: i64 = 1337;

/// Resolve CLI seed tokens into seeds, in order and without duplicates.
///
/// Canonical integers become numeric seeds and other tokens are kept as text. The
/// keyword `random` expands to a fresh seed each time it appears.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<Seed>> {
    let mut seeds = Vec::new();
    let mut seen = HashSet::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }
        if token.chars().any(char::is_control) {
            bail!("Unrecognized seed token: {token:?}");
        }

        let seed = if token.eq_ignore_ascii_case("random") {
            fresh_seed()
        } else {
            Seed::parse(token)
        };
        if seen.insert(seed.clone()) {
            seeds.push(seed);
        }
    }

    if seeds.is_empty() {
        seeds.push(Seed::Number(DEFAULT_SEED));
    }
    Ok(seeds)
}

/// `count` fresh seeds for sweep iterations.
pub fn fresh_seeds(count: usize) -> Vec<Seed> {
    (0..count).map(|_| fresh_seed()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn parses_numbers_and_text() {
        let seeds = resolve_seed_inputs(&tokens(&["42", "abc", "-3"])).unwrap();
        assert_eq!(
            seeds,
            vec![Seed::Number(42), Seed::Text("abc".into()), Seed::Number(-3)]
        );
    }

    #[test]
    fn deduplicates_and_defaults() {
        let seeds = resolve_seed_inputs(&tokens(&["7", "7", ""])).unwrap();
        assert_eq!(seeds, vec![Seed::Number(7)]);
        let seeds = resolve_seed_inputs(&[]).unwrap();
        assert_eq!(seeds, vec![Seed::Number(DEFAULT_SEED)]);
    }

    #[test]
    fn padded_numbers_are_distinct_seeds() {
        let seeds = resolve_seed_inputs(&tokens(&["007", "7", "+7"])).unwrap();
        assert_eq!(
            seeds,
            vec![
                Seed::Text("007".into()),
                Seed::Number(7),
                Seed::Text("+7".into())
            ]
        );
    }

    #[test]
    fn random_keyword_expands_to_fresh_seeds() {
        let seeds = resolve_seed_inputs(&tokens(&["random", "RANDOM"])).unwrap();
        assert_eq!(seeds.len(), 2);
        assert!(seeds.iter().all(|s| matches!(s, Seed::Text(_))));
        assert_ne!(seeds[0], seeds[1]);
    }

    #[test]
    fn control_characters_are_rejected() {
        assert!(resolve_seed_inputs(&tokens(&["bad\nseed"])).is_err());
        assert_eq!(fresh_seeds(3).len(), 3);
    }
}
