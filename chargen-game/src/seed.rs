//! Caller-supplied seeds and the deterministic RNG streams derived from them.
//!
//! A seed is echoed back verbatim in the document metadata. Generation never
//! consumes it directly: each concern (trait engine, name source) gets its own
//! 64-bit stream seed, domain-separated with HMAC-SHA256 over the seed's
//! canonical string form.

use hmac::{Hmac, Mac};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;

/// Domain tag for the trait-generation stream.
pub const ENGINE_STREAM: &[u8] = b"engine";
/// Domain tag for the name-generation stream.
pub const NAMES_STREAM: &[u8] = b"names";

const TOKEN_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
const TOKEN_LENGTH: usize = 22;

/// Opaque seed as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    Number(i64),
    Text(String),
}

impl Seed {
    /// Interpret a CLI or URL token: integers in canonical form become numeric
    /// seeds, anything else (including `007` or `+5`) is kept as text.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token.parse::<i64>() {
            Ok(n) if n.to_string() == token => Self::Number(n),
            _ => Self::Text(token.to_string()),
        }
    }

    /// Canonical key material; `42` and `"42"` share a key.
    #[must_use]
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Derive the 64-bit seed for one generation stream.
    #[must_use]
    pub fn stream(&self, domain_tag: &[u8]) -> u64 {
        derive_stream_seed(self.key().as_bytes(), domain_tag)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Seed {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Seed {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Seed {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

fn derive_stream_seed(key: &[u8], domain_tag: &[u8]) -> u64 {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0_u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}

/// Produce a fresh URL-safe seed token for callers that did not supply one.
#[must_use]
pub fn fresh_seed() -> Seed {
    let mut rng = rand::thread_rng();
    let token: String = (0..TOKEN_LENGTH)
        .map(|_| char::from(TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())]))
        .collect();
    Seed::Text(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_tokens_parse_as_numbers() {
        assert_eq!(Seed::parse("1337"), Seed::Number(1337));
        assert_eq!(Seed::parse("-4"), Seed::Number(-4));
        assert_eq!(Seed::parse("abc"), Seed::Text("abc".into()));
    }

    #[test]
    fn non_canonical_integers_stay_textual() {
        for token in ["007", "+5", "-0"] {
            assert_eq!(Seed::parse(token), Seed::Text(token.into()));
        }
        assert_ne!(
            Seed::parse("007").stream(ENGINE_STREAM),
            Seed::parse("7").stream(ENGINE_STREAM)
        );
        assert_ne!(
            Seed::parse("+5").stream(ENGINE_STREAM),
            Seed::parse("5").stream(ENGINE_STREAM)
        );
        assert_eq!(serde_json::to_string(&Seed::parse("007")).unwrap(), "\"007\"");
    }

    #[test]
    fn numbers_and_their_text_share_streams() {
        let text = Seed::from("42");
        let number = Seed::from(42_i64);
        assert_eq!(text.stream(ENGINE_STREAM), number.stream(ENGINE_STREAM));
        assert_ne!(text, number);
    }

    #[test]
    fn streams_are_domain_separated() {
        let seed = Seed::from("helloworld");
        assert_ne!(seed.stream(ENGINE_STREAM), seed.stream(NAMES_STREAM));
        assert_eq!(seed.stream(ENGINE_STREAM), seed.stream(ENGINE_STREAM));
    }

    #[test]
    fn seeds_serialize_as_supplied() {
        assert_eq!(serde_json::to_string(&Seed::from("abc")).unwrap(), "\"abc\"");
        assert_eq!(serde_json::to_string(&Seed::from(7_i64)).unwrap(), "7");
        let back: Seed = serde_json::from_str("7").unwrap();
        assert_eq!(back, Seed::Number(7));
    }

    #[test]
    fn fresh_seeds_are_url_safe() {
        let Seed::Text(token) = fresh_seed() else {
            panic!("fresh seeds are textual");
        };
        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(
            token
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        );
    }
}
