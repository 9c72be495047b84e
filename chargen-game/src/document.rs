//! The generated character document and its trait groups.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::hash::Hasher;
use twox_hash::XxHash64;

use crate::bounded::BoundedTrait;
use crate::constants::{ADVANTAGE_LIMIT, GROUP_ADVANTAGES};
use crate::seed::Seed;

/// Rating map for one trait category (Attributes, Skills, Merits, ...).
pub type DotMap = BTreeMap<String, BoundedTrait>;

/// Immutable provenance of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub rules: String,
    pub seed: Seed,
}

/// One trait category. Most categories rate named traits in dots; a few hold
/// labels (a chosen clan or path), label maps (virtue and vice) or lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitGroup {
    Dots(DotMap),
    Labels(BTreeMap<String, String>),
    List(Vec<String>),
    Label(String),
}

impl TraitGroup {
    #[must_use]
    pub const fn as_dots(&self) -> Option<&DotMap> {
        match self {
            Self::Dots(map) => Some(map),
            _ => None,
        }
    }

    pub const fn as_dots_mut(&mut self) -> Option<&mut DotMap> {
        match self {
            Self::Dots(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_label(&self) -> Option<&str> {
        match self {
            Self::Label(label) => Some(label),
            _ => None,
        }
    }
}

/// Output of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDocument {
    pub metadata: Metadata,
    pub names: SmallVec<[String; 1]>,
    pub traits: BTreeMap<String, TraitGroup>,
    #[serde(default)]
    pub hooks: Vec<serde_json::Value>,
}

impl CharacterDocument {
    /// Empty envelope for a rule system and seed.
    #[must_use]
    pub fn envelope(rules: &str, seed: Seed) -> Self {
        Self {
            metadata: Metadata {
                rules: rules.to_string(),
                seed,
            },
            names: SmallVec::new(),
            traits: BTreeMap::new(),
            hooks: Vec::new(),
        }
    }

    #[must_use]
    pub fn group(&self, name: &str) -> Option<&TraitGroup> {
        self.traits.get(name)
    }

    #[must_use]
    pub fn dots(&self, group: &str) -> Option<&DotMap> {
        self.traits.get(group).and_then(TraitGroup::as_dots)
    }

    /// Dot map for `group`, created empty when missing.
    ///
    /// A non-dot group of the same name is replaced.
    pub fn dots_mut(&mut self, group: &str) -> &mut DotMap {
        let entry = self
            .traits
            .entry(group.to_string())
            .or_insert_with(|| TraitGroup::Dots(DotMap::new()));
        if entry.as_dots().is_none() {
            *entry = TraitGroup::Dots(DotMap::new());
        }
        match entry {
            TraitGroup::Dots(map) => map,
            _ => unreachable!("entry was normalised to a dot map"),
        }
    }

    /// Rating of a single trait inside a dot group.
    #[must_use]
    pub fn rating(&self, group: &str, name: &str) -> Option<BoundedTrait> {
        self.dots(group).and_then(|map| map.get(name).copied())
    }

    /// Sum of every rating in a dot group; zero for missing groups.
    #[must_use]
    pub fn total_dots(&self, group: &str) -> u32 {
        self.dots(group).map_or(0, |map| {
            map.values().map(|rating| u32::from(rating.value())).sum()
        })
    }

    pub fn set_group(&mut self, name: &str, group: TraitGroup) {
        self.traits.insert(name.to_string(), group);
    }

    /// Add dots to a trait found by name in whichever dot group holds it.
    ///
    /// Returns `true` when exactly one group holds the trait and its rating
    /// changed; a missing, ambiguous or already-maxed trait is left alone.
    pub fn add_dots(&mut self, trait_name: &str, dots: u8) -> bool {
        let mut holders = self
            .traits
            .values_mut()
            .filter_map(TraitGroup::as_dots_mut)
            .filter_map(|map| map.get_mut(trait_name));
        let (Some(rating), None) = (holders.next(), holders.next()) else {
            return false;
        };
        let before = *rating;
        *rating += dots;
        *rating != before
    }

    /// Parse a document and restore the ceilings plain integers cannot carry.
    ///
    /// # Errors
    ///
    /// Returns an error when `json` is not a character document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut doc: Self = serde_json::from_str(json)?;
        let advantages = doc
            .traits
            .get_mut(GROUP_ADVANTAGES)
            .and_then(TraitGroup::as_dots_mut);
        for rating in advantages.into_iter().flat_map(|map| map.values_mut()) {
            *rating = rating.widen(ADVANTAGE_LIMIT);
        }
        Ok(doc)
    }

    /// Canonical JSON encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if a hook value cannot be serialized.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Stable digest of the canonical JSON encoding, for replay comparisons.
    ///
    /// # Panics
    ///
    /// Panics if the document cannot be encoded, which string-keyed maps of
    /// integers and JSON values never trigger.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let bytes = serde_json::to_vec(self).expect("documents hold only JSON-safe values");
        let mut hasher = XxHash64::with_seed(0);
        hasher.write(&bytes);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CharacterDocument {
        let mut doc = CharacterDocument::envelope("cod", Seed::from("abc"));
        doc.names.push("Ada Stone".to_string());
        let attrs = doc.dots_mut("Attributes");
        attrs.insert("Resolve".into(), BoundedTrait::new(2));
        attrs.insert("Composure".into(), BoundedTrait::new(5));
        doc.dots_mut("Skills")
            .insert("Occult".into(), BoundedTrait::new(1));
        doc.set_group("Path", TraitGroup::Label("Moros".into()));
        doc
    }

    #[test]
    fn serializes_with_expected_envelope() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["metadata"]["rules"], "cod");
        assert_eq!(value["metadata"]["seed"], "abc");
        assert_eq!(value["names"][0], "Ada Stone");
        assert_eq!(value["traits"]["Attributes"]["Resolve"], 2);
        assert_eq!(value["traits"]["Path"], "Moros");
        assert_eq!(value["hooks"], serde_json::json!([]));
    }

    #[test]
    fn round_trips_through_json() {
        let doc = sample();
        let json = doc.to_json_pretty().unwrap();
        let back = CharacterDocument::from_json(&json).unwrap();
        assert_eq!(back, doc);
        assert_eq!(back.fingerprint(), doc.fingerprint());
        assert_eq!(back.group("Path").and_then(TraitGroup::as_label), Some("Moros"));
    }

    #[test]
    fn loaded_advantages_keep_their_wide_ceiling() {
        let mut doc = sample();
        doc.dots_mut(GROUP_ADVANTAGES)
            .insert("Integrity".into(), BoundedTrait::with_limit(7, ADVANTAGE_LIMIT).unwrap());
        let mut back = CharacterDocument::from_json(&doc.to_json_pretty().unwrap()).unwrap();
        assert_eq!(back, doc);

        let integrity = back.rating(GROUP_ADVANTAGES, "Integrity").unwrap();
        assert_eq!(integrity.limit(), ADVANTAGE_LIMIT);
        assert!(back.add_dots("Integrity", 2));
        assert_eq!(
            back.rating(GROUP_ADVANTAGES, "Integrity").map(BoundedTrait::value),
            Some(9)
        );
        assert_eq!(back.rating("Attributes", "Resolve").unwrap().limit(), 5);
    }

    #[test]
    fn add_dots_finds_trait_across_groups() {
        let mut doc = sample();
        assert!(doc.add_dots("Occult", 1));
        assert_eq!(doc.rating("Skills", "Occult"), Some(BoundedTrait::new(2)));
        assert!(doc.add_dots("Resolve", 1));
        assert_eq!(doc.total_dots("Attributes"), 8);
    }

    #[test]
    fn add_dots_leaves_maxed_missing_and_ambiguous_traits() {
        let mut doc = sample();
        assert!(!doc.add_dots("Composure", 1));
        assert!(!doc.add_dots("Firearms", 1));
        doc.dots_mut("Merits")
            .insert("Occult".into(), BoundedTrait::new(1));
        assert!(!doc.add_dots("Occult", 1));
        assert_eq!(doc.rating("Skills", "Occult"), Some(BoundedTrait::new(1)));
    }

    #[test]
    fn fingerprint_tracks_content() {
        let a = sample();
        let mut b = sample();
        assert_eq!(a.fingerprint(), b.fingerprint());
        b.add_dots("Occult", 1);
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
