//! Full-name generation for character envelopes.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::seed::{NAMES_STREAM, Seed};

// Kept as simple static slices; a richer generator can implement `NameSource`.
static GIVEN_NAMES: &[&str] = &[
    "Adrian", "Alice", "Amara", "Beatrice", "Caleb", "Camille", "Daniel", "Delia", "Elena",
    "Elliot", "Farah", "Felix", "Gideon", "Greta", "Hannah", "Hugo", "Imogen", "Isaac", "Jasper",
    "Joan", "Julian", "Kara", "Leon", "Lucia", "Marcus", "Maya", "Miriam", "Nadia", "Nathan",
    "Noah", "Octavia", "Oscar", "Paloma", "Quentin", "Rosa", "Ruth", "Samuel", "Selene", "Silas",
    "Tessa", "Theo", "Ursula", "Victor", "Vivian", "Wesley", "Willa", "Xavier", "Yara", "Zoe",
];

static SURNAMES: &[&str] = &[
    "Abernathy", "Alvarez", "Blackwood", "Brennan", "Castellanos", "Crane", "Dalton", "Delacroix",
    "Ellison", "Esposito", "Fairchild", "Fitzgerald", "Garrow", "Grayson", "Hale", "Holloway",
    "Ingram", "Iverson", "Jankowski", "Kessler", "Kowalski", "Lachance", "Lindqvist", "Marlowe",
    "Moreau", "Nakamura", "Novak", "Okafor", "Oyelaran", "Pasternak", "Prescott", "Quinlan",
    "Ravenscroft", "Reyes", "Sandoval", "Sinclair", "Thorne", "Tran", "Underhill", "Vance",
    "Varga", "Whitlock", "Winters", "Yilmaz", "Zeller",
];

/// Supplier of full names for new characters.
pub trait NameSource {
    fn next_full_name(&mut self) -> String;
}

/// Deterministic name source fed by the seed's name stream.
#[derive(Debug, Clone)]
pub struct SeededNames {
    rng: ChaCha20Rng,
}

impl SeededNames {
    #[must_use]
    pub fn from_seed(seed: &Seed) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed.stream(NAMES_STREAM)),
        }
    }
}

impl NameSource for SeededNames {
    fn next_full_name(&mut self) -> String {
        let given = GIVEN_NAMES.choose(&mut self.rng).copied().unwrap_or("Jordan");
        let surname = SURNAMES.choose(&mut self.rng).copied().unwrap_or("Doe");
        format!("{given} {surname}")
    }
}

/// Name source that cycles through a fixed list; handy for fixtures.
#[derive(Debug, Clone)]
pub struct FixedNames {
    names: Vec<String>,
    next: usize,
}

impl FixedNames {
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            next: 0,
        }
    }
}

impl NameSource for FixedNames {
    fn next_full_name(&mut self) -> String {
        if self.names.is_empty() {
            return String::new();
        }
        let name = self.names[self.next % self.names.len()].clone();
        self.next = self.next.wrapping_add(1);
        name
    }
}
