pub mod checks;
pub mod reports;
pub mod seeds;
pub mod tester;

pub use seeds::{fresh_seeds, resolve_seed_inputs};
pub use tester::*;
