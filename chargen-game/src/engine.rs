//! Seeded random engine exposing the primitives every generator layer uses.
//!
//! One engine is owned by exactly one generation run. All randomness in the
//! trait pipeline flows through it, so a (rules, seed) pair always replays the
//! same sequence of draws.

use log::warn;
use num_traits::ToPrimitive;
use rand::seq::{SliceRandom, index};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::constants::{DIE_SIDES, MAX_POOL_DICE, SUCCESS_THRESHOLD};
use crate::error::{ChargenError, Result};
use crate::numbers::to_i64_saturating;
use crate::seed::{ENGINE_STREAM, Seed};

/// Counting wrapper for an RNG stream providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl<R: RngCore> CountingRng<R> {
    pub const fn new(rng: R) -> Self {
        Self { rng, draws: 0 }
    }

    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: RngCore> RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

/// Deterministic source of every random decision in a generation run.
#[derive(Debug, Clone)]
pub struct DiceEngine {
    rng: CountingRng<ChaCha20Rng>,
}

impl DiceEngine {
    /// Engine for the trait stream of a caller-supplied seed.
    #[must_use]
    pub fn from_seed(seed: &Seed) -> Self {
        Self::from_stream_seed(seed.stream(ENGINE_STREAM))
    }

    /// Engine over an already-derived 64-bit stream seed.
    #[must_use]
    pub fn from_stream_seed(stream_seed: u64) -> Self {
        Self {
            rng: CountingRng::new(ChaCha20Rng::seed_from_u64(stream_seed)),
        }
    }

    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.rng.draws()
    }

    /// Pick one element uniformly.
    ///
    /// # Errors
    ///
    /// Returns [`ChargenError::EmptySequence`] when `seq` is empty.
    pub fn choice<'a, T>(&mut self, seq: &'a [T]) -> Result<&'a T> {
        seq.choose(&mut self.rng).ok_or(ChargenError::EmptySequence)
    }

    /// Pick `k` distinct elements, in random order.
    ///
    /// # Errors
    ///
    /// Returns [`ChargenError::InsufficientSize`] when `k` exceeds `seq.len()`.
    pub fn sample<T: Clone>(&mut self, seq: &[T], k: usize) -> Result<Vec<T>> {
        if k > seq.len() {
            return Err(ChargenError::InsufficientSize {
                requested: k,
                available: seq.len(),
            });
        }
        Ok(index::sample(&mut self.rng, seq.len(), k)
            .into_iter()
            .map(|i| seq[i].clone())
            .collect())
    }

    /// A reordered copy of `seq`; the input is left untouched.
    pub fn shuffled<T: Clone>(&mut self, seq: &[T]) -> Vec<T> {
        index::sample(&mut self.rng, seq.len(), seq.len())
            .into_iter()
            .map(|i| seq[i].clone())
            .collect()
    }

    /// Uniform integer in `low..=high`.
    ///
    /// # Errors
    ///
    /// Returns [`ChargenError::InvalidRange`] when `low > high`.
    pub fn bounded_int(&mut self, low: i64, high: i64) -> Result<i64> {
        if low > high {
            return Err(ChargenError::InvalidRange { low, high });
        }
        Ok(self.rng.gen_range(low..=high))
    }

    /// Uniform index in `0..len`; callers guarantee `len > 0`.
    pub(crate) fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    pub fn flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    /// True with `percent` chance.
    ///
    /// # Errors
    ///
    /// Returns [`ChargenError::InvalidRange`] when `percent` exceeds 100.
    pub fn chance(&mut self, percent: u8) -> Result<bool> {
        if percent > 100 {
            return Err(ChargenError::InvalidRange {
                low: 0,
                high: i64::from(percent),
            });
        }
        Ok(self.rng.gen_range(1..=100) <= percent)
    }

    /// Redraw uniformly until a pick is at or below `ceiling`.
    ///
    /// Impossibility is detected before any draw so the loop always ends.
    ///
    /// # Errors
    ///
    /// Returns [`ChargenError::EmptySequence`] for an empty `seq` and
    /// [`ChargenError::ImpossibleChoice`] when every element exceeds `ceiling`.
    pub fn choice_under<T>(&mut self, seq: &[T], ceiling: T) -> Result<T>
    where
        T: Copy + PartialOrd + ToPrimitive,
    {
        if seq.is_empty() {
            return Err(ChargenError::EmptySequence);
        }
        if seq.iter().all(|candidate| *candidate > ceiling) {
            return Err(ChargenError::ImpossibleChoice {
                ceiling: to_i64_saturating(ceiling),
            });
        }
        loop {
            let pick = seq[self.index(seq.len())];
            if pick <= ceiling {
                return Ok(pick);
            }
        }
    }

    /// Roll a pool of ten-sided dice and count successes.
    ///
    /// Results of [`SUCCESS_THRESHOLD`] or more succeed; each result found in
    /// `explode_on` adds one more die to the pool. At most
    /// [`MAX_POOL_DICE`] dice are rolled in total.
    pub fn roll_pool(&mut self, dice: u32, explode_on: &[u8]) -> u32 {
        let mut pending = dice;
        let mut rolled = 0_u32;
        let mut successes = 0_u32;
        while pending > 0 {
            if rolled >= MAX_POOL_DICE {
                warn!("dice pool stopped after {MAX_POOL_DICE} dice; explosion set {explode_on:?}");
                break;
            }
            pending -= 1;
            rolled += 1;
            let face = self.rng.gen_range(1..=DIE_SIDES);
            if face >= SUCCESS_THRESHOLD {
                successes += 1;
            }
            if explode_on.contains(&face) {
                pending = pending.saturating_add(1);
            }
        }
        successes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TEN_AGAIN;

    fn engine() -> DiceEngine {
        DiceEngine::from_stream_seed(0x00C0_FFEE)
    }

    #[test]
    fn same_stream_seed_replays_draws() {
        let mut a = engine();
        let mut b = engine();
        let left: Vec<i64> = (0..32).map(|_| a.bounded_int(1, 100).unwrap()).collect();
        let right: Vec<i64> = (0..32).map(|_| b.bounded_int(1, 100).unwrap()).collect();
        assert_eq!(left, right);
        assert_eq!(a.draws(), b.draws());
        assert!(a.draws() >= 32);
    }

    #[test]
    fn choice_rejects_empty_sequences() {
        let empty: [u8; 0] = [];
        assert_eq!(engine().choice(&empty), Err(ChargenError::EmptySequence));
        assert_eq!(engine().choice(&[9]).copied(), Ok(9));
    }

    #[test]
    fn sample_returns_distinct_elements() {
        let mut engine = engine();
        let picked = engine.sample(&["a", "b", "c", "d"], 3).unwrap();
        assert_eq!(picked.len(), 3);
        let mut sorted = picked.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 3);
        assert_eq!(
            engine.sample(&[1, 2], 3),
            Err(ChargenError::InsufficientSize {
                requested: 3,
                available: 2
            })
        );
    }

    #[test]
    fn shuffled_keeps_every_element() {
        let source = [1, 2, 3, 4, 5, 6];
        let mut shuffled = engine().shuffled(&source);
        assert_eq!(shuffled.len(), source.len());
        shuffled.sort_unstable();
        assert_eq!(shuffled, source);
    }

    #[test]
    fn bounded_int_is_inclusive_and_validated() {
        let mut engine = engine();
        for _ in 0..200 {
            let n = engine.bounded_int(3, 4).unwrap();
            assert!((3..=4).contains(&n));
        }
        assert_eq!(engine.bounded_int(5, 5), Ok(5));
        assert!(matches!(
            engine.bounded_int(2, 1),
            Err(ChargenError::InvalidRange { low: 2, high: 1 })
        ));
    }

    #[test]
    fn chance_respects_extremes() {
        let mut engine = engine();
        for _ in 0..100 {
            assert!(!engine.chance(0).unwrap());
            assert!(engine.chance(100).unwrap());
        }
        assert!(engine.chance(101).is_err());
    }

    #[test]
    fn flip_produces_both_sides() {
        let mut engine = engine();
        let heads = (0..200).filter(|_| engine.flip()).count();
        assert!(heads > 0 && heads < 200);
    }

    #[test]
    fn choice_under_fails_fast_when_impossible() {
        let mut engine = engine();
        let before = engine.draws();
        assert_eq!(
            engine.choice_under(&[2_u8, 3, 5], 1),
            Err(ChargenError::ImpossibleChoice { ceiling: 1 })
        );
        assert_eq!(engine.draws(), before);
    }

    #[test]
    fn choice_under_never_exceeds_ceiling() {
        let mut engine = engine();
        for _ in 0..300 {
            let pick = engine.choice_under(&[1_u8, 2, 5], 4).unwrap();
            assert!(pick == 1 || pick == 2);
        }
    }

    #[test]
    fn empty_pool_rolls_nothing() {
        let mut engine = engine();
        assert_eq!(engine.roll_pool(0, &TEN_AGAIN), 0);
        assert_eq!(engine.draws(), 0);
    }

    #[test]
    fn pool_without_explosions_is_bounded_by_dice() {
        let mut engine = engine();
        for _ in 0..100 {
            assert!(engine.roll_pool(4, &[]) <= 4);
        }
    }

    #[test]
    fn degenerate_explosions_are_capped() {
        let every_face: Vec<u8> = (1..=10).collect();
        let successes = engine().roll_pool(1, &every_face);
        assert!(successes <= MAX_POOL_DICE);
        assert!(successes > 0);
    }
}
