//! Dot ratings clamped to `0..=limit`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::constants::DEFAULT_TRAIT_LIMIT;
use crate::error::{ChargenError, Result};

/// A trait rating that saturates at `0` and at its ceiling.
///
/// Arithmetic and comparisons against plain integers behave as if the value
/// were that integer, except that results never leave `0..=limit`. Two
/// ratings are equal when their values are; the ceiling does not take part.
#[derive(Debug, Clone, Copy)]
pub struct BoundedTrait {
    value: u8,
    limit: u8,
}

impl BoundedTrait {
    /// Rating with the default ceiling of five dots.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        let value = if value > DEFAULT_TRAIT_LIMIT {
            DEFAULT_TRAIT_LIMIT
        } else {
            value
        };
        Self {
            value,
            limit: DEFAULT_TRAIT_LIMIT,
        }
    }

    /// Rating with an explicit ceiling; the starting value is clamped to it.
    ///
    /// # Errors
    ///
    /// Returns [`ChargenError::InvalidLimit`] when `limit` is zero.
    pub fn with_limit(value: u8, limit: u8) -> Result<Self> {
        if limit == 0 {
            return Err(ChargenError::InvalidLimit { limit });
        }
        Ok(Self {
            value: value.min(limit),
            limit,
        })
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.value
    }

    #[must_use]
    pub const fn limit(self) -> u8 {
        self.limit
    }

    #[must_use]
    pub const fn is_maxed(self) -> bool {
        self.value >= self.limit
    }

    /// Same rating with its ceiling raised to at least `limit`.
    #[must_use]
    pub const fn widen(self, limit: u8) -> Self {
        Self {
            value: self.value,
            limit: if limit > self.limit { limit } else { self.limit },
        }
    }

    /// Add dots, stopping at the ceiling.
    #[must_use]
    pub const fn add_dots(self, dots: u8) -> Self {
        let sum = self.value.saturating_add(dots);
        Self {
            value: if sum > self.limit { self.limit } else { sum },
            limit: self.limit,
        }
    }

    /// Remove dots, stopping at zero.
    #[must_use]
    pub const fn remove_dots(self, dots: u8) -> Self {
        Self {
            value: self.value.saturating_sub(dots),
            limit: self.limit,
        }
    }
}

impl Default for BoundedTrait {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Display for BoundedTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<BoundedTrait> for u8 {
    fn from(value: BoundedTrait) -> Self {
        value.value
    }
}

impl Add<u8> for BoundedTrait {
    type Output = Self;

    fn add(self, rhs: u8) -> Self::Output {
        self.add_dots(rhs)
    }
}

impl Sub<u8> for BoundedTrait {
    type Output = Self;

    fn sub(self, rhs: u8) -> Self::Output {
        self.remove_dots(rhs)
    }
}

impl AddAssign<u8> for BoundedTrait {
    fn add_assign(&mut self, rhs: u8) {
        *self = *self + rhs;
    }
}

impl SubAssign<u8> for BoundedTrait {
    fn sub_assign(&mut self, rhs: u8) {
        *self = *self - rhs;
    }
}

impl PartialEq for BoundedTrait {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for BoundedTrait {}

impl Hash for BoundedTrait {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialEq<u8> for BoundedTrait {
    fn eq(&self, other: &u8) -> bool {
        self.value == *other
    }
}

impl PartialOrd<u8> for BoundedTrait {
    fn partial_cmp(&self, other: &u8) -> Option<Ordering> {
        Some(self.value.cmp(other))
    }
}

// Documents carry plain integers. A loaded rating gets the default ceiling (or
// its own value when higher); `CharacterDocument::from_json` restores the rest.
impl Serialize for BoundedTrait {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.value)
    }
}

impl<'de> Deserialize<'de> for BoundedTrait {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        Ok(Self {
            value,
            limit: value.max(DEFAULT_TRAIT_LIMIT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limit_is_five() {
        let rating = BoundedTrait::new(3);
        assert_eq!(rating.limit(), 5);
        assert_eq!(BoundedTrait::new(9), 5);
    }

    #[test]
    fn addition_saturates_at_limit() {
        let rating = BoundedTrait::new(4) + 3;
        assert_eq!(rating, 5);
        assert!(rating.is_maxed());

        let wide = BoundedTrait::with_limit(7, 10).unwrap() + 2;
        assert_eq!(wide.value(), 9);
    }

    #[test]
    fn subtraction_saturates_at_zero() {
        let mut rating = BoundedTrait::new(2);
        rating -= 5;
        assert_eq!(rating, 0);
        assert_eq!(rating.limit(), 5);
    }

    #[test]
    fn compares_like_an_integer() {
        let rating = BoundedTrait::new(3);
        assert!(rating > 2);
        assert!(rating <= 3);
        assert_eq!(u8::from(rating), 3);
    }

    #[test]
    fn zero_limit_is_rejected() {
        assert_eq!(
            BoundedTrait::with_limit(1, 0),
            Err(ChargenError::InvalidLimit { limit: 0 })
        );
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&BoundedTrait::new(4)).unwrap();
        assert_eq!(json, "4");
        let back: BoundedTrait = serde_json::from_str("8").unwrap();
        assert_eq!(back.value(), 8);
        assert_eq!(back.limit(), 8);
    }

    #[test]
    fn equality_ignores_the_ceiling() {
        let wide = BoundedTrait::with_limit(3, 10).unwrap();
        assert_eq!(wide, BoundedTrait::new(3));
        assert_ne!(wide, BoundedTrait::new(4));
    }

    #[test]
    fn widen_only_raises_the_ceiling() {
        let rating = BoundedTrait::new(4).widen(10);
        assert_eq!(rating.limit(), 10);
        assert_eq!((rating + 5).value(), 9);
        assert_eq!(rating.widen(6).limit(), 10);
    }
}
