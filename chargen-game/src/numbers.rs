//! Numeric conversion helpers centralizing saturating casts between the
//! widths used for dot counts, slot counts and dice pools.

use num_traits::ToPrimitive;
use num_traits::cast::cast;

/// Convert a slot or key count to `u32`, saturating at `u32::MAX`.
#[must_use]
pub fn usize_to_u32(value: usize) -> u32 {
    cast::<usize, u32>(value).unwrap_or(u32::MAX)
}

/// Narrow a dot count to `u8`, saturating at `u8::MAX`.
#[must_use]
pub fn u32_to_u8(value: u32) -> u8 {
    cast::<u32, u8>(value).unwrap_or(u8::MAX)
}

/// Widen any primitive integer to `i64` for error reporting, saturating on overflow.
#[must_use]
pub fn to_i64_saturating<T: ToPrimitive>(value: T) -> i64 {
    value.to_i64().unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrowing_saturates() {
        assert_eq!(u32_to_u8(7), 7);
        assert_eq!(u32_to_u8(300), u8::MAX);
        assert_eq!(usize_to_u32(24), 24);
    }

    #[test]
    fn widening_handles_unsigned_overflow() {
        assert_eq!(to_i64_saturating(5_u8), 5);
        assert_eq!(to_i64_saturating(u64::MAX), i64::MAX);
    }
}
