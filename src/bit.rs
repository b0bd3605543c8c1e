//! Bit-length helpers used for cheap allocation size checks.

/// The number of bits required to represent `n`, `0` for `n == 0`.
pub const fn bit_len(n: usize) -> u32 {
    usize::BITS - n.leading_zeros()
}

/// Returns if `a * b` _might_ overflow a `usize`.
///
/// This does not perform the multiplication; it sums the bit lengths of the operands and rejects
/// anything that reaches the word width. The estimate is conservative: every overflowing product
/// is rejected, along with some products that would fit (such as `2^31 * 2^31` on 64-bit).
///
/// # Example
/// ```rust
/// # use geomalgo::*;
/// assert!(!mul_overflows(1000, 1000));
/// assert!(mul_overflows(usize::MAX, 2));
/// ```
pub const fn mul_overflows(a: usize, b: usize) -> bool {
    bit_len(a) + bit_len(b) >= usize::BITS
}

pub const fn is_power_of_two(n: usize) -> bool {
    n != 0 && n & (n - 1) == 0
}
