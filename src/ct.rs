//! Constant-time comparison utilities.
//!
//! Tag checks must not leak, through timing, how many leading bytes of a
//! forged tag were correct. Everything here folds the full input before
//! producing a result.

/// Constant-time equality.
///
/// Implementations must not introduce data-dependent branches or early
/// exits.
pub trait ConstantTimeEq {
    /// Returns `true` if `self == other`, in constant time.
    fn ct_eq(&self, other: &Self) -> bool;
}

impl ConstantTimeEq for [u8; 16] {
    /// All bytes are XORed and accumulated before the single comparison at
    /// the end, so the running time does not depend on where the first
    /// difference occurs.
    #[inline(always)]
    fn ct_eq(&self, other: &Self) -> bool {
        let diff = self
            .iter()
            .zip(other)
            .map(|(a, b)| a ^ b)
            .fold(0u8, |acc, v| acc | v);

        is_zero(diff) == 1
    }
}

/// Returns `1` if `x == 0`, `0` otherwise, without branching.
#[inline(always)]
fn is_zero(x: u8) -> u8 {
    (((x as u64).wrapping_sub(1)) >> 63) as u8
}

/// Returns an all-ones mask if `bit == 1` and all-zeros if `bit == 0`.
///
/// `bit` must be `0` or `1`.
#[inline(always)]
pub fn mask_from_bit(bit: u32) -> u32 {
    0u32.wrapping_sub(bit)
}

/// Selects `a` where `mask` is all-ones and `b` where it is all-zeros,
/// limb by limb.
#[inline(always)]
pub fn select_limbs(mask: u32, a: &[u32; 5], b: &[u32; 5]) -> [u32; 5] {
    let mut out = [0u32; 5];
    for ((o, x), y) in out.iter_mut().zip(a).zip(b) {
        *o = (*x & mask) | (*y & !mask);
    }
    out
}
