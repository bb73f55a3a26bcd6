//! Poly1305 arithmetic over 32-bit limbs.
//!
//! Values modulo `p = 2^130 - 5` are held as five little-endian 32-bit
//! limbs (`Limbs`). Limbs 0..3 are full 32-bit words; limb 4 holds the
//! bits from 2^128 upwards and stays small.
//!
//! Between blocks the accumulator is only *partially* reduced: it is kept
//! below `2^131` (limb 4 below 8) rather than below `p`. Full reduction
//! happens once, in [`reduce`], when the tag is produced.
//!
//! Every product is formed in 64-bit arithmetic. The bounds that keep
//! those sums from overflowing all follow from key clamping:
//! `r[i] < 2^28` and `rr[i] < 5 * 2^26 < 2^29`.

use super::{BLOCK_SIZE, TAG_SIZE};
use crate::ct::{mask_from_bit, select_limbs};

/// A value modulo `2^130 - 5`, as five little-endian 32-bit limbs.
pub type Limbs = [u32; 5];

const LOW32: u64 = 0xffff_ffff;

/// Clamping masks for the four little-endian words of `r`.
///
/// The top four bits of every word and the bottom two bits of words 1..3
/// are forced to zero.
const CLAMP: [u32; 4] = [0x0fff_ffff, 0x0fff_fffc, 0x0fff_fffc, 0x0fff_fffc];

/// The clamped polynomial point `r` together with its fold factors.
///
/// `rr[i] = (r[i] >> 2) * 5`. Because the low two bits of `r[1..3]` are
/// clamped to zero, `r[i] * 2^128 = (r[i] >> 2) * 2^130`, which is
/// congruent to `rr[i]` modulo `p`. The multiplier uses `rr` to fold every
/// partial product that lands at or above `2^128` back into range.
///
/// Both arrays are fixed at construction and never change afterwards.
#[derive(Clone)]
pub struct ClampedKey {
    r: [u32; 4],
    rr: [u32; 4],
}

impl ClampedKey {
    /// Loads and clamps `r` from its 16-byte little-endian encoding.
    ///
    /// Clamping is unconditional and does not depend on the key value.
    pub fn from_bytes(bytes: &[u8; 16]) -> Self {
        let mut r = load_words(bytes);
        for (word, mask) in r.iter_mut().zip(CLAMP) {
            *word &= mask;
        }

        let rr = r.map(|word| (word >> 2) * 5);

        ClampedKey { r, rr }
    }

    /// The clamped words of `r`, least significant first.
    pub fn r(&self) -> &[u32; 4] {
        &self.r
    }

    /// The precomputed fold factors `(r[i] >> 2) * 5`.
    pub fn rr(&self) -> &[u32; 4] {
        &self.rr
    }

    pub(crate) fn wipe(&mut self) {
        self.r.iter_mut().for_each(|w| *w = 0);
        self.rr.iter_mut().for_each(|w| *w = 0);
    }
}

/// Splits 16 bytes into four little-endian 32-bit words.
pub fn load_words(bytes: &[u8; 16]) -> [u32; 4] {
    let mut words = [0u32; 4];
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    words
}

/// Loads the fixed term `s` as a 5-limb value whose top limb is zero.
pub fn load_fixed_term(bytes: &[u8; 16]) -> Limbs {
    let [s0, s1, s2, s3] = load_words(bytes);
    [s0, s1, s2, s3, 0]
}

/// Loads a message block of `0..=16` bytes as a padded 5-limb value.
///
/// The bytes are copied into a zeroed 17-byte scratch buffer and a single
/// `1` byte is written right after them. A full block therefore gets
/// `2^128` added (limb 4 = 1) and a partial block of `n` bytes gets
/// `2^(8n)` added, which keeps blocks of different lengths distinct.
///
/// # Panics
///
/// Panics if `block` is longer than [`BLOCK_SIZE`].
pub fn load_block(block: &[u8]) -> Limbs {
    let mut scratch = [0u8; BLOCK_SIZE + 1];
    scratch[..block.len()].copy_from_slice(block);
    scratch[block.len()] = 1;

    let mut m = [0u32; 5];
    for (limb, chunk) in m.iter_mut().zip(scratch.chunks_exact(4)) {
        *limb = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    m[4] = scratch[BLOCK_SIZE] as u32;

    m
}

/// Encodes the low four limbs as a 16-byte little-endian tag.
///
/// Limb 4 is ignored, which truncates the value modulo `2^128`.
pub fn store_tag(h: &Limbs) -> [u8; TAG_SIZE] {
    let mut tag = [0u8; TAG_SIZE];
    tag.chunks_exact_mut(4).zip(h).for_each(|(chunk, limb)| {
        chunk.copy_from_slice(&limb.to_le_bytes());
    });
    tag
}

/// Adds `m` into `h` with full carry propagation.
///
/// Both inputs are expected below `2^131`, so the sum stays below `2^132`
/// and the carry out of limb 4 is always zero.
pub fn accumulate(h: &mut Limbs, m: &Limbs) {
    let mut carry = 0u64;
    for (hi, mi) in h.iter_mut().zip(m) {
        let sum = *hi as u64 + *mi as u64 + carry;
        *hi = sum as u32;
        carry = sum >> 32;
    }
}

/// Computes `h = h * r mod (2^130 - 5)`, partially reduced.
///
/// The input must satisfy `h[4] < 16`; on return `h[4] < 8`, so the
/// result is below `2^131`.
///
/// The schoolbook product of a 5-limb `h` by a 4-limb `r` is collected
/// into five 64-bit column sums `x0..x4`. Partial products at weight
/// `2^(128 + 32k)` use `rr` in place of `r` and land in column `k`.
/// `h[4] * r[0]` is the one product that cannot be folded this way (the
/// low bits of `r[0]` are not clamped), so `r[0]` is split into
/// `(r[0] >> 2) * 4 + (r[0] & 3)`: the first part folds through `rr[0]`,
/// the second stays in column 4.
pub fn multiply_reduce(h: &mut Limbs, key: &ClampedKey) {
    let [r0, r1, r2, r3] = key.r.map(u64::from);
    let [rr0, rr1, rr2, rr3] = key.rr.map(u64::from);
    let [h0, h1, h2, h3, h4] = h.map(u64::from);

    let mut x0 = h0 * r0 + h1 * rr3 + h2 * rr2 + h3 * rr1 + h4 * rr0;
    let mut x1 = h0 * r1 + h1 * r0 + h2 * rr3 + h3 * rr2 + h4 * rr1;
    let mut x2 = h0 * r2 + h1 * r1 + h2 * r0 + h3 * rr3 + h4 * rr2;
    let mut x3 = h0 * r3 + h1 * r2 + h2 * r1 + h3 * r0 + h4 * rr3;
    let mut x4 = h4 * (r0 & 3);

    // Move everything at or above 2^130 back to the bottom (2^130 = 5 mod p).
    x4 += x3 >> 32;
    x3 &= LOW32;
    x0 += (x4 >> 2) * 5;
    x4 &= 3;

    x1 += x0 >> 32;
    x0 &= LOW32;
    x2 += x1 >> 32;
    x1 &= LOW32;
    x3 += x2 >> 32;
    x2 &= LOW32;
    x4 += x3 >> 32;
    x3 &= LOW32;

    *h = [x0 as u32, x1 as u32, x2 as u32, x3 as u32, x4 as u32];
}

/// One Horner step: `h = (h + block) * r`, partially reduced.
///
/// An empty block is a no-op. The block is padded as described in
/// [`load_block`] using its true length.
///
/// # Panics
///
/// Panics if `block` is longer than [`BLOCK_SIZE`].
pub fn process(h: &mut Limbs, key: &ClampedKey, block: &[u8]) {
    if block.is_empty() {
        return;
    }

    let m = load_block(block);
    accumulate(h, &m);
    multiply_reduce(h, key);
}

/// Brings `h < 2^131` into the canonical range `0..p`.
///
/// Each round computes `g = h + 5 - 2^130 = h - p`. If that did not
/// borrow, `h >= p` and `g` replaces `h`. Since `2^131 < 3p`, two rounds
/// always suffice. The choice is made with a mask derived from the sign
/// bit of `g[4]`, never with a branch.
pub fn reduce(h: &mut Limbs) {
    for _ in 0..2 {
        let mut g = *h;

        let mut carry = 5u64;
        for limb in g.iter_mut() {
            let sum = *limb as u64 + carry;
            *limb = sum as u32;
            carry = sum >> 32;
        }
        g[4] = g[4].wrapping_sub(4);

        // Sign bit set: h - p borrowed, keep h.
        let keep_h = mask_from_bit(g[4] >> 31);
        *h = select_limbs(keep_h, h, &g);
    }
}

/// Produces the tag from the accumulator and the fixed term `s`.
///
/// `h` is fully reduced, `s` is added, and the sum is truncated to
/// 128 bits. `h` is left holding that truncated sum.
pub fn finalize(h: &mut Limbs, s: &Limbs) -> [u8; TAG_SIZE] {
    reduce(h);
    accumulate(h, s);
    h[4] = 0;

    store_tag(h)
}
