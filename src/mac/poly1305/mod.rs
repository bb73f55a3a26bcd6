//! Poly1305 message authentication code (RFC 8439).
//!
//! Poly1305 treats the message as a sequence of 16-byte little-endian
//! integers (each with a `1` byte appended) and evaluates them as a
//! polynomial in the secret point `r`, modulo `p = 2^130 - 5`. The
//! secret `s` is added to the result modulo `2^128` to form the tag.
//!
//! The implementation is split into two layers:
//!
//! - `core`: 32-bit limb arithmetic and block processing
//! - `session`: the stateful `init / update / digest / destroy` API
//!
//! A key pair `(r, s)` must authenticate exactly one message. Deriving the
//! pair (for example from ChaCha20 block 0) is the caller's job.

/// Low-level Poly1305 arithmetic.
///
/// This module contains:
/// - the limb codec (bytes to 32-bit limbs and back)
/// - key clamping and the `rr` fold factors
/// - the multiply-reduce step and carry-propagating addition
/// - the final reduction to the canonical range below `p`
///
/// It performs no allocation and never branches on secret data. Most
/// callers want [`Poly1305`] instead.
pub mod core;

mod error;
mod session;

pub use error::Poly1305Error;
pub use session::Poly1305;

/// Size of one message block in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Size of the combined one-time key `r || s` in bytes.
pub const KEY_SIZE: usize = 32;

/// Size of the authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// Computes the Poly1305 tag of `msg` under a 32-byte one-time key.
///
/// `key[0..16]` is `r` (clamped internally) and `key[16..32]` is `s`.
pub fn auth(key: &[u8; KEY_SIZE], msg: &[u8]) -> [u8; TAG_SIZE] {
    let mut mac = Poly1305::new(key);
    mac.absorb(msg);
    mac.tag()
}

/// Recomputes the tag of `msg` and compares it with `tag` in constant time.
pub fn verify(key: &[u8; KEY_SIZE], msg: &[u8], tag: &[u8; TAG_SIZE]) -> bool {
    use crate::ct::ConstantTimeEq;

    auth(key, msg).ct_eq(tag)
}
