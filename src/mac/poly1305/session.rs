//! Stateful Poly1305 session.
//!
//! A session owns the clamped key, the fixed term, the accumulator and a
//! 16-byte input buffer. Input is absorbed in 16-byte blocks aligned to
//! the start of the message, regardless of how it was split across
//! `update` calls.

use core::fmt::{self, Debug, Formatter};

use super::core::{ClampedKey, Limbs, finalize, load_fixed_term, process};
use super::{BLOCK_SIZE, KEY_SIZE, Poly1305Error, TAG_SIZE};
use crate::ct::ConstantTimeEq;

/// Lifecycle of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lifecycle {
    Active,
    Destroyed,
}

/// Poly1305 authenticator state for a single message.
///
/// # Lifecycle
///
/// - [`Poly1305::init`] / [`Poly1305::new`] create an active session
/// - [`Poly1305::update`] absorbs message bytes, any number of times
/// - [`Poly1305::digest`] returns the tag of everything absorbed so far
///   without disturbing the session, so it may be called repeatedly and
///   interleaved with further updates
/// - [`Poly1305::destroy`] wipes all key material; the session then
///   rejects every operation with [`Poly1305Error::InvalidState`]
///
/// Dropping a session wipes it as well.
///
/// # Security
///
/// - One key pair `(r, s)` must authenticate exactly one message.
/// - `Clone` copies secret state. Clones are wiped when dropped, like the
///   original.
#[derive(Clone)]
pub struct Poly1305 {
    key: ClampedKey,

    /// Fixed term `s`; limb 4 is always zero.
    s: Limbs,

    /// Accumulator, kept below `2^131` between blocks.
    h: Limbs,

    /// Bytes of an incomplete block. Never holds a full block between calls.
    buffer: [u8; BLOCK_SIZE],
    buffered: usize,

    lifecycle: Lifecycle,
}

impl Poly1305 {
    /// Creates a session from the two 16-byte key halves.
    ///
    /// `r` is clamped; `s` is taken as is.
    ///
    /// # Errors
    ///
    /// Returns [`Poly1305Error::InvalidKeyLength`] if either slice is not
    /// exactly 16 bytes long.
    pub fn init(r: &[u8], s: &[u8]) -> Result<Self, Poly1305Error> {
        let r: &[u8; 16] = r.try_into().map_err(|_| Poly1305Error::InvalidKeyLength)?;
        let s: &[u8; 16] = s.try_into().map_err(|_| Poly1305Error::InvalidKeyLength)?;

        Ok(Self::from_halves(r, s))
    }

    /// Creates a session from a combined 32-byte one-time key.
    ///
    /// `key[0..16]` is `r` and `key[16..32]` is `s`, the layout produced by
    /// the ChaCha20-Poly1305 key derivation in RFC 8439.
    pub fn new(key: &[u8; KEY_SIZE]) -> Self {
        let mut r = [0u8; 16];
        let mut s = [0u8; 16];
        r.copy_from_slice(&key[..16]);
        s.copy_from_slice(&key[16..]);

        let mac = Self::from_halves(&r, &s);

        r.fill(0);
        s.fill(0);

        mac
    }

    fn from_halves(r: &[u8; 16], s: &[u8; 16]) -> Self {
        Poly1305 {
            key: ClampedKey::from_bytes(r),
            s: load_fixed_term(s),
            h: [0; 5],
            buffer: [0; BLOCK_SIZE],
            buffered: 0,
            lifecycle: Lifecycle::Active,
        }
    }

    /// Absorbs `data` into the session.
    ///
    /// Chunk boundaries are irrelevant: feeding a message in one call or
    /// in any number of pieces yields the same tag.
    ///
    /// # Errors
    ///
    /// Returns [`Poly1305Error::InvalidState`] after [`Poly1305::destroy`].
    pub fn update(&mut self, data: &[u8]) -> Result<(), Poly1305Error> {
        self.ensure_active()?;
        self.absorb(data);
        Ok(())
    }

    pub(crate) fn absorb(&mut self, mut data: &[u8]) {
        // Top up a pending partial block first.
        if self.buffered > 0 {
            let take = (BLOCK_SIZE - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];

            if self.buffered < BLOCK_SIZE {
                return;
            }

            process(&mut self.h, &self.key, &self.buffer);
            self.buffered = 0;
        }

        let mut blocks = data.chunks_exact(BLOCK_SIZE);
        for block in &mut blocks {
            process(&mut self.h, &self.key, block);
        }

        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffered = rest.len();
    }

    /// Returns the tag of the message absorbed so far.
    ///
    /// The computation runs on a snapshot: pending bytes are processed as
    /// a short final block on the copy, and the session itself is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Poly1305Error::InvalidState`] after [`Poly1305::destroy`].
    pub fn digest(&self) -> Result<[u8; TAG_SIZE], Poly1305Error> {
        self.ensure_active()?;
        Ok(self.tag())
    }

    /// Writes the tag of the message absorbed so far into `out`.
    ///
    /// # Errors
    ///
    /// - [`Poly1305Error::InvalidDigestLength`] if `out` is not 16 bytes
    /// - [`Poly1305Error::InvalidState`] after [`Poly1305::destroy`]
    pub fn digest_into(&self, out: &mut [u8]) -> Result<(), Poly1305Error> {
        if out.len() != TAG_SIZE {
            return Err(Poly1305Error::InvalidDigestLength);
        }

        out.copy_from_slice(&self.digest()?);
        Ok(())
    }

    /// Checks `expected` against the tag of the message absorbed so far.
    ///
    /// The comparison runs in constant time. The session is not modified.
    ///
    /// # Errors
    ///
    /// - [`Poly1305Error::InvalidDigestLength`] if `expected` is not 16 bytes
    /// - [`Poly1305Error::InvalidState`] after [`Poly1305::destroy`]
    pub fn verify(&self, expected: &[u8]) -> Result<bool, Poly1305Error> {
        let expected: &[u8; TAG_SIZE] = expected
            .try_into()
            .map_err(|_| Poly1305Error::InvalidDigestLength)?;

        let mut tag = self.digest()?;
        let ok = tag.ct_eq(expected);
        tag.fill(0);

        Ok(ok)
    }

    pub(crate) fn tag(&self) -> [u8; TAG_SIZE] {
        let mut snapshot = self.clone();
        process(
            &mut snapshot.h,
            &snapshot.key,
            &snapshot.buffer[..snapshot.buffered],
        );
        finalize(&mut snapshot.h, &snapshot.s)
    }

    /// Wipes all key material and buffered input.
    ///
    /// Every later call to `update`, `digest`, `digest_into` or `verify`
    /// fails with [`Poly1305Error::InvalidState`]. Destroying twice is
    /// harmless.
    pub fn destroy(&mut self) {
        self.wipe();
        self.lifecycle = Lifecycle::Destroyed;
    }

    /// Returns `true` until [`Poly1305::destroy`] has been called.
    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    fn ensure_active(&self) -> Result<(), Poly1305Error> {
        match self.lifecycle {
            Lifecycle::Active => Ok(()),
            Lifecycle::Destroyed => Err(Poly1305Error::InvalidState),
        }
    }

    fn wipe(&mut self) {
        self.key.wipe();
        self.s.iter_mut().for_each(|v| *v = 0);
        self.h.iter_mut().for_each(|v| *v = 0);
        self.buffer.iter_mut().for_each(|v| *v = 0);
        self.buffered = 0;
    }
}

impl Drop for Poly1305 {
    fn drop(&mut self) {
        self.wipe();
    }
}

impl Debug for Poly1305 {
    /// Prints only non-secret state: the lifecycle and how many bytes are
    /// waiting for a full block.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poly1305")
            .field("lifecycle", &self.lifecycle)
            .field("buffered", &self.buffered)
            .finish_non_exhaustive()
    }
}
