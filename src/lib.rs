//! Poly1305 one-time authenticator for Cryptal
//!
//! This crate provides the Poly1305 message authentication code as a
//! standalone, low-level building block. It is consumed by higher layers
//! (AEAD constructions, signing and transport code) which derive the
//! one-time key and decide what to do with the resulting tag.
//!
//! The focus is on **clarity, predictability, and auditability**. The
//! arithmetic is written out limb by limb so every intermediate bound can
//! be checked by reading the code.
//!
//! # Module overview
//!
//! - `mac`
//!   Message authentication codes. Currently Poly1305 only.
//!
//!   The Poly1305 module is split into a public low-level `core`
//!   (32-bit limb arithmetic modulo `2^130 - 5`, key clamping, block
//!   processing and final reduction) and a session type that wraps the
//!   core in an `init / update / digest / destroy` lifecycle.
//!
//! - `ct`
//!   Constant-time comparison helpers used for tag verification.
//!
//! # Design goals
//!
//! - No heap allocations
//! - No runtime dependencies
//! - Branch-free handling of secret data
//! - Explicit errors for every misuse the type system cannot rule out
//!
//! Key derivation (from a ChaCha20 keystream, an AES block, ...) and any
//! authenticated-encryption composition are out of scope and left to the
//! caller.

pub mod ct;
pub mod mac;
