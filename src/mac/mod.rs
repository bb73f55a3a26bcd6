//! Message authentication codes.
//!
//! Currently includes Poly1305 (RFC 8439), a one-time authenticator
//! evaluated as a polynomial modulo `2^130 - 5`.

pub mod poly1305;

/// Re-export of the Poly1305 session type and its error.
pub use self::poly1305::{Poly1305, Poly1305Error};
