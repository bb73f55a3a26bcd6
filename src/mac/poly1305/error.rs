use core::fmt::{Display, Formatter, Result};

/// Errors reported by the Poly1305 session API.
///
/// Every variant is a usage error. The arithmetic itself is total and
/// never fails, so there is nothing transient to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poly1305Error {
    /// `r` or `s` was not exactly 16 bytes.
    InvalidKeyLength,
    /// The output (or expected) tag buffer was not exactly 16 bytes.
    InvalidDigestLength,
    /// The session was used after `destroy`.
    InvalidState,
}

impl Display for Poly1305Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let msg = match self {
            Poly1305Error::InvalidKeyLength => "poly1305 key halves must be exactly 16 bytes",
            Poly1305Error::InvalidDigestLength => "poly1305 tag buffer must be exactly 16 bytes",
            Poly1305Error::InvalidState => "poly1305 session used after destroy",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for Poly1305Error {}
