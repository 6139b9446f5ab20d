//! Shared JSON text helpers.

/// The JSON null literal, byte for byte.
pub const NULL_LITERAL: &[u8] = b"null";

/// Returns true only for the exact 4-byte `null` literal.
#[must_use]
pub fn is_null(bytes: &[u8]) -> bool {
    bytes == NULL_LITERAL
}

pub(crate) fn null_bytes() -> Vec<u8> {
    NULL_LITERAL.to_vec()
}

// Rejected input rendered for error messages.
pub(crate) fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

///
/// TESTS
///
