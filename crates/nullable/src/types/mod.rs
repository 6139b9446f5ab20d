mod float64;
mod int64;
mod timestamp;
mod zero;


pub use float64::*;
pub use int64::*;
pub use timestamp::*;
pub use zero::*;

use crate::error::NullError;
use std::str;

// Shared diagnostics for rejected input. Rejection is a caller-input
// problem, so it is reported at debug level only.
fn log_rejected(target: &'static str, input: &'static str, err: &NullError) {
    tracing::debug!(target_type = target, input, kind = %err.kind(), error = %err, "input rejected");
}

fn log_null(target: &'static str, input: &'static str) {
    tracing::trace!(target_type = target, input, "folded to null");
}

// Text and byte columns share one grammar; bytes must be UTF-8.
fn utf8<'a>(bytes: &'a [u8], target: &'static str) -> Result<&'a str, NullError> {
    str::from_utf8(bytes).map_err(|err| NullError::parse(crate::json::lossy(bytes), target, err))
}
