use crate::types::timestamp::ZERO_INSTANT;
use time::OffsetDateTime;

///
/// ZeroTimestamp
///
/// Zero-defaulting timestamp wrapper produced by other layers.
/// It is only consumed here as a scan input, where a zero instant means
/// "no timestamp" whatever its own flag says.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ZeroTimestamp {
    value: OffsetDateTime,
    valid: bool,
}

impl ZeroTimestamp {
    #[must_use]
    pub fn new(value: OffsetDateTime) -> Self {
        Self {
            value,
            valid: value != ZERO_INSTANT,
        }
    }

    /// Build from raw parts, as a foreign layer would hand them over.
    #[must_use]
    pub const fn from_parts(value: OffsetDateTime, valid: bool) -> Self {
        Self { value, valid }
    }

    #[must_use]
    pub const fn zero() -> Self {
        Self::from_parts(ZERO_INSTANT, false)
    }

    /// The instant, or the zero instant when unset.
    #[must_use]
    pub const fn instant(self) -> OffsetDateTime {
        self.value
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.valid
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.value == ZERO_INSTANT
    }
}

impl Default for ZeroTimestamp {
    fn default() -> Self {
        Self::zero()
    }
}
