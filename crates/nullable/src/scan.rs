use crate::types::{Float64, Int64, Timestamp, ZeroTimestamp};
use time::OffsetDateTime;

///
/// ScanValue
///
/// Closed set of inbound representations a nullable value can be scanned
/// from. Drivers hand back one of these per column; anything a driver can
/// produce that is not listed here arrives as `Unsupported`.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScanValue<'a> {
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    /// UTF-8 text column.
    Text(&'a str),
    /// Raw bytes; drivers commonly send numeric columns this way.
    Bytes(&'a [u8]),
    /// A bare instant, as returned for TIMESTAMP columns.
    Instant(OffsetDateTime),
    Int64(Int64),
    Float64(Float64),
    Timestamp(Timestamp),
    ZeroTimestamp(ZeroTimestamp),
    /// Any other driver type, identified by name only.
    Unsupported(&'static str),
}

impl ScanValue<'_> {
    /// Stable label for the inbound representation, used in diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Instant(_) => "instant",
            Self::Int64(_) => "Int64",
            Self::Float64(_) => "Float64",
            Self::Timestamp(_) => "Timestamp",
            Self::ZeroTimestamp(_) => "ZeroTimestamp",
            Self::Unsupported(name) => *name,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

macro_rules! impl_scan_value_from {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for ScanValue<'_> {
                fn from(v: $type) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_scan_value_from!(
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    OffsetDateTime => Instant,
    Int64 => Int64,
    Float64 => Float64,
    Timestamp => Timestamp,
    ZeroTimestamp => ZeroTimestamp,
);

impl From<isize> for ScanValue<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn from(v: isize) -> Self {
        Self::I64(v as i64)
    }
}

impl From<usize> for ScanValue<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn from(v: usize) -> Self {
        Self::U64(v as u64)
    }
}

impl<'a> From<&'a str> for ScanValue<'a> {
    fn from(s: &'a str) -> Self {
        Self::Text(s)
    }
}

impl<'a> From<&'a String> for ScanValue<'a> {
    fn from(s: &'a String) -> Self {
        Self::Text(s)
    }
}

impl<'a> From<&'a [u8]> for ScanValue<'a> {
    fn from(b: &'a [u8]) -> Self {
        Self::Bytes(b)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for ScanValue<'a> {
    fn from(b: &'a [u8; N]) -> Self {
        Self::Bytes(b)
    }
}

impl<'a> From<&'a Vec<u8>> for ScanValue<'a> {
    fn from(b: &'a Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl From<&Int64> for ScanValue<'_> {
    fn from(v: &Int64) -> Self {
        Self::Int64(*v)
    }
}

impl From<&Float64> for ScanValue<'_> {
    fn from(v: &Float64) -> Self {
        Self::Float64(*v)
    }
}

impl From<&Timestamp> for ScanValue<'_> {
    fn from(v: &Timestamp) -> Self {
        Self::Timestamp(*v)
    }
}

impl From<&ZeroTimestamp> for ScanValue<'_> {
    fn from(v: &ZeroTimestamp) -> Self {
        Self::ZeroTimestamp(*v)
    }
}

impl<'a, T> From<Option<T>> for ScanValue<'a>
where
    T: Into<Self>,
{
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

///
/// TESTS
///
