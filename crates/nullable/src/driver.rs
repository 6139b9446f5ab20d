use time::OffsetDateTime;

///
/// DriverValue
///
/// Outbound representation handed to a database driver. This is the closed
/// set of parameter types drivers accept; `Null` is the SQL NULL marker.
///

#[derive(Clone, Debug, PartialEq)]
pub enum DriverValue {
    Null,
    Bool(bool),
    Int64(i64),
    Float64(f64),
    Bytes(Vec<u8>),
    Text(String),
    Timestamp(OffsetDateTime),
}

impl DriverValue {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Stable label for the outbound representation.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int64(_) => "int64",
            Self::Float64(_) => "float64",
            Self::Bytes(_) => "bytes",
            Self::Text(_) => "text",
            Self::Timestamp(_) => "timestamp",
        }
    }
}

impl<T> From<Option<T>> for DriverValue
where
    T: Into<Self>,
{
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl From<i64> for DriverValue {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<f64> for DriverValue {
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

impl From<OffsetDateTime> for DriverValue {
    fn from(v: OffsetDateTime) -> Self {
        Self::Timestamp(v)
    }
}

///
/// TESTS
///
