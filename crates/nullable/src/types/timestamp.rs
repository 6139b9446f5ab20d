use crate::{
    driver::DriverValue,
    error::NullError,
    json,
    layout::TimeLayout,
    scan::ScanValue,
    traits::{DriverValuer, JsonCodec, Scan},
    types::{log_null, log_rejected, utf8},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};

const TARGET: &str = "Timestamp";

/// Zero instant (0001-01-01T00:00:00Z). It is the payload of every null
/// timestamp and means "no timestamp" when it arrives as input.
pub const ZERO_INSTANT: OffsetDateTime = zero_instant();

const fn zero_instant() -> OffsetDateTime {
    // Safe: constant valid date
    match Date::from_calendar_date(1, Month::January, 1) {
        Ok(date) => PrimitiveDateTime::new(date, Time::MIDNIGHT).assume_utc(),
        Err(_) => unreachable!(),
    }
}

///
/// Timestamp
///
/// Nullable instant with an offset. Text conversion goes through a
/// [`TimeLayout`]; the `*_with` methods take one explicitly and the trait
/// impls use [`TimeLayout::canonical`].
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Timestamp {
    value: OffsetDateTime,
    valid: bool,
}

impl Timestamp {
    pub const NULL: Self = Self {
        value: ZERO_INSTANT,
        valid: false,
    };

    /// Coerce any accepted input into a new value using the canonical layout.
    pub fn new<'a>(src: impl Into<ScanValue<'a>>) -> Result<Self, NullError> {
        Self::new_with(src, TimeLayout::canonical())
    }

    pub fn new_with<'a>(
        src: impl Into<ScanValue<'a>>,
        layout: &TimeLayout,
    ) -> Result<Self, NullError> {
        let mut v = Self::NULL;
        v.scan_with(src, layout)?;

        Ok(v)
    }

    /// Wrap an instant; the zero instant becomes null.
    #[must_use]
    pub fn from_instant(value: OffsetDateTime) -> Self {
        let mut v = Self::NULL;
        v.set(non_zero(value));

        v
    }

    #[must_use]
    pub const fn get(self) -> Option<OffsetDateTime> {
        if self.valid { Some(self.value) } else { None }
    }

    /// Raw payload; [`ZERO_INSTANT`] when null.
    #[must_use]
    pub const fn payload(self) -> OffsetDateTime {
        self.value
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.valid
    }

    #[must_use]
    pub const fn is_null(self) -> bool {
        !self.valid
    }

    fn set(&mut self, value: Option<OffsetDateTime>) {
        *self = match value {
            Some(value) => Self { value, valid: true },
            None => Self::NULL,
        };
    }

    /// Scan with an explicit layout for text and byte inputs.
    pub fn scan_with<'a>(
        &mut self,
        src: impl Into<ScanValue<'a>>,
        layout: &TimeLayout,
    ) -> Result<(), NullError> {
        let src = src.into();

        match Self::coerce(src, layout) {
            Ok(value) => {
                if value.is_none() {
                    log_null(TARGET, src.label());
                }
                self.set(value);

                Ok(())
            }
            Err(err) => {
                self.set(None);
                log_rejected(TARGET, src.label(), &err);

                Err(err)
            }
        }
    }

    // Coerce one input. `Ok(None)` is a recognized null.
    fn coerce(
        src: ScanValue<'_>,
        layout: &TimeLayout,
    ) -> Result<Option<OffsetDateTime>, NullError> {
        match src {
            ScanValue::Null => Ok(None),
            ScanValue::Timestamp(other) => Ok(other.get()),
            ScanValue::Instant(t) => Ok(non_zero(t)),
            ScanValue::ZeroTimestamp(z) => Ok(non_zero(z.instant())),
            ScanValue::Text(s) => layout.parse_instant(s).map(Some),
            ScanValue::Bytes(b) if json::is_null(b) => Ok(None),
            ScanValue::Bytes(b) => layout.parse_instant(utf8(b, TARGET)?).map(Some),
            ScanValue::Bool(_)
            | ScanValue::I8(_)
            | ScanValue::I16(_)
            | ScanValue::I32(_)
            | ScanValue::I64(_)
            | ScanValue::U8(_)
            | ScanValue::U16(_)
            | ScanValue::U32(_)
            | ScanValue::U64(_)
            | ScanValue::F32(_)
            | ScanValue::F64(_)
            | ScanValue::Int64(_)
            | ScanValue::Float64(_)
            | ScanValue::Unsupported(_) => Err(NullError::type_not_acceptable(
                src,
                src.label(),
                TARGET,
            )),
        }
    }

    /// Render as a quoted JSON string in `layout`.
    pub fn marshal_json_with(&self, layout: &TimeLayout) -> Result<Vec<u8>, NullError> {
        let Some(value) = self.get() else {
            return Ok(json::null_bytes());
        };

        let text = render(value, layout)?;
        serde_json::to_vec(&text).map_err(|err| NullError::range(TARGET, err.to_string()))
    }

    /// Parse a quoted JSON string in `layout`.
    pub fn unmarshal_json_with(
        &mut self,
        bytes: &[u8],
        layout: &TimeLayout,
    ) -> Result<(), NullError> {
        if json::is_null(bytes) {
            self.set(None);
            return Ok(());
        }

        let parsed = serde_json::from_slice::<String>(bytes)
            .map_err(|err| NullError::parse(json::lossy(bytes), TARGET, err))
            .and_then(|text| layout.parse_instant(&text));

        match parsed {
            Ok(value) => {
                self.set(Some(value));
                Ok(())
            }
            Err(err) => {
                self.set(None);
                log_rejected(TARGET, "json", &err);

                Err(err)
            }
        }
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::NULL
    }
}

fn non_zero(value: OffsetDateTime) -> Option<OffsetDateTime> {
    (value != ZERO_INSTANT).then_some(value)
}

// Four-digit years only; anything else would not read back unambiguously.
fn render(value: OffsetDateTime, layout: &TimeLayout) -> Result<String, NullError> {
    let year = value.year();
    if !(0..10_000).contains(&year) {
        return Err(NullError::range(
            TARGET,
            format!("year {year} outside of range [0,9999]"),
        ));
    }

    layout.format(value)
}

impl Scan for Timestamp {
    fn scan_value(&mut self, src: ScanValue<'_>) -> Result<(), NullError> {
        self.scan_with(src, TimeLayout::canonical())
    }
}

impl DriverValuer for Timestamp {
    fn value(&self) -> Result<DriverValue, NullError> {
        Ok(self.get().into())
    }
}

impl JsonCodec for Timestamp {
    fn marshal_json(&self) -> Result<Vec<u8>, NullError> {
        self.marshal_json_with(TimeLayout::canonical())
    }

    fn unmarshal_json(&mut self, bytes: &[u8]) -> Result<(), NullError> {
        self.unmarshal_json_with(bytes, TimeLayout::canonical())
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(value: OffsetDateTime) -> Self {
        Self::from_instant(value)
    }
}

impl From<Timestamp> for Option<OffsetDateTime> {
    fn from(v: Timestamp) -> Self {
        v.get()
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.get() {
            Some(value) => {
                let text = render(value, TimeLayout::canonical())
                    .map_err(serde::ser::Error::custom)?;
                serializer.serialize_str(&text)
            }
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => TimeLayout::canonical()
                .parse_instant(&text)
                .map(|value| Self { value, valid: true })
                .map_err(serde::de::Error::custom),
            None => Ok(Self::NULL),
        }
    }
}

///
/// TESTS
///
