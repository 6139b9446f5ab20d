use crate::error::NullError;
use std::{borrow::Cow, fmt};
use time::{
    OffsetDateTime, PrimitiveDateTime, UtcOffset,
    format_description::{self, OwnedFormatItem, well_known::Rfc3339},
    parsing::Parsed,
};

const TARGET: &str = "Timestamp";

/// Layout name accepted by [`TimeLayout::parse`] for the canonical layout.
pub const RFC3339: &str = "RFC3339";

///
/// TimeLayout
///
/// Text layout used to render and parse timestamps. Callers thread one of
/// these into the timestamp operations; [`TimeLayout::canonical`] is the
/// RFC 3339 layout used when none is supplied.
///

#[derive(Clone)]
pub struct TimeLayout {
    source: Cow<'static, str>,
    items: LayoutItems,
    carries_offset: bool,
}

#[derive(Clone)]
enum LayoutItems {
    Rfc3339,
    Described(OwnedFormatItem),
}

static CANONICAL: TimeLayout = TimeLayout {
    source: Cow::Borrowed(RFC3339),
    items: LayoutItems::Rfc3339,
    carries_offset: true,
};

impl TimeLayout {
    /// RFC 3339 with optional fractional seconds.
    #[must_use]
    pub fn canonical() -> &'static Self {
        &CANONICAL
    }

    /// Build a layout from a `time` format description such as
    /// `[year]-[month]-[day] [hour]:[minute]:[second]`, or from `RFC3339`.
    pub fn parse(source: &str) -> Result<Self, NullError> {
        if source.eq_ignore_ascii_case(RFC3339) {
            return Ok(CANONICAL.clone());
        }

        let items = format_description::parse_owned::<1>(source)
            .map_err(|err| NullError::layout(source, err))?;

        Ok(Self {
            source: Cow::Owned(source.to_string()),
            items: LayoutItems::Described(items),
            carries_offset: source.contains("[offset_"),
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether rendered text records the UTC offset.
    /// Layouts without one render and parse in UTC.
    #[must_use]
    pub const fn carries_offset(&self) -> bool {
        self.carries_offset
    }

    pub fn format(&self, instant: OffsetDateTime) -> Result<String, NullError> {
        let instant = if self.carries_offset {
            instant
        } else {
            instant.to_offset(UtcOffset::UTC)
        };

        let formatted = match &self.items {
            LayoutItems::Rfc3339 => instant.format(&Rfc3339),
            LayoutItems::Described(items) => instant.format(items),
        };

        // the instant is valid, the layout just cannot express it
        formatted.map_err(|err| {
            NullError::range(TARGET, format!("cannot render in layout {}: {err}", self.source))
        })
    }

    /// Parse text written in this layout. Layouts without a time of day
    /// read as midnight.
    pub fn parse_instant(&self, text: &str) -> Result<OffsetDateTime, NullError> {
        match &self.items {
            LayoutItems::Rfc3339 => OffsetDateTime::parse(text, &Rfc3339)
                .map_err(|err| NullError::parse(text, TARGET, err)),
            LayoutItems::Described(items) => self.parse_described(text, items),
        }
    }

    fn parse_described(
        &self,
        text: &str,
        items: &OwnedFormatItem,
    ) -> Result<OffsetDateTime, NullError> {
        let mut parsed = Parsed::new();
        let rest = parsed
            .parse_item(text.as_bytes(), items)
            .map_err(|err| NullError::parse(text, TARGET, err))?;
        if !rest.is_empty() {
            return Err(NullError::parse(text, TARGET, "unexpected trailing characters"));
        }

        if parsed.hour_24().is_none() && parsed.hour_12().is_none() {
            parsed
                .set_hour_24(0)
                .ok_or_else(|| NullError::parse(text, TARGET, "cannot default hour"))?;
        }

        let instant = if self.carries_offset {
            OffsetDateTime::try_from(parsed)
        } else {
            PrimitiveDateTime::try_from(parsed).map(PrimitiveDateTime::assume_utc)
        };

        instant.map_err(|err| NullError::parse(text, TARGET, err))
    }
}

impl Default for TimeLayout {
    fn default() -> Self {
        CANONICAL.clone()
    }
}

impl fmt::Debug for TimeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeLayout({})", self.source)
    }
}

impl fmt::Display for TimeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl PartialEq for TimeLayout {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for TimeLayout {}

///
/// TESTS
///
