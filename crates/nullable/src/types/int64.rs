use crate::{
    driver::DriverValue,
    error::NullError,
    json,
    scan::ScanValue,
    traits::{DriverValuer, JsonCodec, Scan},
    types::{log_null, log_rejected, utf8},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const TARGET: &str = "Int64";

// 2^63 as f64; every f64 in [-2^63, 2^63) truncates into i64.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

///
/// Int64
///
/// Nullable 64-bit signed integer.
/// A null value always carries a zero payload.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Int64 {
    value: i64,
    valid: bool,
}

impl Int64 {
    pub const NULL: Self = Self {
        value: 0,
        valid: false,
    };

    /// Coerce any accepted input into a new value.
    pub fn new<'a>(src: impl Into<ScanValue<'a>>) -> Result<Self, NullError> {
        let mut v = Self::NULL;
        v.scan(src)?;

        Ok(v)
    }

    #[must_use]
    pub const fn from_i64(value: i64) -> Self {
        Self { value, valid: true }
    }

    #[must_use]
    pub const fn get(self) -> Option<i64> {
        if self.valid { Some(self.value) } else { None }
    }

    /// Raw payload; zero when null.
    #[must_use]
    pub const fn payload(self) -> i64 {
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

    fn set(&mut self, value: Option<i64>) {
        *self = value.map_or(Self::NULL, Self::from_i64);
    }

    // Coerce one input. `Ok(None)` is a recognized null.
    fn coerce(src: ScanValue<'_>) -> Result<Option<i64>, NullError> {
        match src {
            ScanValue::Null => Ok(None),
            ScanValue::Int64(other) => Ok(other.get()),
            ScanValue::I8(v) => Ok(Some(v.into())),
            ScanValue::I16(v) => Ok(Some(v.into())),
            ScanValue::I32(v) => Ok(Some(v.into())),
            ScanValue::I64(v) => Ok(Some(v)),
            ScanValue::U8(v) => Ok(Some(v.into())),
            ScanValue::U16(v) => Ok(Some(v.into())),
            ScanValue::U32(v) => Ok(Some(v.into())),
            ScanValue::U64(v) => i64::try_from(v)
                .map(Some)
                .map_err(|_| NullError::range(TARGET, format!("{v} exceeds i64::MAX"))),
            ScanValue::F32(v) => from_float(f64::from(v)).map(Some),
            ScanValue::F64(v) => from_float(v).map(Some),
            ScanValue::Text(s) => parse_integer(s).map(Some),
            ScanValue::Bytes(b) if json::is_null(b) => Ok(None),
            ScanValue::Bytes(b) => parse_integer(utf8(b, TARGET)?).map(Some),
            ScanValue::Bool(_)
            | ScanValue::Instant(_)
            | ScanValue::Float64(_)
            | ScanValue::Timestamp(_)
            | ScanValue::ZeroTimestamp(_)
            | ScanValue::Unsupported(_) => Err(NullError::type_not_acceptable(
                src,
                src.label(),
                TARGET,
            )),
        }
    }
}

// Truncates toward zero, like a driver narrowing a DOUBLE column.
#[allow(clippy::cast_possible_truncation)]
fn from_float(v: f64) -> Result<i64, NullError> {
    if !v.is_finite() {
        return Err(NullError::range(TARGET, format!("non-finite float {v}")));
    }

    let truncated = v.trunc();
    if !(-I64_BOUND..I64_BOUND).contains(&truncated) {
        return Err(NullError::range(TARGET, format!("{v} outside i64 range")));
    }

    Ok(truncated as i64)
}

fn parse_integer(text: &str) -> Result<i64, NullError> {
    text.parse::<i64>()
        .map_err(|err| NullError::parse(text, TARGET, err))
}

impl Scan for Int64 {
    fn scan_value(&mut self, src: ScanValue<'_>) -> Result<(), NullError> {
        match Self::coerce(src) {
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
}

impl DriverValuer for Int64 {
    fn value(&self) -> Result<DriverValue, NullError> {
        Ok(self.get().into())
    }
}

impl JsonCodec for Int64 {
    fn marshal_json(&self) -> Result<Vec<u8>, NullError> {
        Ok(match self.get() {
            Some(v) => v.to_string().into_bytes(),
            None => json::null_bytes(),
        })
    }

    fn unmarshal_json(&mut self, bytes: &[u8]) -> Result<(), NullError> {
        if json::is_null(bytes) {
            self.set(None);
            return Ok(());
        }

        match serde_json::from_slice::<i64>(bytes) {
            Ok(v) => {
                self.set(Some(v));
                Ok(())
            }
            Err(err) => {
                self.set(None);
                let err = NullError::parse(json::lossy(bytes), TARGET, err);
                log_rejected(TARGET, "json", &err);

                Err(err)
            }
        }
    }
}

impl From<i64> for Int64 {
    fn from(v: i64) -> Self {
        Self::from_i64(v)
    }
}

impl From<Option<i64>> for Int64 {
    fn from(v: Option<i64>) -> Self {
        v.map_or(Self::NULL, Self::from_i64)
    }
}

impl From<Int64> for Option<i64> {
    fn from(v: Int64) -> Self {
        v.get()
    }
}

impl Serialize for Int64 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.get() {
            Some(v) => serializer.serialize_i64(v),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Int64 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<i64>::deserialize(deserializer).map(Self::from)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NullErrorKind;

    fn scanned<'a>(src: impl Into<ScanValue<'a>>) -> (Int64, Result<(), NullError>) {
        // start from a valid value so stale payloads would show up
        let mut v = Int64::from_i64(99);
        let res = v.scan(src);

        (v, res)
    }

    #[test]
    fn new_accepts_i64() {
        let v = Int64::new(1i64).unwrap();
        assert!(v.is_valid());
        assert_eq!(v.payload(), 1);
    }

    #[test]
    fn new_rejects_bool() {
        let err = Int64::new(false).unwrap_err();
        assert_eq!(err.kind(), NullErrorKind::TypeNotAcceptable);
    }

    #[test]
    fn scan_every_integer_width() {
        let inputs: [ScanValue<'_>; 11] = [
            1i8.into(),
            1i16.into(),
            1i32.into(),
            1i64.into(),
            1isize.into(),
            1u8.into(),
            1u16.into(),
            1u32.into(),
            1u64.into(),
            1usize.into(),
            Int64::from_i64(1).into(),
        ];

        for input in inputs {
            let (v, res) = scanned(input);
            assert!(res.is_ok(), "{input:?}");
            assert_eq!(v.get(), Some(1), "{input:?}");
        }
    }

    #[test]
    fn scan_zero_and_negative_values() {
        for (input, expected) in [
            (ScanValue::from(0i8), 0),
            (ScanValue::from(0u64), 0),
            (ScanValue::from(-1i8), -1),
            (ScanValue::from(-1i32), -1),
            (ScanValue::from(i64::MIN), i64::MIN),
        ] {
            let (v, res) = scanned(input);
            assert!(res.is_ok());
            assert_eq!(v.get(), Some(expected));
        }
    }

    #[test]
    fn scan_text_and_bytes() {
        for (input, expected) in [
            (ScanValue::from("1"), 1),
            (ScanValue::from("0"), 0),
            (ScanValue::from("-1"), -1),
            (ScanValue::from(b"1"), 1),
            (ScanValue::from(b"-1"), -1),
        ] {
            let (v, res) = scanned(input);
            assert!(res.is_ok());
            assert_eq!(v.get(), Some(expected));
        }
    }

    #[test]
    fn scan_unparseable_text_resets_to_null() {
        let (v, res) = scanned("1.5");

        assert_eq!(res.unwrap_err().kind(), NullErrorKind::Parse);
        assert!(v.is_null());
        assert_eq!(v.payload(), 0);
    }

    #[test]
    fn scan_non_utf8_bytes_is_parse_error() {
        let (v, res) = scanned(&[0xff, b'1'][..]);

        assert_eq!(res.unwrap_err().kind(), NullErrorKind::Parse);
        assert_eq!(v, Int64::NULL);
    }

    #[test]
    fn scan_null_inputs_clear_without_error() {
        for input in [ScanValue::Null, ScanValue::from(b"null"), Int64::NULL.into()] {
            let (v, res) = scanned(input);
            assert!(res.is_ok());
            assert!(v.is_null());
            assert_eq!(v.payload(), 0);
        }
    }

    #[test]
    fn scan_unacceptable_types_reset_to_null() {
        for input in [
            ScanValue::from(true),
            ScanValue::Unsupported("uuid"),
            ScanValue::from(crate::types::Float64::from_f64(1.0, 2).unwrap()),
        ] {
            let (v, res) = scanned(input);
            assert_eq!(res.unwrap_err().kind(), NullErrorKind::TypeNotAcceptable);
            assert_eq!(v, Int64::NULL);
        }
    }

    #[test]
    fn scan_floats_truncate_toward_zero() {
        assert_eq!(Int64::new(2.9f64).unwrap().get(), Some(2));
        assert_eq!(Int64::new(-2.9f32).unwrap().get(), Some(-2));
    }

    #[test]
    fn scan_out_of_range_is_range_error() {
        for input in [
            ScanValue::from(u64::MAX),
            ScanValue::from(f64::NAN),
            ScanValue::from(1e19f64),
        ] {
            let (v, res) = scanned(input);
            assert_eq!(res.unwrap_err().kind(), NullErrorKind::Range);
            assert!(v.is_null());
        }
    }

    #[test]
    fn value_projects_payload_or_null() {
        assert_eq!(Int64::from_i64(1).value().unwrap(), DriverValue::Int64(1));
        assert_eq!(Int64::NULL.value().unwrap(), DriverValue::Null);
    }

    #[test]
    fn marshal_null_is_literal() {
        assert_eq!(Int64::NULL.marshal_json().unwrap(), b"null".to_vec());
        assert_eq!(Int64::from_i64(-84).marshal_json().unwrap(), b"-84".to_vec());
    }

    #[test]
    fn unmarshal_number_and_null() {
        let mut v = Int64::NULL;
        v.unmarshal_json(b"1").unwrap();
        assert_eq!(v.get(), Some(1));

        v.unmarshal_json(b"null").unwrap();
        assert!(v.is_null());
        assert_eq!(v.payload(), 0);
    }

    #[test]
    fn unmarshal_unexpected_value_is_parse_error() {
        let mut v = Int64::from_i64(5);
        let err = v.unmarshal_json(b"2001-05-03").unwrap_err();

        assert_eq!(err.kind(), NullErrorKind::Parse);
        assert!(v.is_null());
        assert_eq!(v.payload(), 0);
    }

    #[test]
    fn serde_roundtrip_inside_record() {
        #[derive(Debug, Deserialize, PartialEq, Serialize)]
        struct Record {
            amount: Int64,
            missing: Int64,
        }

        let source = Record {
            amount: Int64::new(84i32).unwrap(),
            missing: Int64::NULL,
        };

        let json = serde_json::to_string(&source).unwrap();
        assert_eq!(json, r#"{"amount":84,"missing":null}"#);

        let target: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(target, source);
    }
}
