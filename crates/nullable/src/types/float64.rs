use crate::{
    driver::DriverValue,
    error::NullError,
    json,
    scan::ScanValue,
    traits::{DriverValuer, JsonCodec, Scan},
    types::{log_null, log_rejected, utf8},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const TARGET: &str = "Float64";

/// Largest number of fractional digits a `Float64` will render.
/// Larger requests are clamped at construction.
pub const MAX_PRECISION: u32 = 32;

///
/// Float64
///
/// Nullable finite f64 rendered as fixed-point JSON text.
///
/// `precision` is the number of fractional digits written by
/// [`JsonCodec::marshal_json`]. It is fixed at construction, never inferred
/// from the payload, and never sent to a driver. Two values with equal
/// payloads but different precision compare unequal.
///
/// -0.0 is stored as 0.0; NaN and infinities are rejected. Precision is
/// clamped to [`MAX_PRECISION`].
///

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Float64 {
    value: f64,
    valid: bool,
    precision: u32,
}

impl Float64 {
    /// Null value that will render with `precision` fractional digits once set.
    #[must_use]
    pub const fn null(precision: u32) -> Self {
        Self {
            value: 0.0,
            valid: false,
            precision: clamp_precision(precision),
        }
    }

    /// Coerce any accepted input into a new value.
    pub fn new<'a>(src: impl Into<ScanValue<'a>>, precision: u32) -> Result<Self, NullError> {
        let mut v = Self::null(precision);
        v.scan(src)?;

        Ok(v)
    }

    pub fn from_f64(value: f64, precision: u32) -> Result<Self, NullError> {
        let value = finite(value)?;

        Ok(Self {
            value,
            valid: true,
            precision: clamp_precision(precision),
        })
    }

    #[must_use]
    pub const fn get(self) -> Option<f64> {
        if self.valid { Some(self.value) } else { None }
    }

    /// Raw payload; zero when null.
    #[must_use]
    pub const fn payload(self) -> f64 {
        self.value
    }

    #[must_use]
    pub const fn precision(self) -> u32 {
        self.precision
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.valid
    }

    #[must_use]
    pub const fn is_null(self) -> bool {
        !self.valid
    }

    // Precision survives every overwrite.
    fn set(&mut self, value: Option<f64>) {
        match value {
            Some(v) => {
                self.value = v;
                self.valid = true;
            }
            None => {
                self.value = 0.0;
                self.valid = false;
            }
        }
    }

    // Coerce one input. `Ok(None)` is a recognized null.
    #[allow(clippy::cast_precision_loss)]
    fn coerce(src: ScanValue<'_>) -> Result<Option<f64>, NullError> {
        let value = match src {
            ScanValue::Null => return Ok(None),
            ScanValue::Float64(other) => return Ok(other.get()),
            ScanValue::I8(v) => v.into(),
            ScanValue::I16(v) => v.into(),
            ScanValue::I32(v) => v.into(),
            ScanValue::I64(v) => v as f64,
            ScanValue::U8(v) => v.into(),
            ScanValue::U16(v) => v.into(),
            ScanValue::U32(v) => v.into(),
            ScanValue::U64(v) => v as f64,
            ScanValue::F32(v) => f64::from(v),
            ScanValue::F64(v) => v,
            ScanValue::Text(s) => return parse_float(s).map(Some),
            ScanValue::Bytes(b) if json::is_null(b) => return Ok(None),
            ScanValue::Bytes(b) => return parse_float(utf8(b, TARGET)?).map(Some),
            ScanValue::Bool(_)
            | ScanValue::Instant(_)
            | ScanValue::Int64(_)
            | ScanValue::Timestamp(_)
            | ScanValue::ZeroTimestamp(_)
            | ScanValue::Unsupported(_) => {
                return Err(NullError::type_not_acceptable(src, src.label(), TARGET));
            }
        };

        finite(value).map(Some)
    }

    /// Fixed-point text with exactly `precision` fractional digits.
    fn render(self) -> String {
        format!("{:.*}", self.precision as usize, self.value)
    }
}

const fn clamp_precision(precision: u32) -> u32 {
    if precision > MAX_PRECISION {
        MAX_PRECISION
    } else {
        precision
    }
}

fn finite(v: f64) -> Result<f64, NullError> {
    if !v.is_finite() {
        return Err(NullError::range(TARGET, format!("non-finite float {v}")));
    }

    // canonicalize -0.0 so rendering never emits "-0.00"
    Ok(if v == 0.0 { 0.0 } else { v })
}

fn parse_float(text: &str) -> Result<f64, NullError> {
    let v = text
        .parse::<f64>()
        .map_err(|err| NullError::parse(text, TARGET, err))?;

    finite(v).map_err(|_| NullError::parse(text, TARGET, "non-finite decimal literal"))
}

impl Scan for Float64 {
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

impl DriverValuer for Float64 {
    fn value(&self) -> Result<DriverValue, NullError> {
        Ok(self.get().into())
    }
}

impl JsonCodec for Float64 {
    fn marshal_json(&self) -> Result<Vec<u8>, NullError> {
        if self.valid {
            Ok(self.render().into_bytes())
        } else {
            Ok(json::null_bytes())
        }
    }

    fn unmarshal_json(&mut self, bytes: &[u8]) -> Result<(), NullError> {
        if json::is_null(bytes) {
            self.set(None);
            return Ok(());
        }

        let parsed = serde_json::from_slice::<f64>(bytes)
            .map_err(|err| NullError::parse(json::lossy(bytes), TARGET, err))
            .and_then(finite);

        match parsed {
            Ok(v) => {
                self.set(Some(v));
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

impl From<Float64> for Option<f64> {
    fn from(v: Float64) -> Self {
        v.get()
    }
}

// Serde carries the payload only; fixed-point text needs `marshal_json`.
impl Serialize for Float64 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.get() {
            Some(v) => serializer.serialize_f64(v),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Float64 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<f64>::deserialize(deserializer)? {
            Some(v) => Self::from_f64(v, 0).map_err(serde::de::Error::custom),
            None => Ok(Self::null(0)),
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NullErrorKind;

    fn scanned<'a>(src: impl Into<ScanValue<'a>>) -> (Float64, Result<(), NullError>) {
        let mut v = Float64::from_f64(9.5, 2).unwrap();
        let res = v.scan(src);

        (v, res)
    }

    fn marshal(v: Float64) -> String {
        String::from_utf8(v.marshal_json().unwrap()).unwrap()
    }

    #[test]
    fn new_keeps_payload_and_precision() {
        let v = Float64::new(1.01f64, 2).unwrap();
        assert!(v.is_valid());
        assert_eq!(v.payload(), 1.01);
        assert_eq!(v.precision(), 2);
    }

    #[test]
    fn new_rejects_unparseable_bytes() {
        let err = Float64::new(b"zero", 2).unwrap_err();
        assert_eq!(err.kind(), NullErrorKind::Parse);
    }

    #[test]
    fn scan_every_numeric_width() {
        let inputs: [ScanValue<'_>; 12] = [
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
            1.0f32.into(),
            1.0f64.into(),
        ];

        for input in inputs {
            let (v, res) = scanned(input);
            assert!(res.is_ok(), "{input:?}");
            assert_eq!(v.get(), Some(1.0), "{input:?}");
        }
    }

    #[test]
    fn scan_zero_integer_is_valid() {
        let (v, res) = scanned(0i32);
        assert!(res.is_ok());
        assert!(v.is_valid());
        assert_eq!(v.payload(), 0.0);
    }

    #[test]
    fn scan_f32_widens_exactly() {
        let narrow = 1.01f32;
        let (v, _) = scanned(narrow);

        assert_eq!(v.get(), Some(f64::from(narrow)));
    }

    #[test]
    fn scan_same_type_copies_payload_not_precision() {
        let source = Float64::from_f64(1.01, 5).unwrap();
        let (v, res) = scanned(&source);

        assert!(res.is_ok());
        assert_eq!(v.get(), Some(1.01));
        assert_eq!(v.precision(), 2);
    }

    #[test]
    fn scan_text() {
        let (v, res) = scanned("1.01");
        assert!(res.is_ok());
        assert_eq!(v.get(), Some(1.01));

        let (v, res) = scanned("1.01z");
        assert_eq!(res.unwrap_err().kind(), NullErrorKind::Parse);
        assert!(v.is_null());
        assert_eq!(v.payload(), 0.0);
    }

    #[test]
    fn scan_bytes() {
        let (v, res) = scanned(b"1.01");
        assert!(res.is_ok());
        assert_eq!(v.get(), Some(1.01));

        let (v, res) = scanned(b"zero");
        assert_eq!(res.unwrap_err().kind(), NullErrorKind::Parse);
        assert!(v.is_null());
        assert_eq!(v.payload(), 0.0);
    }

    #[test]
    fn scan_null_bytes_clears_without_error() {
        let v = Float64::new(b"null", 2).unwrap();

        assert!(v.is_null());
        assert_eq!(v.value().unwrap(), DriverValue::Null);
    }

    #[test]
    fn scan_non_finite_is_rejected() {
        let (v, res) = scanned(f64::INFINITY);
        assert_eq!(res.unwrap_err().kind(), NullErrorKind::Range);
        assert!(v.is_null());

        let (v, res) = scanned("NaN");
        assert_eq!(res.unwrap_err().kind(), NullErrorKind::Parse);
        assert!(v.is_null());
    }

    #[test]
    fn scan_bool_is_type_not_acceptable() {
        let (v, res) = scanned(true);

        assert_eq!(res.unwrap_err().kind(), NullErrorKind::TypeNotAcceptable);
        assert!(v.is_null());
        assert_eq!(v.payload(), 0.0);
        assert_eq!(v.precision(), 2);
    }

    #[test]
    fn value_returns_raw_payload() {
        let v = Float64::from_f64(1.0 / 3.0, 2).unwrap();

        assert_eq!(v.value().unwrap(), DriverValue::Float64(1.0 / 3.0));
        assert_eq!(Float64::null(2).value().unwrap(), DriverValue::Null);
    }

    #[test]
    fn marshal_uses_stored_precision() {
        assert_eq!(marshal(Float64::new(1.01f64, 2).unwrap()), "1.01");
        assert_eq!(marshal(Float64::new(1i32, 2).unwrap()), "1.00");
        assert_eq!(marshal(Float64::new("1.01", 2).unwrap()), "1.01");
        assert_eq!(marshal(Float64::new(1i32, 3).unwrap()), "1.000");
        assert_eq!(marshal(Float64::new(1.26f64, 1).unwrap()), "1.3");
        assert_eq!(marshal(Float64::new(7i64, 0).unwrap()), "7");
        assert_eq!(marshal(Float64::null(2)), "null");
    }

    #[test]
    fn precision_is_clamped() {
        let v = Float64::new(1i32, u32::MAX).unwrap();

        assert_eq!(v.precision(), MAX_PRECISION);
        assert_eq!(Float64::null(u32::MAX).precision(), MAX_PRECISION);
        assert_eq!(marshal(v).len(), 2 + MAX_PRECISION as usize);
    }

    #[test]
    fn extreme_magnitudes_roundtrip() {
        for value in [f64::MAX, -f64::MAX, 1e300, 2f64.powi(60)] {
            let source = Float64::from_f64(value.trunc(), 3).unwrap();
            let bytes = source.marshal_json().unwrap();

            let mut back = Float64::null(3);
            back.unmarshal_json(&bytes).unwrap();
            assert_eq!(back, source);
        }
    }

    #[test]
    fn marshal_never_emits_negative_zero() {
        assert_eq!(marshal(Float64::new(-0.0f64, 2).unwrap()), "0.00");
    }

    #[test]
    fn unmarshal_number_and_null() {
        let mut v = Float64::default();
        v.unmarshal_json(b"1").unwrap();
        assert!(v.is_valid());
        assert_eq!(v.payload(), 1.0);

        v.unmarshal_json(b"null").unwrap();
        assert!(v.is_null());
        assert_eq!(v.payload(), 0.0);
    }

    #[test]
    fn unmarshal_unexpected_value_is_parse_error() {
        let mut v = Float64::from_f64(3.0, 1).unwrap();
        let err = v.unmarshal_json(b"zero").unwrap_err();

        assert_eq!(err.kind(), NullErrorKind::Parse);
        assert!(v.is_null());
        assert_eq!(v.precision(), 1);
    }

    #[test]
    fn equality_includes_precision() {
        let a = Float64::from_f64(1.0, 2).unwrap();
        let b = Float64::from_f64(1.0, 3).unwrap();

        assert_ne!(a, b);
        assert_eq!(a.get(), b.get());
    }

    #[test]
    fn serde_carries_payload() {
        let v = Float64::from_f64(1.5, 2).unwrap();
        assert_eq!(serde_json::to_string(&v).unwrap(), "1.5");
        assert_eq!(serde_json::to_string(&Float64::null(2)).unwrap(), "null");

        let back: Float64 = serde_json::from_str("1.5").unwrap();
        assert_eq!(back.get(), Some(1.5));
        assert_eq!(back.precision(), 0);
    }
}
