use crate::{driver::DriverValue, error::NullError, scan::ScanValue};

///
/// Scan
///
/// Inbound coercion from whatever a driver returns for a column.
/// Every call fully overwrites payload and validity; on error the receiver
/// is left null with a zero payload.
///

pub trait Scan {
    fn scan_value(&mut self, src: ScanValue<'_>) -> Result<(), NullError>;

    fn scan<'a>(&mut self, src: impl Into<ScanValue<'a>>) -> Result<(), NullError>
    where
        Self: Sized,
    {
        self.scan_value(src.into())
    }
}

///
/// DriverValuer
///
/// Outbound projection to a driver parameter. Implementations in this crate
/// never fail; the error channel is kept for custom wrappers.
///

pub trait DriverValuer {
    fn value(&self) -> Result<DriverValue, NullError>;
}

///
/// JsonCodec
///
/// Raw JSON text rendering and parsing of a single scalar.
/// `unmarshal_json(marshal_json(v))` reproduces `v` for every value that
/// renders without error.
///

pub trait JsonCodec {
    fn marshal_json(&self) -> Result<Vec<u8>, NullError>;

    fn unmarshal_json(&mut self, bytes: &[u8]) -> Result<(), NullError>;
}
