//! Nullable scalar values for database and JSON boundaries.
//!
//! Each type holds a canonical payload plus a validity flag, accepts a wide
//! set of inbound representations through [`traits::Scan`], projects itself
//! to a driver value, and renders to / parses from JSON text.

pub mod config;
pub mod driver;
pub mod error;
pub mod json;
pub mod layout;
pub mod scan;
pub mod traits;
pub mod types;

///
/// Prelude
///
/// Domain vocabulary only; errors and configuration stay one level down.
///

pub mod prelude {
    pub use crate::{
        driver::DriverValue,
        layout::TimeLayout,
        scan::ScanValue,
        traits::{DriverValuer, JsonCodec, Scan},
        types::{Float64, Int64, Timestamp, ZeroTimestamp},
    };
}
