//! DailyInfo data models
//!
//! - `operation` - The fixed operation set and its static descriptors
//! - `arguments` - Call-scoped, ordered operation parameters
//! - `raw` - Response fields as received from the transport
//! - `records` - Flat records produced by the normalizers
//! - `result` - The normalized result returned to callers

mod arguments;
mod operation;
mod raw;
mod records;
mod result;

pub use arguments::{Arguments, Param, ParamValue};
pub use operation::{Normalization, Operation, OperationDescriptor};
pub use raw::{RawField, RawResponse};
pub use records::{CurrencyRecord, RateRecord, RawRecord};
pub use result::NormalizedResult;
