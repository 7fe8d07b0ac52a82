use serde::Serialize;

use super::records::{CurrencyRecord, RateRecord, RawRecord};

/// Output of a normalizer.
///
/// Each operation always produces the same variant (or `Null`), however the
/// service happened to shape the XML. Serializes untagged: `null`, a string,
/// or an array of objects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NormalizedResult {
    /// The service returned no usable payload.
    Null,
    Scalar(String),
    Currencies(Vec<CurrencyRecord>),
    Rates(Vec<RateRecord>),
    /// Records of pass-through operations, source field names preserved.
    Records(Vec<RawRecord>),
}

impl NormalizedResult {
    pub fn is_null(&self) -> bool {
        matches!(self, NormalizedResult::Null)
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            NormalizedResult::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Number of records; a scalar counts as one.
    pub fn len(&self) -> usize {
        match self {
            NormalizedResult::Null => 0,
            NormalizedResult::Scalar(_) => 1,
            NormalizedResult::Currencies(v) => v.len(),
            NormalizedResult::Rates(v) => v.len(),
            NormalizedResult::Records(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
