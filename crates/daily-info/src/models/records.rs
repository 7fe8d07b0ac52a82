use std::str::FromStr;

use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::errors::{CbrError, Result};

/// One repeating element of a payload: its child elements as
/// `(name, text)` pairs, in document order, names untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: Vec<(String, String)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// First value recorded under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut record = RawRecord::new();
        for (name, value) in iter {
            record.push(name, value);
        }
        record
    }
}

// Serialized as a JSON object in source order.
impl Serialize for RawRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Entry of the currency reference list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyRecord {
    /// Internal code, e.g. `R01235` (`Vcode`)
    pub code: Option<String>,
    /// Russian name (`Vname`)
    pub name: Option<String>,
    /// English name (`VEngname`)
    pub english_name: Option<String>,
    /// Par value the rate is quoted for (`Vnom`)
    pub nominal: Option<Decimal>,
    /// Parent code shared by related currencies (`VcommonCode`)
    pub common_code: Option<String>,
    /// ISO 4217 numeric code (`VnumCode`)
    pub numeric_code: Option<String>,
    /// ISO 4217 letter code (`VcharCode`)
    pub char_code: Option<String>,
}

impl CurrencyRecord {
    pub(crate) fn from_raw(raw: &RawRecord, operation: &str) -> Result<Self> {
        Ok(Self {
            code: text(raw, "Vcode"),
            name: text(raw, "Vname"),
            english_name: text(raw, "VEngname"),
            nominal: decimal(raw, "Vnom", operation)?,
            common_code: text(raw, "VcommonCode"),
            numeric_code: text(raw, "VnumCode"),
            char_code: text(raw, "VcharCode"),
        })
    }
}

/// Official rate of one currency on a date.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRecord {
    /// Internal code (`Vcode`); the service sends the ISO numeric code here
    pub code: Option<String>,
    /// Russian name (`Vname`)
    pub name: Option<String>,
    /// ISO 4217 letter code (`VchCode`)
    pub char_code: Option<String>,
    /// Par value (`Vnom`)
    pub nominal: Option<Decimal>,
    /// Rubles per `nominal` units (`Vcurs`)
    pub rate_value: Option<Decimal>,
}

impl RateRecord {
    pub(crate) fn from_raw(raw: &RawRecord, operation: &str) -> Result<Self> {
        Ok(Self {
            code: text(raw, "Vcode"),
            name: text(raw, "Vname"),
            char_code: text(raw, "VchCode"),
            nominal: decimal(raw, "Vnom", operation)?,
            rate_value: decimal(raw, "Vcurs", operation)?,
        })
    }
}

fn text(raw: &RawRecord, field: &str) -> Option<String> {
    raw.get(field).map(str::to_string)
}

fn decimal(raw: &RawRecord, field: &str, operation: &str) -> Result<Option<Decimal>> {
    match raw.get(field) {
        None | Some("") => Ok(None),
        Some(value) => Decimal::from_str(&value.replace(',', "."))
            .map(Some)
            .map_err(|e| {
                CbrError::malformed(operation, format!("{} is not a number ({}): {}", field, value, e))
            }),
    }
}
