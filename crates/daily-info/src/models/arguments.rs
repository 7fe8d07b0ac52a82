use chrono::{NaiveDate, NaiveDateTime};

/// Value of a single operation parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Bool(bool),
    Integer(i64),
}

impl ParamValue {
    /// Text as it goes on the wire (`xs:date`/`xs:dateTime`/`xs:boolean` lexical forms).
    pub fn to_wire(&self) -> String {
        match self {
            ParamValue::Text(s) => s.clone(),
            ParamValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            ParamValue::DateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::Integer(i) => i.to_string(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<NaiveDate> for ParamValue {
    fn from(value: NaiveDate) -> Self {
        ParamValue::Date(value)
    }
}

impl From<NaiveDateTime> for ParamValue {
    fn from(value: NaiveDateTime) -> Self {
        ParamValue::DateTime(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

/// A named operation parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub value: ParamValue,
}

/// Ordered parameter list for one invocation.
///
/// Owned by a single call and moved into it, so parameters can never carry
/// over to the next invocation. Names are passed through unchecked; the
/// remote side decides what it accepts.
///
/// ```
/// use cbr_daily_info::Arguments;
/// use chrono::NaiveDate;
///
/// let args = Arguments::new()
///     .with("FromDate", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
///     .with("ValutaCode", "R01235");
/// assert_eq!(args.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Arguments {
    params: Vec<Param>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.params.push(Param {
            name: name.into(),
            value: value.into(),
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        self.params.iter()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl<N, V> FromIterator<(N, V)> for Arguments
where
    N: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut args = Arguments::new();
        for (name, value) in iter {
            args.push(name, value);
        }
        args
    }
}
