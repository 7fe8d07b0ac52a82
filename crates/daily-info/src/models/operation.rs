use std::fmt;
use std::str::FromStr;

use crate::errors::CbrError;

/// How a remote result is turned into a [`NormalizedResult`](super::NormalizedResult).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Normalization {
    /// The result field itself is the value (a date string).
    Scalar,
    /// Project into [`CurrencyRecord`](super::CurrencyRecord)s.
    Currencies,
    /// Project into [`RateRecord`](super::RateRecord)s.
    Rates,
    /// Keep the source field names as they are.
    PassThrough,
}

/// Static description of one remote operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperationDescriptor {
    /// Symbolic name callers use (`"rate"`).
    pub symbol: &'static str,
    /// Remote operation name (`"GetCursOnDate"`).
    pub remote: &'static str,
    /// Child of `<{remote}Response>` that carries the result.
    pub result_field: &'static str,
    /// Element path below the payload root; the last segment repeats once
    /// per record. Empty for scalar operations.
    pub path: &'static [&'static str],
    pub strategy: Normalization,
}

/// The fixed set of operations the client knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Currency reference list (`EnumValutesXML`).
    Currencies,
    /// Daily rates on a date (`GetCursOnDate`).
    Rate,
    /// Timestamp of the latest published rates (`GetLatestDateTime`).
    LatestUpdate,
    /// Date of the latest published rates, `yyyyMMdd` (`GetLatestDate`).
    LatestDate,
    /// Rate history of one currency (`GetCursDynamic`).
    DynamicRate,
    /// Bi-currency basket composition (`BiCurBase`).
    BicurrencyBasket,
}

const CURRENCIES: OperationDescriptor = OperationDescriptor {
    symbol: "currencies",
    remote: "EnumValutesXML",
    result_field: "EnumValutesXMLResult",
    path: &["EnumValutes"],
    strategy: Normalization::Currencies,
};

const RATE: OperationDescriptor = OperationDescriptor {
    symbol: "rate",
    remote: "GetCursOnDate",
    result_field: "GetCursOnDateResult",
    path: &["ValuteData", "ValuteCursOnDate"],
    strategy: Normalization::Rates,
};

const LATEST_UPDATE: OperationDescriptor = OperationDescriptor {
    symbol: "latest_update",
    remote: "GetLatestDateTime",
    result_field: "GetLatestDateTimeResult",
    path: &[],
    strategy: Normalization::Scalar,
};

const LATEST_DATE: OperationDescriptor = OperationDescriptor {
    symbol: "latest_date",
    remote: "GetLatestDate",
    result_field: "GetLatestDateResult",
    path: &[],
    strategy: Normalization::Scalar,
};

const DYNAMIC_RATE: OperationDescriptor = OperationDescriptor {
    symbol: "dynamic_rate",
    remote: "GetCursDynamic",
    result_field: "GetCursDynamicResult",
    path: &["ValuteData", "ValuteCursDynamic"],
    strategy: Normalization::PassThrough,
};

const BICURRENCY_BASKET: OperationDescriptor = OperationDescriptor {
    symbol: "bicurrency_basket",
    remote: "BiCurBase",
    result_field: "BiCurBaseResult",
    path: &["BiCurBase", "BCB"],
    strategy: Normalization::PassThrough,
};

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::Currencies,
        Operation::Rate,
        Operation::LatestUpdate,
        Operation::LatestDate,
        Operation::DynamicRate,
        Operation::BicurrencyBasket,
    ];

    pub fn descriptor(self) -> &'static OperationDescriptor {
        match self {
            Operation::Currencies => &CURRENCIES,
            Operation::Rate => &RATE,
            Operation::LatestUpdate => &LATEST_UPDATE,
            Operation::LatestDate => &LATEST_DATE,
            Operation::DynamicRate => &DYNAMIC_RATE,
            Operation::BicurrencyBasket => &BICURRENCY_BASKET,
        }
    }

    pub fn symbol(self) -> &'static str {
        self.descriptor().symbol
    }

    pub fn remote(self) -> &'static str {
        self.descriptor().remote
    }
}

impl FromStr for Operation {
    type Err = CbrError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        // "lastest_update" is how older callers spell it
        if name == "lastest_update" {
            return Ok(Operation::LatestUpdate);
        }
        Operation::ALL
            .into_iter()
            .find(|op| op.symbol() == name)
            .ok_or_else(|| CbrError::UnknownOperation(name.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_round_trip() {
        for op in Operation::ALL {
            assert_eq!(op.symbol().parse::<Operation>().unwrap(), op);
        }
    }

    #[test]
    fn test_unknown_operation() {
        let err = "foo".parse::<Operation>().unwrap_err();
        assert!(matches!(err, CbrError::UnknownOperation(ref name) if name == "foo"));
    }

    #[test]
    fn test_symbol_lookup_is_case_sensitive() {
        assert!("Rate".parse::<Operation>().is_err());
        assert!("GetCursOnDate".parse::<Operation>().is_err());
    }

    #[test]
    fn test_legacy_alias() {
        assert_eq!(
            "lastest_update".parse::<Operation>().unwrap(),
            Operation::LatestUpdate
        );
    }

    #[test]
    fn test_result_field_follows_remote_name() {
        for op in Operation::ALL {
            let d = op.descriptor();
            assert_eq!(d.result_field, format!("{}Result", d.remote));
        }
    }

    #[test]
    fn test_scalar_operations_have_no_path() {
        for op in Operation::ALL {
            let d = op.descriptor();
            assert_eq!(d.strategy == Normalization::Scalar, d.path.is_empty());
        }
    }
}
