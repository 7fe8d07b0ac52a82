//! Response normalizers.
//!
//! Every operation runs the same steps, parameterized by its
//! [`OperationDescriptor`]:
//!
//! 1. Look for the result field (`{Remote}Result`) in the raw response.
//!    Missing or empty means "no payload" and yields [`NormalizedResult::Null`].
//! 2. Scalar operations return the field's text directly.
//! 3. Otherwise parse the field's inner XML and collect the repeating
//!    elements at the descriptor's path ([`locate`]). An unresolved path is
//!    also `Null`; XML that cannot be parsed is a `MalformedResponse` error.
//! 4. Apply singleton normalization ([`Located::into_sequence`]).
//! 5. Project each element with the operation's field map, or keep it as a
//!    [`RawRecord`] for pass-through operations. Source order is preserved.

mod traversal;

pub use traversal::{locate, Located};

use crate::errors::Result;
use crate::models::{
    CurrencyRecord, Normalization, NormalizedResult, Operation, OperationDescriptor, RateRecord,
    RawRecord, RawResponse,
};

/// Normalizes `raw` according to the descriptor's strategy.
pub fn normalize(descriptor: &OperationDescriptor, raw: &RawResponse) -> Result<NormalizedResult> {
    match descriptor.strategy {
        Normalization::Scalar => Ok(scalar_with(descriptor, raw)),
        Normalization::Currencies => {
            project(descriptor, raw, CurrencyRecord::from_raw, NormalizedResult::Currencies)
        }
        Normalization::Rates => project(descriptor, raw, RateRecord::from_raw, NormalizedResult::Rates),
        Normalization::PassThrough => Ok(match sequence(descriptor, raw)? {
            Some(records) => NormalizedResult::Records(records),
            None => NormalizedResult::Null,
        }),
    }
}

/// `EnumValutesXML` -> [`NormalizedResult::Currencies`].
pub fn currencies(raw: &RawResponse) -> Result<NormalizedResult> {
    normalize(Operation::Currencies.descriptor(), raw)
}

/// `GetCursOnDate` -> [`NormalizedResult::Rates`].
pub fn rates(raw: &RawResponse) -> Result<NormalizedResult> {
    normalize(Operation::Rate.descriptor(), raw)
}

/// `GetLatestDateTime` -> [`NormalizedResult::Scalar`].
pub fn latest_update(raw: &RawResponse) -> NormalizedResult {
    scalar_with(Operation::LatestUpdate.descriptor(), raw)
}

/// `GetLatestDate` -> [`NormalizedResult::Scalar`].
pub fn latest_date(raw: &RawResponse) -> NormalizedResult {
    scalar_with(Operation::LatestDate.descriptor(), raw)
}

/// `GetCursDynamic` -> [`NormalizedResult::Records`].
pub fn dynamic_rates(raw: &RawResponse) -> Result<NormalizedResult> {
    normalize(Operation::DynamicRate.descriptor(), raw)
}

/// `BiCurBase` -> [`NormalizedResult::Records`].
pub fn bicurrency_basket(raw: &RawResponse) -> Result<NormalizedResult> {
    normalize(Operation::BicurrencyBasket.descriptor(), raw)
}

fn scalar_with(descriptor: &OperationDescriptor, raw: &RawResponse) -> NormalizedResult {
    match raw.text(descriptor.result_field) {
        Some(value) => NormalizedResult::Scalar(value),
        None => NormalizedResult::Null,
    }
}

fn sequence(descriptor: &OperationDescriptor, raw: &RawResponse) -> Result<Option<Vec<RawRecord>>> {
    let Some(payload) = raw.any(descriptor.result_field) else {
        return Ok(None);
    };
    Ok(locate(payload, descriptor.path, descriptor.remote)?.into_sequence())
}

fn project<T>(
    descriptor: &OperationDescriptor,
    raw: &RawResponse,
    map: fn(&RawRecord, &str) -> Result<T>,
    wrap: fn(Vec<T>) -> NormalizedResult,
) -> Result<NormalizedResult> {
    let Some(records) = sequence(descriptor, raw)? else {
        return Ok(NormalizedResult::Null);
    };
    let projected = records
        .iter()
        .map(|record| map(record, descriptor.remote))
        .collect::<Result<Vec<T>>>()?;
    Ok(wrap(projected))
}
