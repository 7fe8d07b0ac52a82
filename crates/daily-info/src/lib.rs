//! Bank of Russia DailyInfo Client
//!
//! Exposes the currency-exchange queries of the `DailyInfo` SOAP service and
//! turns their irregular XML results into flat records.
//!
//! # Architecture
//!
//! ```text
//! caller ──> CbrClient::call / typed methods     (operation dispatch)
//!                 │  Operation + Arguments
//!                 v
//!            SoapTransport::invoke               (one HTTP round trip)
//!                 │  RawResponse
//!                 v
//!            normalize::normalize                (per-operation normalizer)
//!                 │
//!                 v
//!            NormalizedResult                    (Null | Scalar | records)
//! ```
//!
//! # Operations
//!
//! | symbol | remote | result |
//! |---|---|---|
//! | `currencies` | `EnumValutesXML` | [`CurrencyRecord`]s |
//! | `rate` | `GetCursOnDate` | [`RateRecord`]s |
//! | `latest_update` | `GetLatestDateTime` | scalar |
//! | `latest_date` | `GetLatestDate` | scalar |
//! | `dynamic_rate` | `GetCursDynamic` | [`RawRecord`]s |
//! | `bicurrency_basket` | `BiCurBase` | [`RawRecord`]s |
//!
//! `dynamic_rate` and `bicurrency_basket` keep the service's field names.

pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod normalize;
pub mod transport;

pub use client::CbrClient;
pub use config::CbrConfig;
pub use errors::{CbrError, Result};
pub use models::{
    Arguments, CurrencyRecord, Normalization, NormalizedResult, Operation, OperationDescriptor,
    Param, ParamValue, RateRecord, RawField, RawRecord, RawResponse,
};
pub use transport::{HttpSoapTransport, SoapTransport};
