//! Transport to the DailyInfo service.
//!
//! The client only depends on [`SoapTransport`]; [`HttpSoapTransport`] is the
//! production implementation posting SOAP 1.1 envelopes with `reqwest`.
//! Timeouts belong to the transport, the client never retries.

pub mod envelope;
mod http;
mod traits;

pub use http::HttpSoapTransport;
pub use traits::SoapTransport;
