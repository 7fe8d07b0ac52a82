use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{Arguments, RawResponse};

/// One request/response round trip to the remote service.
///
/// Implementations send `remote` with `params` exactly as given (names are
/// not checked) and return the fields of the operation's response element.
/// Network and protocol failures are reported as transport-class
/// [`CbrError`](crate::errors::CbrError)s.
#[async_trait]
pub trait SoapTransport: Send + Sync {
    async fn invoke(&self, remote: &str, params: &Arguments) -> Result<RawResponse>;
}
