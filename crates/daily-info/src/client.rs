//! Operation dispatcher and the public operation surface.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::CbrConfig;
use crate::errors::Result;
use crate::models::{
    Arguments, CurrencyRecord, NormalizedResult, Operation, RateRecord, RawRecord,
};
use crate::normalize::normalize;
use crate::transport::{HttpSoapTransport, SoapTransport};

/// Client for the DailyInfo service.
///
/// Holds no per-call state: arguments are moved into each call, so one
/// client can serve concurrent callers.
///
/// ```ignore
/// use cbr_daily_info::CbrClient;
///
/// let client = CbrClient::from_config(&CbrConfig::from_env()?);
/// let rates = client.rate(chrono::Local::now().date_naive()).await?;
/// ```
pub struct CbrClient<T: SoapTransport = HttpSoapTransport> {
    transport: T,
}

impl CbrClient<HttpSoapTransport> {
    pub fn from_config(config: &CbrConfig) -> Self {
        Self::new(HttpSoapTransport::new(config))
    }
}

impl<T: SoapTransport> CbrClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Invokes an operation by its symbolic name (`"rate"`, `"currencies"`, ...).
    pub async fn call(&self, name: &str, args: Arguments) -> Result<NormalizedResult> {
        let operation = name.parse::<Operation>().inspect_err(|e| {
            warn!("DailyInfo dispatch rejected: {}", e);
        })?;
        self.invoke(operation, args).await
    }

    /// One round trip for `operation`, normalized. Failures are logged and
    /// returned; `Ok(NormalizedResult::Null)` means the service had no data.
    pub async fn invoke(&self, operation: Operation, args: Arguments) -> Result<NormalizedResult> {
        let descriptor = operation.descriptor();
        let raw = self
            .transport
            .invoke(descriptor.remote, &args)
            .await
            .inspect_err(|e| warn!("DailyInfo {} failed: {}", operation, e))?;
        let result = normalize(descriptor, &raw)
            .inspect_err(|e| warn!("DailyInfo {} returned an unreadable payload: {}", operation, e))?;
        debug!("DailyInfo {} normalized to {} record(s)", operation, result.len());
        Ok(result)
    }

    /// Currency reference list. `monthly` selects currencies quoted monthly
    /// instead of daily (`Seld`).
    pub async fn currencies(&self, monthly: bool) -> Result<Option<Vec<CurrencyRecord>>> {
        let args = Arguments::new().with("Seld", monthly);
        match self.invoke(Operation::Currencies, args).await? {
            NormalizedResult::Currencies(records) => Ok(Some(records)),
            _ => Ok(None),
        }
    }

    /// Official rates on `on_date`.
    pub async fn rate(&self, on_date: NaiveDate) -> Result<Option<Vec<RateRecord>>> {
        let args = Arguments::new().with("On_date", on_date);
        match self.invoke(Operation::Rate, args).await? {
            NormalizedResult::Rates(records) => Ok(Some(records)),
            _ => Ok(None),
        }
    }

    /// Timestamp of the latest published rates.
    pub async fn latest_update(&self) -> Result<Option<String>> {
        self.scalar(Operation::LatestUpdate).await
    }

    /// Date of the latest published rates as `yyyyMMdd`.
    pub async fn latest_date(&self) -> Result<Option<String>> {
        self.scalar(Operation::LatestDate).await
    }

    /// Daily rates of one currency (`code` as in [`CurrencyRecord::code`])
    /// between two dates, inclusive.
    pub async fn dynamic_rate(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        code: &str,
    ) -> Result<Option<Vec<RawRecord>>> {
        let args = Arguments::new()
            .with("FromDate", from)
            .with("ToDate", to)
            .with("ValutaCode", code);
        self.records(Operation::DynamicRate, args).await
    }

    /// Bi-currency basket values between two dates, inclusive.
    pub async fn bicurrency_basket(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Option<Vec<RawRecord>>> {
        let args = Arguments::new().with("fromDate", from).with("ToDate", to);
        self.records(Operation::BicurrencyBasket, args).await
    }

    async fn scalar(&self, operation: Operation) -> Result<Option<String>> {
        match self.invoke(operation, Arguments::new()).await? {
            NormalizedResult::Scalar(value) => Ok(Some(value)),
            _ => Ok(None),
        }
    }

    async fn records(&self, operation: Operation, args: Arguments) -> Result<Option<Vec<RawRecord>>> {
        match self.invoke(operation, args).await? {
            NormalizedResult::Records(records) => Ok(Some(records)),
            _ => Ok(None),
        }
    }
}
