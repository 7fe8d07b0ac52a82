//! Dispatcher behaviour against a scripted transport.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cbr_daily_info::{
    Arguments, CbrClient, CbrError, NormalizedResult, Operation, ParamValue, RawResponse,
    SoapTransport,
};
use chrono::NaiveDate;
use rust_decimal_macros::dec;

// =========================================================================
// Mock transport
// =========================================================================

#[derive(Clone, Default)]
struct MockTransport {
    replies: Arc<Mutex<HashMap<String, RawResponse>>>,
    calls: Arc<Mutex<Vec<(String, Arguments)>>>,
    fail: Arc<Mutex<bool>>,
}

impl MockTransport {
    fn new() -> Self {
        Self::default()
    }

    fn reply(self, remote: &str, raw: RawResponse) -> Self {
        self.replies.lock().unwrap().insert(remote.to_string(), raw);
        self
    }

    fn set_fail(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    fn calls(&self) -> Vec<(String, Arguments)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SoapTransport for MockTransport {
    async fn invoke(&self, remote: &str, params: &Arguments) -> cbr_daily_info::Result<RawResponse> {
        self.calls
            .lock()
            .unwrap()
            .push((remote.to_string(), params.clone()));
        if *self.fail.lock().unwrap() {
            return Err(CbrError::Transport {
                operation: remote.to_string(),
                message: "connection refused".to_string(),
            });
        }
        Ok(self
            .replies
            .lock()
            .unwrap()
            .get(remote)
            .cloned()
            .unwrap_or_default())
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

const CURRENCIES: &str = r#"<ValuteData>
    <EnumValutes><Vcode>R01235</Vcode><Vname>Доллар США</Vname><VEngname>US Dollar</VEngname><Vnom>1</Vnom><VcommonCode>R01235</VcommonCode><VnumCode>840</VnumCode><VcharCode>USD</VcharCode></EnumValutes>
    <EnumValutes><Vcode>R01239</Vcode><Vname>Евро</Vname><VEngname>Euro</VEngname><Vnom>1</Vnom><VcommonCode>R01239</VcommonCode><VnumCode>978</VnumCode><VcharCode>EUR</VcharCode></EnumValutes>
</ValuteData>"#;

const RATES: &str = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" id="ValuteData"><xs:element name="ValuteData"/></xs:schema>
<diffgr:diffgram xmlns:diffgr="urn:schemas-microsoft-com:xml-diffgram-v1">
  <ValuteData xmlns="">
    <ValuteCursOnDate diffgr:id="ValuteCursOnDate1"><Vname>Доллар США</Vname><Vnom>1</Vnom><Vcurs>89.6883</Vcurs><Vcode>840</Vcode><VchCode>USD</VchCode></ValuteCursOnDate>
    <ValuteCursOnDate diffgr:id="ValuteCursOnDate2"><Vname>Иен</Vname><Vnom>100</Vnom><Vcurs>61.4353</Vcurs><Vcode>392</Vcode><VchCode>JPY</VchCode></ValuteCursOnDate>
  </ValuteData>
</diffgr:diffgram>"#;

const BASKET: &str = r#"<diffgr:diffgram xmlns:diffgr="urn:schemas-microsoft-com:xml-diffgram-v1">
  <BiCurBase xmlns=""><BCB diffgr:id="BCB1"><D0>2024-01-10T00:00:00+03:00</D0><VAL>94.2311</VAL></BCB></BiCurBase>
</diffgr:diffgram>"#;

// =========================================================================
// Dispatch
// =========================================================================

#[tokio::test]
async fn unknown_operation_is_an_error_and_sends_nothing() {
    let transport = MockTransport::new();
    let client = CbrClient::new(transport.clone());

    let err = client.call("foo", Arguments::new()).await.unwrap_err();

    assert!(matches!(err, CbrError::UnknownOperation(ref name) if name == "foo"));
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn call_routes_symbol_to_remote_operation() {
    let transport = MockTransport::new().reply(
        "GetLatestDateTime",
        RawResponse::new().with_field("GetLatestDateTimeResult", "2024-01-15"),
    );
    let client = CbrClient::new(transport.clone());

    let result = client.call("latest_update", Arguments::new()).await.unwrap();

    assert_eq!(result, NormalizedResult::Scalar("2024-01-15".to_string()));
    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "GetLatestDateTime");
}

#[tokio::test]
async fn arguments_are_passed_in_order_and_never_leak() {
    let transport = MockTransport::new();
    let client = CbrClient::new(transport.clone());

    let args = Arguments::new()
        .with("FromDate", date(2024, 1, 1))
        .with("ToDate", date(2024, 1, 31))
        .with("NotARealParam", "x");
    client.call("dynamic_rate", args).await.unwrap();
    client.call("latest_date", Arguments::new()).await.unwrap();

    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    let names: Vec<&str> = calls[0].1.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["FromDate", "ToDate", "NotARealParam"]);
    assert_eq!(calls[1].0, "GetLatestDate");
    assert!(calls[1].1.is_empty());
}

#[tokio::test]
async fn transport_failure_is_distinct_from_no_data() {
    let transport = MockTransport::new();
    let client = CbrClient::new(transport.clone());

    // no reply registered: empty response, no data
    let result = client.invoke(Operation::Rate, Arguments::new()).await.unwrap();
    assert!(result.is_null());

    transport.set_fail(true);
    let err = client.invoke(Operation::Rate, Arguments::new()).await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn exactly_one_round_trip_per_invocation() {
    let transport = MockTransport::new();
    transport.set_fail(true);
    let client = CbrClient::new(transport.clone());

    let _ = client.currencies(false).await;

    assert_eq!(transport.calls().len(), 1);
}

// =========================================================================
// Typed surface
// =========================================================================

#[tokio::test]
async fn currencies_are_projected_in_source_order() {
    let transport = MockTransport::new().reply(
        "EnumValutesXML",
        RawResponse::new().with_field("EnumValutesXMLResult", CURRENCIES),
    );
    let client = CbrClient::new(transport.clone());

    let records = client.currencies(false).await.unwrap().unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name.as_deref(), Some("Доллар США"));
    assert_eq!(records[1].name.as_deref(), Some("Евро"));
    assert_eq!(records[1].char_code.as_deref(), Some("EUR"));
    let seld = transport.calls()[0].1.iter().next().cloned().unwrap();
    assert_eq!(seld.name, "Seld");
    assert_eq!(seld.value, ParamValue::Bool(false));
}

#[tokio::test]
async fn rates_skip_schema_and_keep_nominal() {
    let transport = MockTransport::new().reply(
        "GetCursOnDate",
        RawResponse::new().with_field("GetCursOnDateResult", RATES),
    );
    let client = CbrClient::new(transport.clone());

    let records = client.rate(date(2024, 1, 15)).await.unwrap().unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].char_code.as_deref(), Some("JPY"));
    assert_eq!(records[1].nominal, Some(dec!(100)));
    assert_eq!(records[1].rate_value, Some(dec!(61.4353)));
    let on_date = transport.calls()[0].1.iter().next().cloned().unwrap();
    assert_eq!(on_date.value.to_wire(), "2024-01-15");
}

#[tokio::test]
async fn single_basket_row_is_still_a_sequence() {
    let transport = MockTransport::new().reply(
        "BiCurBase",
        RawResponse::new().with_field("BiCurBaseResult", BASKET),
    );
    let client = CbrClient::new(transport);

    let records = client
        .bicurrency_basket(date(2024, 1, 10), date(2024, 1, 10))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(records.len(), 1);
    let fields: Vec<(&str, &str)> = records[0].fields().collect();
    assert_eq!(fields, vec![("D0", "2024-01-10T00:00:00+03:00"), ("VAL", "94.2311")]);
}

#[tokio::test]
async fn missing_wrapper_yields_none_on_typed_surface() {
    let client = CbrClient::new(MockTransport::new());

    assert!(client.rate(date(2024, 1, 15)).await.unwrap().is_none());
    assert!(client.latest_update().await.unwrap().is_none());
    assert!(client
        .dynamic_rate(date(2024, 1, 1), date(2024, 1, 2), "R01235")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn malformed_payload_is_reported() {
    let transport = MockTransport::new().reply(
        "EnumValutesXML",
        RawResponse::new().with_field("EnumValutesXMLResult", "<ValuteData><EnumValutes>"),
    );
    let client = CbrClient::new(transport);

    let err = client.currencies(true).await.unwrap_err();

    assert!(matches!(err, CbrError::MalformedResponse { .. }));
    assert!(!err.is_transport());
}
