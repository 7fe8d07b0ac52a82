//! SOAP 1.1 envelope encoding and decoding.

use std::fmt::Write;

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::errors::{CbrError, Result};
use crate::models::{Arguments, RawResponse};

const ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Builds the request envelope: one child element per parameter, in order.
pub fn build_request(namespace: &str, remote: &str, args: &Arguments) -> String {
    let mut params = String::new();
    for param in args.iter() {
        let _ = write!(
            params,
            "<{name}>{value}</{name}>",
            name = param.name,
            value = escape(param.value.to_wire().as_str())
        );
    }
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="utf-8"?>"#,
            r#"<soap:Envelope xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" "#,
            r#"xmlns:xsd="http://www.w3.org/2001/XMLSchema" xmlns:soap="{envelope}">"#,
            r#"<soap:Body><{remote} xmlns="{namespace}">{params}</{remote}></soap:Body>"#,
            r#"</soap:Envelope>"#
        ),
        envelope = ENVELOPE_NS,
        remote = remote,
        namespace = escape(namespace),
        params = params
    )
}

fn xml_error(remote: &str, e: impl std::fmt::Display) -> CbrError {
    CbrError::malformed(remote, format!("invalid envelope: {}", e))
}

/// Extracts the children of `<{remote}Response>` from a reply envelope.
///
/// A SOAP Fault anywhere in the body is returned as [`CbrError::Fault`].
pub fn parse_response(remote: &str, body: &str) -> Result<RawResponse> {
    let response_name = format!("{}Response", remote);
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event().map_err(|e| xml_error(remote, e))? {
            Event::Start(e) => {
                let name = e.local_name();
                if name.as_ref() == b"Fault" {
                    return Err(read_fault(&mut reader, remote)?);
                }
                if name.as_ref() == response_name.as_bytes() {
                    return read_fields(&mut reader, remote);
                }
            }
            Event::Empty(e) if e.local_name().as_ref() == response_name.as_bytes() => {
                return Ok(RawResponse::new());
            }
            Event::Eof => {
                return Err(CbrError::malformed(
                    remote,
                    format!("missing <{}> in reply", response_name),
                ))
            }
            _ => {}
        }
    }
}

fn read_fields(reader: &mut Reader<&[u8]>, remote: &str) -> Result<RawResponse> {
    let mut raw = RawResponse::new();
    loop {
        match reader.read_event().map_err(|e| xml_error(remote, e))? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                let content = reader
                    .read_text(e.name())
                    .map_err(|e| xml_error(remote, e))?;
                raw.push(name, content.into_owned());
            }
            Event::Empty(e) => {
                raw.push(String::from_utf8_lossy(e.local_name().as_ref()), "");
            }
            Event::End(_) => return Ok(raw),
            Event::Eof => return Err(CbrError::malformed(remote, "truncated reply")),
            _ => {}
        }
    }
}

// SOAP 1.1 uses faultcode/faultstring, SOAP 1.2 Code/Value and Reason/Text.
fn read_fault(reader: &mut Reader<&[u8]>, remote: &str) -> Result<CbrError> {
    let mut code = String::new();
    let mut message = String::new();
    let mut current: Option<String> = None;
    let mut depth = 0usize;
    loop {
        match reader.read_event().map_err(|e| xml_error(remote, e))? {
            Event::Start(e) => {
                depth += 1;
                current = Some(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Event::Text(t) => {
                let text = t.unescape().map_err(|e| xml_error(remote, e))?;
                match current.as_deref() {
                    Some("faultcode") | Some("Value") if code.is_empty() => code.push_str(&text),
                    Some("faultstring") | Some("Text") if message.is_empty() => {
                        message.push_str(&text)
                    }
                    _ => {}
                }
            }
            Event::End(_) => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                current = None;
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(CbrError::Fault {
        operation: remote.to_string(),
        code,
        message,
    })
}
