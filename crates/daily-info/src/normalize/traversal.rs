//! Single-pass extraction of repeating elements from a payload document.
//!
//! The payload of a DailyInfo result is an XML fragment whose interesting
//! part sits at a fixed element path below the root, e.g.
//!
//! ```text
//! <diffgr:diffgram>                 root (any name)
//!   <ValuteData>                    path[0]
//!     <ValuteCursOnDate>            path[1], repeats once per record
//!       <Vname>Доллар США</Vname>   record field
//!       ...
//! ```
//!
//! ADO.NET DataSet results put an `<xs:schema>` sibling in front of the
//! root; top-level `schema` elements are skipped.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::errors::{CbrError, Result};
use crate::models::RawRecord;

/// What the path resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Located {
    /// No element at the path.
    Absent,
    /// Exactly one element: the service does not wrap a lone row.
    One(RawRecord),
    Many(Vec<RawRecord>),
}

impl Located {
    /// Singleton normalization: a lone element becomes a one-element
    /// sequence so sequence-typed operations never return a bare record.
    pub fn into_sequence(self) -> Option<Vec<RawRecord>> {
        match self {
            Located::Absent => None,
            Located::One(record) => Some(vec![record]),
            Located::Many(records) => Some(records),
        }
    }
}

fn local_name(name: &[u8]) -> String {
    String::from_utf8_lossy(name).into_owned()
}

/// Collects every element found at `path` below the document root, in
/// document order. Each record holds the element's children as
/// `(local name, trimmed text)`; attributes and deeper nesting are ignored.
pub fn locate(xml: &str, path: &[&str], operation: &str) -> Result<Located> {
    if path.is_empty() {
        return Err(CbrError::malformed(operation, "empty element path"));
    }
    let record_depth = path.len();
    let field_depth = record_depth + 1;

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<String> = Vec::new();
    let mut records: Vec<RawRecord> = Vec::new();
    let mut current: Option<RawRecord> = None;
    let mut field: Option<(String, String)> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| CbrError::malformed(operation, format!("invalid payload XML: {}", e)))?;
        match event {
            Event::Start(e) => {
                let name = local_name(e.local_name().as_ref());
                if stack.is_empty() && name == "schema" {
                    reader.read_to_end(e.name()).map_err(|e| {
                        CbrError::malformed(operation, format!("invalid payload XML: {}", e))
                    })?;
                    continue;
                }
                if current.is_some() && stack.len() == field_depth {
                    field = Some((name.clone(), String::new()));
                } else if is_record_start(&stack, path, &name) {
                    current = Some(RawRecord::new());
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                let name = local_name(e.local_name().as_ref());
                if let Some(record) = current.as_mut() {
                    if stack.len() == field_depth {
                        record.push(name, "");
                    }
                } else if is_record_start(&stack, path, &name) {
                    records.push(RawRecord::new());
                }
            }
            Event::Text(e) => {
                if let Some((_, text)) = field.as_mut() {
                    if stack.len() == field_depth + 1 {
                        let value = e.unescape().map_err(|e| {
                            CbrError::malformed(operation, format!("invalid text: {}", e))
                        })?;
                        text.push_str(&value);
                    }
                }
            }
            Event::CData(e) => {
                if let Some((_, text)) = field.as_mut() {
                    if stack.len() == field_depth + 1 {
                        text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
            }
            Event::End(_) => {
                stack.pop();
                if stack.len() == field_depth {
                    if let (Some(record), Some((name, text))) = (current.as_mut(), field.take()) {
                        record.push(name, text);
                    }
                } else if stack.len() == record_depth {
                    if let Some(record) = current.take() {
                        records.push(record);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(CbrError::malformed(
            operation,
            format!("unclosed element <{}>", stack.join("/")),
        ));
    }

    Ok(match records.len() {
        0 => Located::Absent,
        1 => Located::One(records.remove(0)),
        _ => Located::Many(records),
    })
}

/// `name` opens a record when the open elements are exactly
/// `root, path[0], .., path[n-2]` and `name == path[n-1]`.
fn is_record_start(stack: &[String], path: &[&str], name: &str) -> bool {
    stack.len() == path.len()
        && stack[1..].iter().zip(path).all(|(open, want)| open == want)
        && path.last().is_some_and(|last| *last == name)
}
