use std::borrow::Cow;

use quick_xml::escape::unescape;

/// One child element of `<{Remote}Response>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawField {
    pub name: String,
    /// Inner markup of the element exactly as received (still escaped).
    pub content: String,
}

/// Not-yet-normalized reply of one remote operation.
///
/// Field names are local names; namespace prefixes are dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawResponse {
    fields: Vec<RawField>,
}

impl RawResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.push(name, content);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.fields.push(RawField {
            name: name.into(),
            content: content.into(),
        });
    }

    pub fn field(&self, name: &str) -> Option<&RawField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn fields(&self) -> &[RawField] {
        &self.fields
    }

    /// Unescaped text of a field that carries a simple value.
    ///
    /// `None` when the field is missing, empty, or holds element content.
    pub fn text(&self, name: &str) -> Option<String> {
        let content = self.field(name)?.content.trim();
        if content.is_empty() || content.starts_with('<') {
            return None;
        }
        Some(
            unescape(content)
                .unwrap_or(Cow::Borrowed(content))
                .into_owned(),
        )
    }

    /// Inner markup of a field that holds element content (SOAP `any`).
    pub fn any(&self, name: &str) -> Option<&str> {
        let content = self.field(name)?.content.trim();
        content.starts_with('<').then_some(content)
    }
}
