// =============================================================================
// Page model
// =============================================================================

/// A parsed source document, ready for templating.
///
/// A page has no identity beyond its two fields; it is a plain value
/// produced from one document's raw bytes and dropped once rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// First line of the document, verbatim
    pub title: String,
    /// Everything after the first line break, trimmed of surrounding
    /// whitespace
    pub body: String,
}

impl Page {
    /// Split raw document bytes into a page.
    ///
    /// The title is everything before the first `\n` and is never trimmed,
    /// so a CRLF document keeps its `\r` in the title. The body is the
    /// remainder with leading and trailing whitespace removed. A document
    /// without a line break is all title; an empty document yields an
    /// empty page.
    ///
    /// Parsing cannot fail. Bytes that are not valid UTF-8 are replaced
    /// with U+FFFD rather than rejected.
    pub fn parse(raw: &[u8]) -> Self {
        let content = String::from_utf8_lossy(raw);

        match content.split_once('\n') {
            Some((title, rest)) => Self {
                title: title.to_string(),
                body: rest.trim().to_string(),
            },
            None => Self {
                title: content.into_owned(),
                body: String::new(),
            },
        }
    }
}
