// crates/upy-shim-plist/src/error.rs

use alloc::fmt;
use alloc::string::String;
use quick_xml::Error as XmlError;
use quick_xml::encoding::EncodingError;
use quick_xml::events::attributes::AttrError;

/// Errors that can occur while tokenizing, parsing or writing a plist.
///
/// Every variant is terminal for the current `parse` call: the parser never
/// returns a partially built tree.
#[derive(Debug)]
pub enum PlistError {
    /// The token sequence ran out while a grammar rule still expected more
    /// tokens (e.g., a `<dict>` without its closing tag).
    UnexpectedEof { context: &'static str },

    /// A structural plist rule was violated (mismatched end tag, value
    /// without key, nested key, multiple root values, ...).
    MalformedDocument { reason: &'static str },

    /// A start tag in value position whose name is outside the plist grammar.
    UnsupportedTag(String),

    /// An `<integer>` element whose content is missing or not a base-10 integer.
    /// Carries the offending text, if any.
    InvalidNumber(Option<String>),

    /// A lexical error from the underlying `quick-xml` reader or writer.
    Xml(XmlError),

    /// An error occurred during string formatting.
    FmtError(fmt::Error),
}

impl PlistError {
    pub(crate) fn eof(context: &'static str) -> Self {
        PlistError::UnexpectedEof { context }
    }

    pub(crate) fn malformed(reason: &'static str) -> Self {
        PlistError::MalformedDocument { reason }
    }
}

impl From<XmlError> for PlistError {
    fn from(e: XmlError) -> Self {
        PlistError::Xml(e)
    }
}

impl From<EncodingError> for PlistError {
    fn from(e: EncodingError) -> Self {
        PlistError::Xml(XmlError::Encoding(e))
    }
}

impl From<AttrError> for PlistError {
    fn from(e: AttrError) -> Self {
        PlistError::Xml(XmlError::InvalidAttr(e))
    }
}

impl From<fmt::Error> for PlistError {
    fn from(e: fmt::Error) -> Self {
        PlistError::FmtError(e)
    }
}

impl fmt::Display for PlistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlistError::UnexpectedEof { context } => {
                write!(f, "Unexpected end of document: {}", context)
            }
            PlistError::MalformedDocument { reason } => {
                write!(f, "Malformed plist document: {}", reason)
            }
            PlistError::UnsupportedTag(name) => write!(f, "Unsupported plist tag: <{}>", name),
            PlistError::InvalidNumber(Some(text)) => {
                write!(f, "Invalid integer literal: {:?}", text)
            }
            PlistError::InvalidNumber(None) => write!(f, "Missing integer content"),
            PlistError::Xml(e) => write!(f, "XML error: {}", e),
            PlistError::FmtError(e) => write!(f, "Formatting error: {}", e),
        }
    }
}

impl core::error::Error for PlistError {}

#[cfg(test)]
mod tests {
    use super::PlistError;
    use alloc::string::ToString;

    #[test]
    fn test_from_xml_error() {
        let xml_err = quick_xml::Error::Syntax(quick_xml::errors::SyntaxError::UnclosedTag);
        let plist_err: PlistError = xml_err.into();
        assert!(matches!(plist_err, PlistError::Xml(_)));
    }

    #[test]
    fn test_from_fmt_error() {
        let plist_err: PlistError = core::fmt::Error.into();
        assert!(matches!(plist_err, PlistError::FmtError(_)));
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            PlistError::eof("no root element").to_string(),
            "Unexpected end of document: no root element"
        );
        assert_eq!(
            PlistError::malformed("nested key").to_string(),
            "Malformed plist document: nested key"
        );
        assert_eq!(
            PlistError::UnsupportedTag("date".into()).to_string(),
            "Unsupported plist tag: <date>"
        );
        assert_eq!(
            PlistError::InvalidNumber(Some("4x".into())).to_string(),
            "Invalid integer literal: \"4x\""
        );
        assert_eq!(PlistError::InvalidNumber(None).to_string(), "Missing integer content");
    }
}
