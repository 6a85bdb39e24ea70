// crates/upy-shim-plist/src/parser.rs

use crate::error::PlistError;
use crate::token::{Token, Tokenizer};
use crate::value::{Dictionary, PlistValue};
use alloc::string::String;
use alloc::vec::Vec;
use log::{debug, trace};

/// The DOCTYPE line Apple tools emit. It is removed verbatim before
/// tokenizing; any other DOCTYPE is left for the tokenizer to skip.
pub const APPLE_PLIST_DOCTYPE: &str = "<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">";

/// Parses a complete XML property list document into a `PlistValue` tree.
///
/// The first start tag in the document selects the root production; for a
/// regular document that is `<plist>`, which must wrap exactly one value.
///
/// # Arguments
/// * `xml` - The full document text, e.g. the output of `airport -s -x`.
///
/// # Errors
/// Returns a `PlistError` if tokenizing fails or the token stream violates
/// the plist grammar. No partial tree is ever returned.
pub fn parse(xml: &str) -> Result<PlistValue, PlistError> {
    // 1. Remove the well-known DOCTYPE line.
    let stripped = xml.replace(APPLE_PLIST_DOCTYPE, "");

    // 2. Tokenize and interpret.
    let result = parse_tokens(Tokenizer::new(&stripped));
    if let Err(e) = &result {
        debug!("Plist parsing failed: {}", e);
    }
    result
}

/// Interprets an already tokenized document.
///
/// This is the entry point for callers that bring their own tokenizer; the
/// sequence must follow the contract documented in [`crate::token`].
pub fn parse_tokens<I>(tokens: I) -> Result<PlistValue, PlistError>
where
    I: IntoIterator<Item = Result<Token, PlistError>>,
{
    let mut parser = Parser {
        tokens: tokens.into_iter(),
    };

    // Scan forward to the first start tag; everything before it is prologue.
    while let Some(token) = parser.advance()? {
        if let Token::StartTag(name) = token {
            let value = parser.read_tag(&name)?;
            debug!("Parsed plist document with <{}> root", name);
            // The root tag always yields a value; `read_tag` only returns
            // `None` for attribute tokens, which never reach this point.
            return value.ok_or(PlistError::malformed("no value for root element"));
        }
    }

    Err(PlistError::eof("no root element"))
}

// --- Grammar ---

/// The closed set of tags that may appear in value position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Array,
    Dict,
    True,
    False,
    Integer,
    String,
    Data,
    Plist,
}

impl Tag {
    /// Case-sensitive lookup of a tag name.
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "array" => Some(Tag::Array),
            "dict" => Some(Tag::Dict),
            "true" => Some(Tag::True),
            "false" => Some(Tag::False),
            "integer" => Some(Tag::Integer),
            "string" => Some(Tag::String),
            "data" => Some(Tag::Data),
            "plist" => Some(Tag::Plist),
            _ => None,
        }
    }
}

/// Recursive-descent interpreter over a forward-only token stream.
///
/// Each `read_*` method is entered right after its start tag has been
/// consumed and returns once its matching end tag has been consumed.
struct Parser<I> {
    tokens: I,
}

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Token, PlistError>>,
{
    /// Consumes the next token. `Ok(None)` means the stream is exhausted.
    fn advance(&mut self) -> Result<Option<Token>, PlistError> {
        self.tokens.next().transpose()
    }

    /// Consumes the next token, failing with `UnexpectedEof` if there is none.
    fn expect_token(&mut self, context: &'static str) -> Result<Token, PlistError> {
        self.advance()?.ok_or(PlistError::eof(context))
    }

    /// Dispatches a token in value position.
    ///
    /// Attribute tokens produce no value; start tags select a production.
    fn dispatch(&mut self, token: &Token) -> Result<Option<PlistValue>, PlistError> {
        match token {
            Token::StartTag(name) => self.read_tag(name),
            _ => Ok(None),
        }
    }

    /// Produces the value denoted by a start tag that was just consumed.
    fn read_tag(&mut self, name: &str) -> Result<Option<PlistValue>, PlistError> {
        let tag = Tag::from_name(name).ok_or_else(|| PlistError::UnsupportedTag(name.into()))?;
        trace!("Reading <{}>", name);

        let value = match tag {
            Tag::Array => PlistValue::Array(self.read_array()?),
            Tag::Dict => PlistValue::Dictionary(self.read_dict()?),
            Tag::True | Tag::False => PlistValue::Boolean(self.read_boolean(name)?),
            Tag::Integer | Tag::String | Tag::Data => self.read_scalar(tag, name)?,
            Tag::Plist => self.read_plist()?,
        };
        Ok(Some(value))
    }

    fn read_array(&mut self) -> Result<Vec<PlistValue>, PlistError> {
        let mut items = Vec::new();
        loop {
            match self.expect_token("unterminated <array>")? {
                Token::EndTag(name) if name == "array" => return Ok(items),
                Token::EndTag(_) => return Err(PlistError::malformed("unexpected end tag in <array>")),
                token @ Token::StartTag(_) => {
                    if let Some(value) = self.dispatch(&token)? {
                        items.push(value);
                    }
                }
                Token::Attribute(_) | Token::Text(_) => {}
            }
        }
    }

    fn read_dict(&mut self) -> Result<Dictionary, PlistError> {
        let mut dict = Dictionary::new();
        // Set by <key>, consumed by the value that follows it.
        let mut pending_key: Option<String> = None;

        loop {
            match self.expect_token("unterminated <dict>")? {
                Token::EndTag(name) if name == "dict" => {
                    if let Some(key) = pending_key {
                        trace!("Discarding trailing key {:?} without value", key);
                    }
                    return Ok(dict);
                }
                Token::EndTag(_) => return Err(PlistError::malformed("unexpected end tag in <dict>")),
                Token::StartTag(name) if name == "key" => {
                    if pending_key.is_some() {
                        return Err(PlistError::malformed("nested key"));
                    }
                    pending_key = Some(self.read_key()?);
                }
                token @ Token::StartTag(_) => {
                    let key = pending_key
                        .take()
                        .ok_or(PlistError::malformed("value without key"))?;
                    if let Some(value) = self.dispatch(&token)? {
                        dict.insert(key, value);
                    }
                }
                Token::Attribute(_) | Token::Text(_) => {}
            }
        }
    }

    /// Reads the text of a `<key>` element. Missing text yields an empty key.
    fn read_key(&mut self) -> Result<String, PlistError> {
        let mut text = None;
        loop {
            match self.expect_token("unterminated <key>")? {
                Token::EndTag(name) if name == "key" => return Ok(text.unwrap_or_default()),
                Token::Text(s) => text = Some(s),
                _ => {}
            }
        }
    }

    /// Booleans must be self-closing: the next token is the matching end tag.
    fn read_boolean(&mut self, name: &str) -> Result<bool, PlistError> {
        match self.expect_token("unterminated boolean")? {
            Token::EndTag(end) if end == name => Ok(name == "true"),
            _ => Err(PlistError::malformed("boolean element must be empty")),
        }
    }

    /// Reads `<integer>`, `<string>` or `<data>`. Only the last text token counts.
    fn read_scalar(&mut self, tag: Tag, name: &str) -> Result<PlistValue, PlistError> {
        let mut text: Option<String> = None;
        loop {
            match self.expect_token("unterminated scalar element")? {
                Token::EndTag(end) if end == name => return finish_scalar(tag, text),
                Token::EndTag(_) => {
                    return Err(PlistError::malformed("unexpected end tag in scalar element"));
                }
                Token::Text(s) => text = Some(s),
                Token::StartTag(_) | Token::Attribute(_) => {}
            }
        }
    }

    /// Reads the single value wrapped by `<plist>`.
    fn read_plist(&mut self) -> Result<PlistValue, PlistError> {
        let mut root: Option<PlistValue> = None;
        loop {
            match self.expect_token("unterminated <plist>")? {
                Token::EndTag(name) if name == "plist" => {
                    return root.ok_or(PlistError::malformed("no value in <plist>"));
                }
                Token::EndTag(_) => return Err(PlistError::malformed("unexpected end tag in <plist>")),
                token @ Token::StartTag(_) => {
                    if root.is_some() {
                        return Err(PlistError::malformed("multiple root values"));
                    }
                    root = self.dispatch(&token)?;
                }
                Token::Attribute(_) | Token::Text(_) => {}
            }
        }
    }
}

/// Converts the collected text of a scalar element into its value.
fn finish_scalar(tag: Tag, text: Option<String>) -> Result<PlistValue, PlistError> {
    match tag {
        Tag::Integer => {
            let text = text.ok_or(PlistError::InvalidNumber(None))?;
            text.trim()
                .parse::<i64>()
                .map(PlistValue::Integer)
                .map_err(|_| PlistError::InvalidNumber(Some(text)))
        }
        Tag::Data => Ok(PlistValue::Data(text.unwrap_or_default())),
        _ => Ok(PlistValue::String(text.unwrap_or_default())),
    }
}
