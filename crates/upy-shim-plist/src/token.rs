// crates/upy-shim-plist/src/token.rs

//! Lexical tokens consumed by the plist parser, and a tokenizer that produces
//! them from XML text using `quick-xml`.
//!
//! The token contract is deliberately small:
//! - empty elements (`<true/>`) arrive as a `StartTag` immediately followed by
//!   the matching `EndTag`,
//! - the attributes of a start tag follow it as `Attribute` tokens,
//! - character data between two tags arrives as at most one `Text` token.

use crate::error::PlistError;
use alloc::collections::VecDeque;
use alloc::string::String;
use quick_xml::Error as XmlError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

/// A single lexical event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    StartTag(String),
    EndTag(String),
    Attribute(Attribute),
    Text(String),
}

/// An attribute on a start tag. The plist grammar ignores these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Forward-only token stream over an XML string.
///
/// Yields `Err(PlistError::Xml(_))` once on a lexical error and then ends.
pub struct Tokenizer<'a> {
    reader: Reader<&'a [u8]>,
    /// Tokens produced by the last event but not yet handed out.
    queue: VecDeque<Token>,
    /// Character data accumulated since the last tag.
    text: Option<String>,
    done: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(xml: &'a str) -> Self {
        let mut reader = Reader::from_str(xml);
        let config = reader.config_mut();
        config.expand_empty_elements = true;
        // End-tag mismatches are a plist grammar error and are reported by the parser.
        config.check_end_names = false;

        Self {
            reader,
            queue: VecDeque::new(),
            text: None,
            done: false,
        }
    }

    /// Reads one XML event and converts it into zero or more queued tokens.
    fn fill(&mut self) -> Result<(), PlistError> {
        match self.reader.read_event()? {
            Event::Start(e) => {
                self.flush_text();
                self.push_start(&e)?;
            }
            Event::Empty(e) => {
                // Only reachable if empty-element expansion is ever turned off.
                self.flush_text();
                self.push_start(&e)?;
                let name = self.decode(e.name().as_ref())?;
                self.queue.push_back(Token::EndTag(name));
            }
            Event::End(e) => {
                self.flush_text();
                let name = self.decode(e.name().as_ref())?;
                self.queue.push_back(Token::EndTag(name));
            }
            Event::Text(e) => {
                let text = self.decode(&e)?;
                self.append_text(&text);
            }
            Event::CData(e) => {
                let text = self.decode(&e)?;
                self.append_text(&text);
            }
            Event::GeneralRef(e) => {
                let name = self.decode(&e)?;
                let mut reference = String::with_capacity(name.len() + 2);
                reference.push('&');
                reference.push_str(&name);
                reference.push(';');
                let resolved = quick_xml::escape::unescape(&reference)
                    .map_err(|e| PlistError::Xml(XmlError::Escape(e)))?;
                self.append_text(&resolved);
            }
            Event::Eof => {
                self.flush_text();
                self.done = true;
            }
            // Declarations, processing instructions, comments and DOCTYPEs carry no plist data.
            _ => {}
        }
        Ok(())
    }

    fn push_start(&mut self, e: &BytesStart<'_>) -> Result<(), PlistError> {
        let name = self.decode(e.name().as_ref())?;
        self.queue.push_back(Token::StartTag(name));

        for attr in e.attributes() {
            let attr = attr?;
            let name = self.decode(attr.key.as_ref())?;
            let raw = self.decode(&attr.value)?;
            let value = quick_xml::escape::unescape(&raw)
                .map_err(|e| PlistError::Xml(XmlError::Escape(e)))?
                .into_owned();
            self.queue
                .push_back(Token::Attribute(Attribute { name, value }));
        }
        Ok(())
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, PlistError> {
        Ok(self.reader.decoder().decode(bytes)?.into_owned())
    }

    fn append_text(&mut self, text: &str) {
        self.text.get_or_insert_with(String::new).push_str(text);
    }

    /// Emits the accumulated character data, unless it is only indentation.
    fn flush_text(&mut self) {
        if let Some(text) = self.text.take() {
            if !text.trim().is_empty() {
                self.queue.push_back(Token::Text(text));
            }
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token, PlistError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.queue.pop_front() {
                return Some(Ok(token));
            }
            if self.done {
                return None;
            }
            if let Err(e) = self.fill() {
                self.done = true;
                return Some(Err(e));
            }
        }
    }
}

/// Tokenizes `xml` eagerly. Mostly useful for inspecting the token stream.
pub fn tokenize(xml: &str) -> Result<alloc::vec::Vec<Token>, PlistError> {
    Tokenizer::new(xml).collect()
}
