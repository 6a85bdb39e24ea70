// src/lib.rs

#![no_std]
#![doc = "Parses and writes XML property list (plist) documents."]
#![doc = ""]
#![doc = "This `no_std + alloc` library turns the XML plists produced by tools such as"]
#![doc = "`airport -s -x` into a typed `PlistValue` tree by recursive descent over a"]
#![doc = "forward-only token stream, with strict structural validation."]
#![doc = ""]
#![doc = "It supports:"]
#![doc = "- `parse`: Parsing a complete XML document (via the `quick-xml` tokenizer)."]
#![doc = "- `parse_tokens`: Parsing a token stream produced by any other tokenizer."]
#![doc = "- `to_xml_string`: Writing a tree back out as a minimal plist document."]

extern crate alloc;

// --- Crate Modules ---

mod error;
mod parser;
pub mod token;
mod value;
mod writer;

// --- Public API Re-exports ---

pub use error::PlistError;
pub use parser::{APPLE_PLIST_DOCTYPE, parse, parse_tokens};
pub use token::{Token, Tokenizer};
pub use value::{Dictionary, Iter, PlistValue};
pub use writer::to_xml_string;
