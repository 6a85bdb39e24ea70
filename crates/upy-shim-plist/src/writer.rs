// crates/upy-shim-plist/src/writer.rs

//! Serializes `PlistValue` trees back into XML property list text.
//!
//! The output is the minimal document `parse` accepts: declaration, the Apple
//! DOCTYPE line and a `<plist version="1.0">` wrapper, indented with tabs.

use crate::error::PlistError;
use crate::parser::APPLE_PLIST_DOCTYPE;
use crate::value::PlistValue;
use alloc::string::String;
use core::fmt::Write;
use quick_xml::escape::escape;

/// Serializes `value` into a complete XML plist document.
///
/// Booleans are written as empty elements and all text is escaped. Strings
/// made only of whitespace do not survive a round trip, since the tokenizer
/// drops whitespace-only character data.
///
/// # Errors
/// Returns `PlistError::FmtError` if writing into the buffer fails.
pub fn to_xml_string(value: &PlistValue) -> Result<String, PlistError> {
    let mut buffer = String::new();
    write!(buffer, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n")?;
    write!(buffer, "{}\n", APPLE_PLIST_DOCTYPE)?;
    write!(buffer, "<plist version=\"1.0\">\n")?;
    write_value(&mut buffer, value, 0)?;
    write!(buffer, "</plist>\n")?;
    Ok(buffer)
}

fn write_value(buffer: &mut String, value: &PlistValue, depth: usize) -> Result<(), PlistError> {
    indent(buffer, depth)?;
    match value {
        PlistValue::Dictionary(dict) => {
            if dict.is_empty() {
                write!(buffer, "<dict/>\n")?;
                return Ok(());
            }
            write!(buffer, "<dict>\n")?;
            for (key, item) in dict {
                indent(buffer, depth + 1)?;
                write!(buffer, "<key>{}</key>\n", escape(key))?;
                write_value(buffer, item, depth + 1)?;
            }
            indent(buffer, depth)?;
            write!(buffer, "</dict>\n")?;
        }
        PlistValue::Array(items) => {
            if items.is_empty() {
                write!(buffer, "<array/>\n")?;
                return Ok(());
            }
            write!(buffer, "<array>\n")?;
            for item in items {
                write_value(buffer, item, depth + 1)?;
            }
            indent(buffer, depth)?;
            write!(buffer, "</array>\n")?;
        }
        PlistValue::String(s) => write!(buffer, "<string>{}</string>\n", escape(s.as_str()))?,
        PlistValue::Integer(i) => write!(buffer, "<integer>{}</integer>\n", i)?,
        PlistValue::Boolean(true) => write!(buffer, "<true/>\n")?,
        PlistValue::Boolean(false) => write!(buffer, "<false/>\n")?,
        PlistValue::Data(d) => write!(buffer, "<data>{}</data>\n", escape(d.as_str()))?,
    }
    Ok(())
}

fn indent(buffer: &mut String, depth: usize) -> Result<(), PlistError> {
    for _ in 0..depth {
        buffer.write_char('\t')?;
    }
    Ok(())
}
