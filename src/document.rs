//! Pure JSON handling for editor text. No I/O happens here.
//!
//! Everything this tool writes goes through [`prepare`]: blank text is
//! rejected, the text must parse as JSON, and the parsed document is
//! re-serialized with 4-space indentation. Key order is preserved, so a
//! round-trip only changes whitespace.

use serde::Serialize;
use serde::ser::Error as _;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use crate::error::IxpError;

const INDENT: &[u8] = b"    ";

/// Content written when a fresh or corrupted file is (re)created.
pub fn empty_document() -> &'static str {
    "{}"
}

/// Parse editor text as JSON.
///
/// Numbers keep their source text, so integers beyond 64 bits and decimals
/// such as `1.10` are written back exactly as the user typed them.
pub fn parse(text: &str) -> Result<Value, IxpError> {
    serde_json::from_str(text).map_err(IxpError::InvalidJson)
}

/// Serialize a document with 4-space indentation.
pub fn pretty(value: &Value) -> Result<String, IxpError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser).map_err(IxpError::InvalidJson)?;
    String::from_utf8(buf).map_err(|e| IxpError::InvalidJson(serde_json::Error::custom(e)))
}

/// Validate editor text and produce the exact bytes to write.
///
/// Checks run cheapest first: blank text is [`IxpError::EmptyContent`]
/// before it is ever handed to the parser.
pub fn prepare(text: &str) -> Result<String, IxpError> {
    if text.trim().is_empty() {
        return Err(IxpError::EmptyContent);
    }
    let value = parse(text)?;
    pretty(&value)
}

/// Whether raw file bytes hold a valid JSON document.
pub fn is_valid(bytes: &[u8]) -> bool {
    serde_json::from_slice::<Value>(bytes).is_ok()
}
