//! Struct-definition DSL
//!
//! Accepts pseudo-Solidity text such as:
//!
//! ```text
//! struct Task {
//!     string title;
//!     address reporter;
//!     uint256[2] deadline;
//! }
//! ```
//!
//! Parsing is line oriented. The header is the first `struct <Name>` pair of
//! tokens (the opening brace may be glued to the name, follow it, or sit on
//! the next line). Every other line is run through [`classify_line`]:
//!
//! * empty lines and lines starting with `struct`, `{` or `}` are structural;
//! * `//` starts a comment that runs to the end of the line;
//! * after stripping trailing `;` / `,`, a line of at least two tokens whose
//!   first token is a type and last token a name is a field; tokens in
//!   between (`payable`, `memory`) are ignored;
//! * anything else is skipped without error.

use serde::{Deserialize, Serialize};

use super::{is_identifier, is_type_token};
use crate::error::ParseError;

/// One field of a struct schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name (identifier)
    pub name: String,
    /// ABI type (e.g., "address", "uint256[2]")
    pub kind: String,
}

/// A parsed struct definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructSchema {
    /// Struct name from the header
    pub name: String,
    /// Fields in source order
    pub fields: Vec<FieldSpec>,
    /// Trimmed source text the schema was parsed from
    pub raw_source: String,
}

impl StructSchema {
    /// Name of the synthetic getter used to decode this struct
    pub fn getter(&self) -> String {
        format!("get{}", self.name)
    }

    /// Field names in source order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }
}

/// How a single line of the definition was interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Blank, header, or brace line
    Structural,
    /// A `<type> ... <name>` declaration
    Field { kind: &'a str, name: &'a str },
    /// Anything that does not fit the `<type> ... <name>` pattern
    Skipped,
}

/// Parse a struct definition into a [`StructSchema`]
pub fn parse_struct_def(text: &str) -> Result<StructSchema, ParseError> {
    let source = text.trim();
    let name = struct_name(source).ok_or(ParseError::InvalidFormat)?;

    let fields: Vec<FieldSpec> = source
        .lines()
        .filter_map(|line| match classify_line(line) {
            LineKind::Field { kind, name } => Some(FieldSpec {
                name: name.to_string(),
                kind: kind.to_string(),
            }),
            LineKind::Structural | LineKind::Skipped => None,
        })
        .collect();

    if fields.is_empty() {
        return Err(ParseError::NoFields);
    }

    Ok(StructSchema {
        name: name.to_string(),
        fields,
        raw_source: source.to_string(),
    })
}

/// Classify one line of a struct definition
pub fn classify_line(line: &str) -> LineKind<'_> {
    let line = strip_comment(line).trim();
    if line.is_empty()
        || line.starts_with("struct")
        || line.starts_with('{')
        || line.starts_with('}')
    {
        return LineKind::Structural;
    }

    let line = line.trim_end_matches(|c: char| c == ';' || c == ',' || c.is_whitespace());
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        &[kind, .., name] if is_type_token(kind) && is_identifier(name) => {
            LineKind::Field { kind, name }
        }
        _ => LineKind::Skipped,
    }
}

/// Find the first `struct <Name>` token pair; the name may carry a glued `{`
fn struct_name(source: &str) -> Option<&str> {
    let mut tokens = source.split_whitespace();
    while let Some(token) = tokens.next() {
        if token != "struct" {
            continue;
        }
        let candidate = tokens.next()?.split('{').next().unwrap_or_default();
        if is_identifier(candidate) {
            return Some(candidate);
        }
    }
    None
}

fn strip_comment(line: &str) -> &str {
    line.split_once("//").map_or(line, |(code, _)| code)
}
