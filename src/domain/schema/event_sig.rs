//! Event-signature DSL
//!
//! `event Transfer(address indexed from, address indexed to, uint256 value)`
//! parses into an [`EventSchema`] with three arguments. The `event` keyword
//! is optional. Arguments with fewer than two tokens (once `indexed` is
//! removed) are skipped.

use serde::{Deserialize, Serialize};

use super::is_identifier;
use crate::error::ParseError;

/// One event argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventArg {
    pub name: String,
    /// ABI type (e.g., "address", "uint256")
    pub kind: String,
    /// Whether the value lives in the log topics rather than the data
    pub indexed: bool,
}

/// A parsed event signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSchema {
    pub name: String,
    /// Arguments in declaration order
    pub arguments: Vec<EventArg>,
}

impl EventSchema {
    /// Canonical signature used for the topic hash, e.g. `Transfer(address,address,uint256)`
    pub fn canonical_signature(&self) -> String {
        let kinds: Vec<&str> = self.arguments.iter().map(|arg| arg.kind.as_str()).collect();
        format!("{}({})", self.name, kinds.join(","))
    }

    pub fn indexed(&self) -> impl Iterator<Item = &EventArg> {
        self.arguments.iter().filter(|arg| arg.indexed)
    }

    pub fn non_indexed(&self) -> impl Iterator<Item = &EventArg> {
        self.arguments.iter().filter(|arg| !arg.indexed)
    }
}

/// Parse an event signature into an [`EventSchema`]
pub fn parse_event_signature(sig: &str) -> Result<EventSchema, ParseError> {
    let sig = sig.trim();
    let sig = sig.strip_prefix("event ").unwrap_or(sig).trim_start();

    let (open, close) = match (sig.find('('), sig.rfind(')')) {
        (Some(open), Some(close)) if open < close => (open, close),
        _ => return Err(ParseError::MalformedSignature(sig.to_string())),
    };

    let name = sig[..open].trim();
    if !is_identifier(name) {
        return Err(ParseError::InvalidEventName(name.to_string()));
    }

    let arguments = sig[open + 1..close]
        .split(',')
        .filter_map(parse_argument)
        .collect();

    Ok(EventSchema {
        name: name.to_string(),
        arguments,
    })
}

/// `[type] [indexed]? [name]`; tokens between type and name are ignored
fn parse_argument(part: &str) -> Option<EventArg> {
    let mut indexed = false;
    let words: Vec<&str> = part
        .split_whitespace()
        .filter(|word| {
            if *word == "indexed" {
                indexed = true;
                false
            } else {
                true
            }
        })
        .collect();

    if words.len() < 2 {
        return None;
    }

    Some(EventArg {
        name: words[words.len() - 1].to_string(),
        kind: words[0].to_string(),
        indexed,
    })
}
