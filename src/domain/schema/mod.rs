//! Schema DSLs: struct definitions and event signatures

mod event_sig;
mod struct_def;

pub use event_sig::{parse_event_signature, EventArg, EventSchema};
pub use struct_def::{classify_line, parse_struct_def, FieldSpec, LineKind, StructSchema};

/// `[A-Za-z_][A-Za-z0-9_]*`
pub(crate) fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// An identifier followed by zero or more `[N]` / `[]` suffixes
pub(crate) fn is_type_token(token: &str) -> bool {
    let (base, mut rest) = match token.find('[') {
        Some(idx) => token.split_at(idx),
        None => (token, ""),
    };
    if !is_identifier(base) {
        return false;
    }
    while !rest.is_empty() {
        let Some(inner) = rest.strip_prefix('[') else {
            return false;
        };
        let Some(end) = inner.find(']') else {
            return false;
        };
        if !inner[..end].chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        rest = &inner[end + 1..];
    }
    true
}
