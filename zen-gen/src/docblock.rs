//! Doc-block micro-parser.
//!
//! Extracts the `Args:` and `Returns:` sections from free-form documentation
//! text. This is a deliberately narrow parser: within the arguments section
//! only lines of the form `name () : description` are recognized, everything
//! else is ignored, and a missing marker yields an absent result rather than
//! an error.

use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;

fn args_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)Args:(.*?)(?:Returns|$)").expect("valid pattern"))
}

fn returns_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)Returns:(.*)$").expect("valid pattern"))
}

fn param_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s*(\w+)\s*\(\)\s*:\s*([^(\n)]+)").expect("valid pattern"))
}

/// The structured content of one documentation block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocBlock {
    /// Per-parameter descriptions from the `Args:` section, in textual order.
    pub params: IndexMap<String, String>,

    /// Trimmed text of the `Returns:` section, if the marker was present.
    pub returns: Option<String>,
}

impl DocBlock {
    /// The description for a parameter, defaulting to the empty string.
    pub fn param_description(&self, name: &str) -> String {
        self.params.get(name).cloned().unwrap_or_default()
    }
}

/// Parse a documentation block out of free text.
pub fn parse_doc_block(text: &str) -> DocBlock {
    let mut block = DocBlock::default();

    if let Some(captures) = args_pattern().captures(text) {
        let section = captures.get(1).map_or("", |m| m.as_str()).trim();
        for line in param_pattern().captures_iter(section) {
            let name = line.get(1).map_or("", |m| m.as_str()).to_string();
            let description = line.get(2).map_or("", |m| m.as_str()).trim().to_string();
            block.params.insert(name, description);
        }
    }

    if let Some(captures) = returns_pattern().captures(text) {
        block.returns = Some(captures.get(1).map_or("", |m| m.as_str()).trim().to_string());
    }

    block
}

/// Raw fallback for the returns text: everything after a literal `Returns:`
/// token, trimmed. Used when the structured extraction found nothing.
pub fn raw_returns_text(text: &str) -> Option<String> {
    let start = text.find("Returns:")? + "Returns:".len();
    Some(text[start..].trim().to_string())
}
