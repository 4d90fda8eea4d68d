//! Bounded micro-parser for the annotated source subset.
//!
//! Parses just enough of the surface language to feed the extractor: a
//! module docstring, `class Name(Base):` bodies with `field: annotation`
//! lines, and `def` / `async def` signatures (possibly spanning lines) with
//! annotated parameters, a return annotation and a leading docstring.
//! Imports, decorators, comments and executable statements are skipped.

use crate::ast::{Annotation, Callable, Field, Module, Param, Stmt, SubscriptIndex, TypeDef};
use crate::error::ParseError;

/// Parser for source files in the supported subset.
#[derive(Debug, Default)]
pub struct SourceParser;

impl SourceParser {
    /// Create a new parser.
    pub fn new() -> Self {
        SourceParser
    }

    /// Parse a whole module.
    pub fn parse_module(&self, source: &str) -> Result<Module, ParseError> {
        let lines: Vec<&str> = source.lines().collect();
        let mut module = Module::default();
        let mut pos = 0;

        // Leading module docstring.
        while pos < lines.len() {
            let trimmed = lines[pos].trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                pos += 1;
                continue;
            }
            if let Some(delim) = docstring_delimiter(trimmed) {
                let (doc, next) = read_docstring(&lines, pos, delim)?;
                module.doc = Some(doc);
                pos = next;
            }
            break;
        }

        while pos < lines.len() {
            let line = lines[pos];
            let trimmed = line.trim();

            if indent_of(line) > 0 || trimmed.is_empty() || trimmed.starts_with('#') {
                pos += 1;
                continue;
            }

            if trimmed.starts_with("class ") {
                let (typedef, next) = parse_class(&lines, pos)?;
                module.items.push(Stmt::TypeDef(typedef));
                pos = next;
            } else if trimmed.starts_with("def ") || trimmed.starts_with("async def ") {
                let (callable, next) = parse_function(&lines, pos)?;
                module.items.push(Stmt::Callable(callable));
                pos = next;
            } else {
                // Imports, assignments, decorators: not ours to interpret.
                pos += 1;
            }
        }

        Ok(module)
    }
}

/// Leading indentation width in characters.
fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// The docstring delimiter opening this line, if any.
fn docstring_delimiter(trimmed: &str) -> Option<&'static str> {
    if trimmed.starts_with("\"\"\"") {
        Some("\"\"\"")
    } else if trimmed.starts_with("'''") {
        Some("'''")
    } else {
        None
    }
}

/// Read a docstring starting at `start`; returns the content and the index
/// of the first line after it.
fn read_docstring(
    lines: &[&str],
    start: usize,
    delim: &str,
) -> Result<(String, usize), ParseError> {
    let opening = lines[start].trim_start();
    let after_open = &opening[delim.len()..];

    // Single-line form.
    if let Some(end) = after_open.find(delim) {
        return Ok((after_open[..end].to_string(), start + 1));
    }

    let mut content = vec![after_open.to_string()];
    let mut pos = start + 1;
    while pos < lines.len() {
        if let Some(end) = lines[pos].find(delim) {
            content.push(lines[pos][..end].to_string());
            return Ok((clean_docstring(&content), pos + 1));
        }
        content.push(lines[pos].to_string());
        pos += 1;
    }

    Err(ParseError::UnterminatedDocstring { line: start + 1 })
}

/// Normalize a block docstring: trim the first line, strip the common
/// indentation margin from the remaining lines, and drop blank edge lines.
/// Keeps re-parsed generated output identical to the stored text.
fn clean_docstring(lines: &[String]) -> String {
    let first = lines.first().map(|l| l.trim()).unwrap_or("");
    let rest = lines.get(1..).unwrap_or(&[]);
    let margin = rest
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<String> = Vec::new();
    if !first.is_empty() {
        cleaned.push(first.to_string());
    }
    for line in rest {
        if line.trim().is_empty() {
            cleaned.push(String::new());
        } else {
            cleaned.push(line[margin..].trim_end().to_string());
        }
    }
    while cleaned.first().map_or(false, |l| l.is_empty()) {
        cleaned.remove(0);
    }
    while cleaned.last().map_or(false, |l| l.is_empty()) {
        cleaned.pop();
    }
    cleaned.join("\n")
}

/// Parse a `class` definition starting at `start`.
fn parse_class(lines: &[&str], start: usize) -> Result<(TypeDef, usize), ParseError> {
    let header = lines[start].trim();
    let rest = &header["class ".len()..];

    let name_end = rest
        .find(|c| c == '(' || c == ':')
        .ok_or_else(|| ParseError::syntax(start + 1, "malformed class header"))?;
    let name = rest[..name_end].trim().to_string();
    if name.is_empty() {
        return Err(ParseError::syntax(start + 1, "missing class name"));
    }

    let base = match rest[name_end..].strip_prefix('(') {
        Some(bases) => {
            let close = bases
                .find(')')
                .ok_or_else(|| ParseError::syntax(start + 1, "unclosed base list"))?;
            bases[..close]
                .split(',')
                .map(str::trim)
                .find(|b| !b.is_empty())
                .map(str::to_string)
        }
        None => None,
    };

    let mut fields = Vec::new();
    let mut pos = start + 1;
    while pos < lines.len() {
        let line = lines[pos];
        let trimmed = line.trim();

        if trimmed.is_empty() {
            pos += 1;
            continue;
        }
        if indent_of(line) == 0 {
            break;
        }
        if let Some(delim) = docstring_delimiter(trimmed) {
            let (_, next) = read_docstring(lines, pos, delim)?;
            pos = next;
            continue;
        }
        if trimmed == "pass" || trimmed.starts_with('#') {
            pos += 1;
            continue;
        }
        if let Some((field_name, annotation_text)) = split_field(trimmed) {
            fields.push(Field {
                name: field_name.to_string(),
                annotation: parse_annotation_lenient(annotation_text, pos + 1),
            });
        }
        pos += 1;
    }

    Ok((TypeDef { name, base, fields }, pos))
}

/// Split a `name: annotation` body line, rejecting non-identifier names.
fn split_field(trimmed: &str) -> Option<(&str, &str)> {
    let (name, annotation) = trimmed.split_once(':')?;
    let name = name.trim();
    if is_identifier(name) {
        Some((name, annotation.trim()))
    } else {
        None
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Parse a `def` / `async def` starting at `start`.
fn parse_function(lines: &[&str], start: usize) -> Result<(Callable, usize), ParseError> {
    let first = lines[start].trim();
    let is_async = first.starts_with("async ");
    let name_probe = first
        .trim_start_matches("async ")
        .trim_start_matches("def ")
        .split(['(', ':'])
        .next()
        .unwrap_or("")
        .trim()
        .to_string();

    // Accumulate signature lines until the def colon at bracket depth zero.
    let mut header = String::new();
    let mut pos = start;
    let mut colon_offset = None;
    while pos < lines.len() {
        if !header.is_empty() {
            header.push(' ');
        }
        header.push_str(lines[pos].trim());
        pos += 1;
        if let Some(offset) = find_def_colon(&header) {
            colon_offset = Some(offset);
            break;
        }
    }
    let colon_offset = colon_offset.ok_or_else(|| ParseError::UnterminatedSignature {
        name: name_probe.clone(),
        line: start + 1,
    })?;

    let inline_body = header[colon_offset + 1..].trim().to_string();
    let signature = &header[..colon_offset];

    let (name, params, returns) = parse_signature(signature, start + 1)?;

    // Body: either inline (`def f() -> None: ...`) or an indented block whose
    // first statement may be the docstring.
    let mut doc = None;
    if inline_body.is_empty() {
        while pos < lines.len() {
            let line = lines[pos];
            let trimmed = line.trim();
            if trimmed.is_empty() {
                pos += 1;
                continue;
            }
            if indent_of(line) == 0 {
                break;
            }
            if doc.is_none() {
                if let Some(delim) = docstring_delimiter(trimmed) {
                    let (text, next) = read_docstring(lines, pos, delim)?;
                    doc = Some(text);
                    pos = next;
                    continue;
                }
            }
            pos += 1;
        }
    }

    Ok((
        Callable {
            name,
            params,
            returns,
            doc,
            decorators: Vec::new(),
            is_async,
        },
        pos,
    ))
}

/// Offset of the def colon: the first `:` at paren/bracket depth zero after
/// the parameter list opened.
fn find_def_colon(text: &str) -> Option<usize> {
    let mut depth = 0i32;
    let mut seen_paren = false;
    for (offset, c) in text.char_indices() {
        match c {
            '(' | '[' => {
                depth += 1;
                seen_paren = true;
            }
            ')' | ']' => depth -= 1,
            ':' if depth == 0 && seen_paren => return Some(offset),
            _ => {}
        }
    }
    None
}

/// Parse `def name(params) -> returns` (colon already stripped).
fn parse_signature(
    signature: &str,
    line: usize,
) -> Result<(String, Vec<Param>, Option<Annotation>), ParseError> {
    let body = signature
        .trim()
        .trim_start_matches("async ")
        .trim_start_matches("def ")
        .trim();

    let open = body
        .find('(')
        .ok_or_else(|| ParseError::syntax(line, "missing parameter list"))?;
    let name = body[..open].trim().to_string();
    if !is_identifier(&name) {
        return Err(ParseError::syntax(line, "missing function name"));
    }

    let close = matching_paren(body, open)
        .ok_or_else(|| ParseError::syntax(line, "unclosed parameter list"))?;
    let params = parse_params(&body[open + 1..close], line)?;

    let tail = body[close + 1..].trim();
    let returns = match tail.strip_prefix("->") {
        Some(annotation_text) => Some(parse_annotation_lenient(annotation_text.trim(), line)),
        None if tail.is_empty() => None,
        None => return Err(ParseError::syntax(line, "unexpected text after parameters")),
    };

    Ok((name, params, returns))
}

/// Offset of the parenthesis matching the one at `open`.
fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0i32;
    for (offset, c) in text.char_indices() {
        if offset < open {
            continue;
        }
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse a comma-separated parameter list.
fn parse_params(text: &str, line: usize) -> Result<Vec<Param>, ParseError> {
    let mut params = Vec::new();
    for piece in split_top_level(text, ',') {
        let piece = piece.trim();
        if piece.is_empty() || piece.starts_with('*') {
            continue;
        }
        // Defaults are not part of the subset; tolerate and drop them.
        let piece = piece.split('=').next().unwrap_or(piece).trim();
        match piece.split_once(':') {
            Some((name, annotation_text)) => {
                let name = name.trim();
                if !is_identifier(name) {
                    return Err(ParseError::syntax(line, format!("bad parameter '{piece}'")));
                }
                params.push(Param {
                    name: name.to_string(),
                    annotation: Some(parse_annotation_lenient(annotation_text.trim(), line)),
                });
            }
            None => {
                if !is_identifier(piece) {
                    return Err(ParseError::syntax(line, format!("bad parameter '{piece}'")));
                }
                params.push(Param {
                    name: piece.to_string(),
                    annotation: None,
                });
            }
        }
    }
    Ok(params)
}

/// Split on a separator at bracket depth zero.
fn split_top_level(text: &str, separator: char) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;
    for c in text.chars() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth -= 1,
            _ => {}
        }
        if c == separator && depth == 0 {
            pieces.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    pieces.push(current);
    pieces
}

/// Parse an annotation, degrading grammar-external text to the unsupported
/// marker instead of failing the run. Annotation shapes outside the subset
/// are not structural errors: they decode to the empty alternative list.
fn parse_annotation_lenient(text: &str, line: usize) -> Annotation {
    parse_annotation(text, line).unwrap_or_else(|_| Annotation::Unsupported(text.to_string()))
}

/// Parse one annotation expression.
///
/// Grammar: `union := term ('|' term)*`, `term := NAME | None |
/// NAME '[' union (',' union)* ']'`. Unions fold left-associatively.
pub fn parse_annotation(text: &str, line: usize) -> Result<Annotation, ParseError> {
    let mut cursor = AnnotationCursor {
        chars: text.chars().collect(),
        pos: 0,
        line,
    };
    let annotation = cursor.parse_union()?;
    cursor.skip_whitespace();
    if cursor.pos < cursor.chars.len() {
        return Err(ParseError::syntax(
            line,
            format!("trailing text in annotation '{text}'"),
        ));
    }
    Ok(annotation)
}

struct AnnotationCursor {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl AnnotationCursor {
    fn parse_union(&mut self) -> Result<Annotation, ParseError> {
        let mut left = self.parse_term()?;
        loop {
            self.skip_whitespace();
            if self.peek() == Some('|') {
                self.pos += 1;
                let right = self.parse_term()?;
                left = Annotation::union(left, right);
            } else {
                return Ok(left);
            }
        }
    }

    fn parse_term(&mut self) -> Result<Annotation, ParseError> {
        self.skip_whitespace();
        let name = self.read_identifier()?;

        self.skip_whitespace();
        if self.peek() != Some('[') {
            if name == "None" {
                return Ok(Annotation::None);
            }
            return Ok(Annotation::Name(name));
        }
        self.pos += 1;

        let mut elements = vec![self.parse_union()?];
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.pos += 1;
                    elements.push(self.parse_union()?);
                }
                Some(']') => {
                    self.pos += 1;
                    break;
                }
                _ => {
                    return Err(ParseError::syntax(self.line, "unclosed subscript"));
                }
            }
        }

        Ok(Annotation::Subscript {
            base: name,
            index: build_index(elements),
        })
    }

    fn read_identifier(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            let acceptable = if self.pos == start {
                c.is_alphabetic() || c == '_'
            } else {
                c.is_alphanumeric() || c == '_'
            };
            if acceptable {
                self.pos += 1;
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(ParseError::syntax(self.line, "expected a name"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }
}

/// Classify subscript elements into the index variants.
fn build_index(mut elements: Vec<Annotation>) -> SubscriptIndex {
    match elements.len() {
        1 => match elements.remove(0) {
            Annotation::Name(name) => SubscriptIndex::Name(name),
            other => SubscriptIndex::Nested(Box::new(other)),
        },
        2 => match (&elements[0], &elements[1]) {
            (Annotation::Name(key), Annotation::Name(value)) => {
                SubscriptIndex::Pair(key.clone(), value.clone())
            }
            _ => SubscriptIndex::Tuple(elements),
        },
        _ => SubscriptIndex::Tuple(elements),
    }
}
