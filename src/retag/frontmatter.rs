//! # Frontmatter Codec
//!
//! Reads and writes the metadata block at the top of a document:
//!
//! ```text
//! ---
//! title: Weekly review
//! tags:
//!   - work
//!   - review
//! ---
//! Body text starts here.
//! ```
//!
//! This is a small subset of YAML, enough to round-trip the `tags` key and
//! carry other keys along:
//!
//! - `key: value` lines become scalars.
//! - `key:` with nothing after it starts a sequence; following `- item` lines
//!   append to it. A `- item` line always continues the most recent key.
//! - `key: [a, b, c]` is an inline sequence, split on commas.
//! - Values wrapped in matching single or double quotes are unquoted, with
//!   YAML's escapes decoded (`''` inside single quotes, backslash escapes
//!   inside double quotes).
//! - Blank lines are skipped.
//!
//! Nested mappings, multi-line scalars, anchors and comments are not
//! understood. Documents carrying them decode lossily, so callers only write a
//! document back when its tags actually change.
//!
//! A document that does not open with a `---` line, or whose block is never
//! closed by another `---` line, decodes as having no frontmatter at all.

const DELIMITER: &str = "---";

/// A frontmatter value: either a single string or an ordered list of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontmatterValue {
    Scalar(String),
    Sequence(Vec<String>),
}

/// Key/value mapping that keeps keys in the order they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    entries: Vec<(String, FrontmatterValue)>,
}

impl Frontmatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&FrontmatterValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut FrontmatterValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// Sets `key`. An existing key keeps its position; a new key goes last.
    pub fn insert(&mut self, key: impl Into<String>, value: FrontmatterValue) {
        let key = key.into();
        match self.get_mut(&key) {
            Some(existing) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<FrontmatterValue> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrontmatterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends `item` to the sequence under `key`. A scalar is replaced by a
    /// fresh sequence.
    fn push_item(&mut self, key: &str, item: String) {
        match self.get_mut(key) {
            Some(FrontmatterValue::Sequence(items)) => items.push(item),
            Some(value) => *value = FrontmatterValue::Sequence(vec![item]),
            None => self.insert(key, FrontmatterValue::Sequence(vec![item])),
        }
    }
}

/// A document split into its decoded frontmatter and the remaining body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    pub frontmatter: Option<Frontmatter>,
    pub body: String,
}

/// Splits `content` into frontmatter and body.
pub fn parse(content: &str) -> ParsedDocument {
    match split_block(content) {
        Some((block, body)) => ParsedDocument {
            frontmatter: Some(parse_block(block)),
            body: body.to_string(),
        },
        None => ParsedDocument {
            frontmatter: None,
            body: content.to_string(),
        },
    }
}

/// Joins frontmatter and body back into document text.
///
/// An absent or empty mapping emits no block at all.
pub fn serialize(frontmatter: Option<&Frontmatter>, body: &str) -> String {
    let frontmatter = match frontmatter {
        Some(fm) if !fm.is_empty() => fm,
        _ => return body.to_string(),
    };

    let mut out = String::with_capacity(body.len() + 64);
    out.push_str(DELIMITER);
    out.push('\n');
    for (key, value) in frontmatter.iter() {
        match value {
            FrontmatterValue::Scalar(s) => {
                out.push_str(key);
                out.push_str(": ");
                out.push_str(&quote_if_needed(s));
                out.push('\n');
            }
            FrontmatterValue::Sequence(items) => {
                out.push_str(key);
                out.push_str(":\n");
                for item in items {
                    out.push_str("  - ");
                    out.push_str(&quote_if_needed(item));
                    out.push('\n');
                }
            }
        }
    }
    out.push_str(DELIMITER);
    out.push('\n');
    out.push_str(body);
    out
}

/// Returns the raw block (without delimiters) and the body after the closing line.
fn split_block(content: &str) -> Option<(&str, &str)> {
    let rest = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))?;

    let mut offset = 0;
    while offset <= rest.len() {
        let (line, next) = match rest[offset..].find('\n') {
            Some(i) => (&rest[offset..offset + i], offset + i + 1),
            None => (&rest[offset..], rest.len() + 1),
        };
        if line.strip_suffix('\r').unwrap_or(line) == DELIMITER {
            let block = &rest[..offset];
            let body = if next > rest.len() { "" } else { &rest[next..] };
            return Some((block, body));
        }
        offset = next;
    }
    None
}

fn parse_block(block: &str) -> Frontmatter {
    let mut out = Frontmatter::new();
    let mut current_key: Option<String> = None;

    for line in block.lines() {
        if let Some(item) = list_item(line) {
            if let Some(key) = &current_key {
                out.push_item(key, unquote(item));
            }
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            current_key = None;
            continue;
        }
        let rest = rest.trim();
        let value = if rest.is_empty() {
            FrontmatterValue::Sequence(Vec::new())
        } else if rest.len() >= 2 && rest.starts_with('[') && rest.ends_with(']') {
            FrontmatterValue::Sequence(
                rest[1..rest.len() - 1]
                    .split(',')
                    .map(|s| unquote(s.trim()))
                    .filter(|s| !s.is_empty())
                    .collect(),
            )
        } else {
            FrontmatterValue::Scalar(unquote(rest))
        };
        out.insert(key, value);
        current_key = Some(key.to_string());
    }

    out
}

/// `- value` with at least one whitespace after the dash.
fn list_item(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('-')?;
    if rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

fn unquote(s: &str) -> String {
    if s.len() >= 2 && s.starts_with('\'') && s.ends_with('\'') {
        return s[1..s.len() - 1].replace("''", "'");
    }
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        return serde_yaml::from_str::<String>(s)
            .unwrap_or_else(|_| s[1..s.len() - 1].to_string());
    }
    s.to_string()
}

fn needs_quotes(s: &str) -> bool {
    if s.is_empty() || s.trim() != s || s.chars().any(char::is_control) {
        return true;
    }
    const INDICATORS: &[char] = &[
        '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@', '`', '[', ']', '{', '}', ',',
    ];
    s.starts_with(INDICATORS)
        || s.starts_with("- ")
        || s.starts_with("? ")
        || s.starts_with(": ")
        || s.contains(": ")
        || s.contains(" #")
        || s.ends_with(':')
}

/// Quotes a value so both this codec and YAML read it back unchanged.
///
/// Control characters force a double-quoted scalar, written as a JSON string
/// literal (valid YAML). A value holding `'` but no `"` or `\` goes in plain
/// double quotes; everything else in single quotes with `'` doubled.
fn quote_if_needed(s: &str) -> String {
    if !needs_quotes(s) {
        return s.to_string();
    }
    if s.chars().any(char::is_control) {
        if let Ok(quoted) = serde_json::to_string(s) {
            return quoted;
        }
    }
    if s.contains('\'') && !s.contains('"') && !s.contains('\\') {
        format!("\"{}\"", s)
    } else {
        format!("'{}'", s.replace('\'', "''"))
    }
}
