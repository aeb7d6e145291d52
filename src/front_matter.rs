use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

const DELIMITER: &str = "---";

#[derive(Debug, Error, PartialEq)]
pub enum FrontMatterError {
    #[error("Front matter must start with ---")]
    MissingStart,
    #[error("Front matter is not terminated by ---")]
    Unterminated,
    #[error("Invalid front matter line {0}: {1}")]
    InvalidLine(usize, String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    List(Vec<String>),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text.as_str()),
            Value::List(_) => None,
        }
    }

    /// A text value is a list of one element, or of several when written `[a, b]`.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Value::List(items) => items.clone(),
            Value::Text(text) => {
                let text = text.trim();
                let inner = text.strip_prefix('[')
                    .and_then(|t| t.strip_suffix(']'));
                match inner {
                    Some(inner) => inner.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect(),
                    None if text.is_empty() => vec![],
                    None => vec![text.to_string()],
                }
            }
        }
    }
}

/// Key/value pairs of a front matter block, in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrontMatter {
    entries: Vec<(String, Value)>,
}

impl FrontMatter {
    /// Keys are matched case insensitively.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_text())
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get_text(key) {
            Some(v) if v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes") => true,
            Some(v) if v.eq_ignore_ascii_case("false") || v.eq_ignore_ascii_case("no") => false,
            _ => default,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Strips one wrapping pair of quotes, only when the quote char does not
/// appear inside: `"C#"` gives `C#`, `"A" and "B"` is kept as is.
fn unquote(value: &str) -> &str {
    let value = value.trim();
    for quote in ['"', '\''] {
        let inner = value.strip_prefix(quote).and_then(|v| v.strip_suffix(quote));
        if let Some(inner) = inner {
            if !inner.contains(quote) {
                return inner;
            }
        }
    }
    value
}

/// Splits a document into its front matter and the body that follows it.
pub fn parse(content: &str) -> Result<(FrontMatter, &str), FrontMatterError> {
    lazy_static! {
        static ref KEY_REGEX: Regex = Regex::new(r"^(?P<key>[A-Za-z_][\w-]*):(?P<value>.*)$").unwrap();
        static ref ITEM_REGEX: Regex = Regex::new(r"^\s*-(?:\s+(?P<item>.*))?$").unwrap();
    }

    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let content = content.trim_start_matches(['\r', '\n']);

    let mut lines = content.split_inclusive('\n');
    match lines.next() {
        Some(first) if first.trim_end() == DELIMITER => {}
        _ => return Err(FrontMatterError::MissingStart),
    }

    let mut front_matter = FrontMatter::default();
    let mut offset = content.len() - lines.clone().map(str::len).sum::<usize>();
    let mut line_no = 1;

    for line in lines {
        offset += line.len();
        line_no += 1;
        let trimmed = line.trim_end();

        if trimmed == DELIMITER {
            let body = &content[offset..];
            return Ok((front_matter, body));
        }

        if trimmed.trim().is_empty() || trimmed.trim_start().starts_with('#') {
            continue;
        }

        if let Some(caps) = ITEM_REGEX.captures(trimmed) {
            let item = caps.name("item").map_or("", |m| unquote(m.as_str()));
            let item = (!item.is_empty()).then(|| item.to_string());
            match front_matter.entries.last_mut() {
                Some((_, Value::List(items))) => items.extend(item),
                Some((_, value)) if value.as_text() == Some("") => {
                    *value = Value::List(item.into_iter().collect());
                }
                _ => return Err(FrontMatterError::InvalidLine(line_no, trimmed.to_string())),
            }
            continue;
        }

        let Some(caps) = KEY_REGEX.captures(trimmed) else {
            return Err(FrontMatterError::InvalidLine(line_no, trimmed.to_string()));
        };
        let key = caps["key"].to_string();
        let value = unquote(&caps["value"]).to_string();
        front_matter.entries.push((key, Value::Text(value)));
    }

    Err(FrontMatterError::Unterminated)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = "---
Title: Porting C# to Rust
Slug: porting-c-to-rust
Published: 2024-02-27
Draft: True
Tags:
- Rust
- \"C#\"
---

_To be written_
";

    #[test]
    fn test_parse() {
        let (fm, body) = parse(DOCUMENT).unwrap();
        assert_eq!(fm.len(), 5);
        assert_eq!(fm.get_text("title"), Some("Porting C# to Rust"));
        assert_eq!(fm.get_text("Slug"), Some("porting-c-to-rust"));
        assert_eq!(fm.get_text("Published"), Some("2024-02-27"));
        assert!(fm.get_bool("Draft", false));
        assert_eq!(fm.get("Tags").unwrap().to_list(), ["Rust", "C#"]);
        assert_eq!(body, "\n_To be written_\n");
    }

    #[test]
    fn test_inline_values() {
        let (fm, body) = parse("---\r\nTags: [rust, cli]\r\nDraft: no\r\nEmpty:\r\n---\r\nbody").unwrap();
        assert_eq!(fm.get("Tags").unwrap().to_list(), ["rust", "cli"]);
        assert!(!fm.get_bool("Draft", true));
        assert!(fm.get_bool("Missing", true));
        assert_eq!(fm.get("Empty").unwrap().to_list(), Vec::<String>::new());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_empty_items_are_skipped() {
        let (fm, _) = parse("---\nTags:\n- \n-\n- rust\n---\n").unwrap();
        assert_eq!(fm.get("Tags").unwrap().to_list(), ["rust"]);

        let (fm, _) = parse("---\nTags:\n-\n---\n").unwrap();
        assert_eq!(fm.get("Tags"), Some(&Value::List(vec![])));
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote(" \"C#\" "), "C#");
        assert_eq!(unquote("'single'"), "single");
        assert_eq!(unquote("\"Quoted\" and \"Unquoted\""), "\"Quoted\" and \"Unquoted\"");
        assert_eq!(unquote("\"Quoted\" title \"x\""), "\"Quoted\" title \"x\"");
        assert_eq!(unquote("\""), "\"");
        assert_eq!(unquote("\"\""), "");
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse("# Title\n").unwrap_err(), FrontMatterError::MissingStart);
        assert_eq!(parse("---\nTitle: x\n").unwrap_err(), FrontMatterError::Unterminated);
        assert_eq!(parse("---\nnot a pair\n---\n").unwrap_err(),
                   FrontMatterError::InvalidLine(2, "not a pair".to_string()));
        assert_eq!(parse("---\n- orphan\n---\n").unwrap_err(),
                   FrontMatterError::InvalidLine(2, "- orphan".to_string()));
    }
}
