//! Eclipse preference files (`.prefs`, Java properties syntax)
//!
//! Only the lines whose keys are set are rewritten; comments, ordering and
//! unrelated keys are written back untouched.

use eclipath_fs::{NormalizedPath, io};

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    /// Comment, blank line, or a line that is not `key=value`
    Raw(String),
    Pair { key: String, value: String, raw: String },
}

/// An editable preferences file
#[derive(Debug, Clone)]
pub struct PreferencesFile {
    path: NormalizedPath,
    lines: Vec<Line>,
    dirty: bool,
}

impl PreferencesFile {
    /// Load `path`; a missing file is an empty preferences set.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let lines = if path.exists() {
            parse(&io::read_text(path)?)
        } else {
            Vec::new()
        };
        Ok(Self {
            path: path.clone(),
            lines,
            dirty: false,
        })
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().rev().find_map(|line| match line {
            Line::Pair { key: k, value, .. } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// Set `key`, returning `true` if the value changed
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        if self.get(key) == Some(value) {
            return false;
        }
        let raw = format!("{}={}", escape(key, true), escape(value, false));
        let existing = self
            .lines
            .iter_mut()
            .rev()
            .find(|line| matches!(line, Line::Pair { key: k, .. } if k == key));
        let replacement = Line::Pair {
            key: key.to_string(),
            value: value.to_string(),
            raw,
        };
        match existing {
            Some(line) => *line = replacement,
            None => self.lines.push(replacement),
        }
        self.dirty = true;
        true
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the file if any key changed. Returns `true` if written.
    pub fn save(&mut self) -> Result<bool> {
        if !self.dirty {
            return Ok(false);
        }
        let mut text = String::new();
        for line in &self.lines {
            match line {
                Line::Raw(raw) | Line::Pair { raw, .. } => text.push_str(raw),
            }
            text.push('\n');
        }
        io::write_text(&self.path, &text)?;
        self.dirty = false;
        Ok(true)
    }
}

fn parse(text: &str) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut physical = text.lines();

    while let Some(first) = physical.next() {
        let mut raw = first.to_string();
        // Odd number of trailing backslashes continues the logical line
        while ends_with_continuation(&raw) {
            match physical.next() {
                Some(next) => {
                    raw.push('\n');
                    raw.push_str(next);
                }
                None => break,
            }
        }

        let trimmed = raw.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            lines.push(Line::Raw(raw));
            continue;
        }

        let logical = join_continuations(trimmed);
        let (key, value) = split_pair(&logical);
        lines.push(Line::Pair {
            key: unescape(key),
            value: unescape(value),
            raw,
        });
    }
    lines
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn join_continuations(raw: &str) -> String {
    let mut logical = String::new();
    for (index, part) in raw.split('\n').enumerate() {
        let part = if index == 0 { part } else { part.trim_start() };
        let content = part
            .strip_suffix('\\')
            .filter(|_| ends_with_continuation(part))
            .unwrap_or(part);
        logical.push_str(content);
    }
    logical
}

/// Split at the first unescaped `=`, `:` or whitespace
fn split_pair(line: &str) -> (&str, &str) {
    let mut escaped = false;
    for (index, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => return (&line[..index], line[index + 1..].trim_start()),
            c if c.is_whitespace() => {
                let rest = line[index..].trim_start();
                let rest = rest
                    .strip_prefix('=')
                    .or_else(|| rest.strip_prefix(':'))
                    .unwrap_or(rest);
                return (&line[..index], rest.trim_start());
            }
            _ => {}
        }
    }
    (line, "")
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (index, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            ' ' if is_key || index == 0 => out.push_str("\\ "),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{000C}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 || (c as u32) > 0x7e => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{:04X}", unit));
                }
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn parse_reads_escaped_values() {
        let lines = parse("#comment\neclipse.preferences.version=1\norg.eclipse.jdt.core.classpathVariable.M2_REPO=C\\:/Users/me/.m2/repository\n");
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[2],
            Line::Pair {
                key: "org.eclipse.jdt.core.classpathVariable.M2_REPO".to_string(),
                value: "C:/Users/me/.m2/repository".to_string(),
                raw: "org.eclipse.jdt.core.classpathVariable.M2_REPO=C\\:/Users/me/.m2/repository"
                    .to_string(),
            }
        );
    }

    #[rstest]
    #[case("key=value", "key", "value")]
    #[case("key: value", "key", "value")]
    #[case("key value", "key", "value")]
    #[case("key = value", "key", "value")]
    #[case("a\\=b=c", "a=b", "c")]
    #[case("empty=", "empty", "")]
    fn separators(#[case] line: &str, #[case] key: &str, #[case] value: &str) {
        let (k, v) = split_pair(line);
        assert_eq!((unescape(k).as_str(), unescape(v).as_str()), (key, value));
    }

    #[test]
    fn continuation_lines_are_joined() {
        let lines = parse("path=/a/\\\n    b\nnext=1");
        match &lines[0] {
            Line::Pair { value, .. } => assert_eq!(value, "/a/b"),
            other => panic!("unexpected line {:?}", other),
        }
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn escape_round_trips_through_unescape() {
        let value = "C:/Program Files/ü#x";
        assert_eq!(unescape(&escape(value, false)), value);
        assert_eq!(escape("C:/m2", false), "C\\:/m2");
    }

    #[test]
    fn set_preserves_other_lines() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = NormalizedPath::new(temp.path().join("org.eclipse.jdt.core.prefs"));
        let content = "#Eclipse\neclipse.preferences.version=1\nother=x\n";
        std::fs::write(path.to_native(), content).unwrap();

        let mut prefs = PreferencesFile::load(&path).unwrap();
        assert!(!prefs.set("other", "x"));
        assert!(prefs.set(
            "org.eclipse.jdt.core.classpathVariable.M2_REPO",
            "/home/me/.m2/repository"
        ));
        assert!(prefs.save().unwrap());
        assert!(!prefs.save().unwrap());

        let text = std::fs::read_to_string(path.to_native()).unwrap();
        assert_eq!(
            text,
            "#Eclipse\neclipse.preferences.version=1\nother=x\norg.eclipse.jdt.core.classpathVariable.M2_REPO=/home/me/.m2/repository\n"
        );
    }

    #[test]
    fn missing_file_is_empty() {
        let prefs = PreferencesFile::load(&NormalizedPath::new("/nonexistent/x.prefs")).unwrap();
        assert_eq!(prefs.get("anything"), None);
    }
}
