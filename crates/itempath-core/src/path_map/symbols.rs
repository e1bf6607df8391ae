//! Illegal filename character table and `%XX` escaping.

use std::path::MAIN_SEPARATOR;

use crate::config::MapperConfig;

/// Characters escaped on every host, always the first two table entries.
const FIXED_ILLEGAL: [char; 2] = ['%', '$'];

/// Characters the host filesystem refuses in a file name.
#[cfg(windows)]
pub fn host_reserved_chars() -> Vec<char> {
    let mut chars = vec!['"', '<', '>', '|', '\0'];
    chars.extend((1u8..32).map(char::from));
    chars.extend([':', '*', '?', '\\', '/']);
    chars
}

/// Characters the host filesystem refuses in a file name.
#[cfg(not(windows))]
pub fn host_reserved_chars() -> Vec<char> {
    vec!['\0', '/']
}

/// `%` followed by the uppercase hex code point, at least two digits.
pub fn encode_char(c: char) -> String {
    format!("%{:02X}", u32::from(c))
}

/// Ordered `(char, escaped)` pairs. Built once and shared read-only.
///
/// Path separators (`/` and the native separator) are never part of the
/// table, so escaping preserves path structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IllegalSymbolTable {
    entries: Vec<(char, String)>,
}

impl IllegalSymbolTable {
    /// Build from the fixed set, the host reserved set and `extra`, in that
    /// order, keeping the first occurrence of each character.
    pub fn new(extra: impl IntoIterator<Item = char>) -> Self {
        let mut entries: Vec<(char, String)> = Vec::new();
        let candidates = FIXED_ILLEGAL
            .into_iter()
            .chain(host_reserved_chars())
            .chain(extra);
        for c in candidates {
            if c == '/' || c == MAIN_SEPARATOR {
                continue;
            }
            if entries.iter().any(|(k, _)| *k == c) {
                continue;
            }
            entries.push((c, encode_char(c)));
        }
        Self { entries }
    }

    pub fn from_config(config: &MapperConfig) -> Self {
        Self::new(config.extra_invalid_chars())
    }

    pub fn entries(&self) -> &[(char, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.escaped(c).is_some()
    }

    /// Escaped form of `c`, if it is illegal.
    pub fn escaped(&self, c: char) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == c)
            .map(|(_, v)| v.as_str())
    }

    /// Replace every illegal character with its escaped form.
    ///
    /// Single left-to-right pass: output of one replacement is never
    /// re-examined, so nothing is escaped twice.
    pub fn escape(&self, path: &str) -> String {
        let mut out = String::with_capacity(path.len());
        for c in path.chars() {
            match self.escaped(c) {
                Some(e) => out.push_str(e),
                None => out.push(c),
            }
        }
        out
    }

    /// Inverse of [`escape`](Self::escape).
    ///
    /// Only sequences produced by this table are decoded; the longest
    /// matching escape wins when several apply (only possible for code
    /// points above `0xFF`). A `%` that starts no known sequence is kept.
    pub fn unescape(&self, escaped: &str) -> String {
        let mut out = String::with_capacity(escaped.len());
        let mut rest = escaped;
        while let Some(pos) = rest.find('%') {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];
            let hit = self
                .entries
                .iter()
                .filter(|(_, e)| tail.starts_with(e.as_str()))
                .max_by_key(|(_, e)| e.len());
            match hit {
                Some((c, e)) => {
                    out.push(*c);
                    rest = &tail[e.len()..];
                }
                None => {
                    out.push('%');
                    rest = &tail[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }
}

impl Default for IllegalSymbolTable {
    fn default() -> Self {
        Self::from_config(&MapperConfig::default())
    }
}
