//! # Checked Properties
//!
//! Reads `key = value` configuration files and hands values back already
//! converted, failing with an error that names the offending key.
//!
//! Accepted syntax:
//! * `key = value`, `key: value` or `key value`.
//! * Lines starting with `#` or `!` are comments.
//! * A trailing `\` continues the value on the next line.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PropertyError {
    #[error("Unable to load properties from {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{name} is not defined in {origin}")]
    Missing { name: String, origin: String },

    #[error("{name} may not be empty in {origin}")]
    Empty { name: String, origin: String },

    #[error("{name} must be {expected} in {origin}, got '{value}'")]
    Invalid {
        name: String,
        value: String,
        expected: &'static str,
        origin: String,
    },
}

pub type Result<T> = std::result::Result<T, PropertyError>;

#[derive(Debug, Clone, Default)]
pub struct CheckedProperties {
    values: HashMap<String, String>,
    source: Option<PathBuf>,
}

impl CheckedProperties {
    /// Loads and parses `path`.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path: &Path = path.as_ref();
        let text: String = fs::read_to_string(path).map_err(|source| PropertyError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut props = Self::parse(&text);
        props.source = Some(path.to_path_buf());
        debug!(path = %path.display(), count = props.values.len(), "loaded properties");
        Ok(props)
    }

    /// Parses properties text. Malformed lines cannot occur: a line without a
    /// separator is a key with an empty value.
    pub fn parse(text: &str) -> Self {
        let mut values: HashMap<String, String> = HashMap::new();
        let mut pending: Option<String> = None;

        for raw in text.lines() {
            let line: String = match pending.take() {
                Some(mut head) => {
                    head.push_str(raw.trim_start());
                    head
                }
                None => {
                    let trimmed = raw.trim_start();
                    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                        continue;
                    }
                    trimmed.to_string()
                }
            };

            if let Some(head) = line.strip_suffix('\\') {
                pending = Some(head.to_string());
                continue;
            }

            let (key, value) = split_entry(&line);
            values.insert(key.to_string(), value.to_string());
        }

        if let Some(line) = pending {
            let (key, value) = split_entry(&line);
            values.insert(key.to_string(), value.to_string());
        }

        Self {
            values,
            source: None,
        }
    }

    /// File these properties were read from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The value of `name`, which must be present and not blank.
    pub fn get_string(&self, name: &str) -> Result<&str> {
        match self.values.get(name) {
            Some(value) => self.non_empty(name, value),
            None => Err(PropertyError::Missing {
                name: name.to_string(),
                origin: self.origin(),
            }),
        }
    }

    /// Like [`get_string`](Self::get_string) but falls back to `default` when
    /// `name` is absent. A present but blank value is still an error.
    pub fn get_string_or<'a>(&'a self, name: &str, default: &'a str) -> Result<&'a str> {
        match self.values.get(name) {
            Some(value) => self.non_empty(name, value),
            None => Ok(default),
        }
    }

    pub fn get_positive_int(&self, name: &str) -> Result<i32> {
        self.get_int(name, |n| n > 0, "a positive integer")
    }

    pub fn get_non_negative_int(&self, name: &str) -> Result<i32> {
        self.get_int(name, |n| n >= 0, "a non-negative integer")
    }

    pub fn get_bool(&self, name: &str) -> Result<bool> {
        let value: &str = self.get_string(name)?;
        if value.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if value.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(self.invalid(name, value, "true or false"))
        }
    }

    pub fn get_bool_or(&self, name: &str, default: bool) -> Result<bool> {
        if self.has(name) {
            self.get_bool(name)
        } else {
            Ok(default)
        }
    }

    fn get_int(&self, name: &str, accept: fn(i32) -> bool, expected: &'static str) -> Result<i32> {
        let value: &str = self.get_string(name)?;
        match value.parse::<i32>() {
            Ok(n) if accept(n) => Ok(n),
            _ => Err(self.invalid(name, value, expected)),
        }
    }

    fn non_empty<'a>(&self, name: &str, value: &'a str) -> Result<&'a str> {
        let value: &str = value.trim();
        if value.is_empty() {
            return Err(PropertyError::Empty {
                name: name.to_string(),
                origin: self.origin(),
            });
        }
        Ok(value)
    }

    fn invalid(&self, name: &str, value: &str, expected: &'static str) -> PropertyError {
        PropertyError::Invalid {
            name: name.to_string(),
            value: value.to_string(),
            expected,
            origin: self.origin(),
        }
    }

    /// Where the values came from, for error messages.
    fn origin(&self) -> String {
        match &self.source {
            Some(path) => path.display().to_string(),
            None => "inline properties".to_string(),
        }
    }
}

/// Splits at the first `=`, `:` or whitespace. Whitespace around the
/// separator is dropped.
fn split_entry(line: &str) -> (&str, &str) {
    let Some(idx) = line.find(|c: char| c == '=' || c == ':' || c.is_whitespace()) else {
        return (line.trim(), "");
    };

    let tail: &str = line[idx..].trim_start();
    let value: &str = tail.strip_prefix(['=', ':']).unwrap_or(tail);
    (&line[..idx], value.trim())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
