use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use reqwest::header::HeaderMap;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};

pub const DEFAULT_HEADERS_FILE: &str = "headers.json";
pub const DEFAULT_SAMPLE_HEADERS_FILE: &str = "sample_headers.json";

/// Key of the single entry that stands in for the headers when a fetch failed.
pub const ERROR_KEY: &str = "Error";

/// Response headers in the order the server sent them.
///
/// Lookups are exact-case. Names taken from a response are rendered in
/// Train-Case (`content-type` becomes `Content-Type`), and repeated names are
/// folded into the first entry with their values joined by `", "`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMapping {
    entries: Vec<(String, String)>,
}

impl HeaderMapping {
    pub fn new() -> HeaderMapping {
        return HeaderMapping { entries: Vec::new() };
    }

    /// The `{"Error": message}` mapping used in place of real headers.
    pub fn error_placeholder(message: &str) -> HeaderMapping {
        let mut mapping = HeaderMapping::new();
        mapping.insert(ERROR_KEY, message);
        return mapping;
    }

    pub fn from_header_map(map: &HeaderMap) -> HeaderMapping {
        let mut mapping = HeaderMapping::new();
        for (name, value) in map.iter() {
            let value = String::from_utf8_lossy(value.as_bytes());
            mapping.insert(&canonical_header_name(name.as_str()), &value);
        }
        return mapping;
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => {
                existing.push_str(", ");
                existing.push_str(value);
            }
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        return self
            .entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        return self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()));
    }

    /// True for the `{"Error": message}` placeholder of a failed fetch.
    pub fn is_error(&self) -> bool {
        return self.entries.len() == 1 && self.entries[0].0 == ERROR_KEY;
    }

    fn to_json_object(&self) -> Value {
        let mut object = Map::new();
        for (key, value) in self.iter() {
            object.insert(key.to_string(), Value::String(value.to_string()));
        }
        return Value::Object(object);
    }
}

fn canonical_header_name(name: &str) -> String {
    return name
        .split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join("-");
}

pub fn print_headers(out: &mut impl Write, headers: &HeaderMapping) -> std::io::Result<()> {
    writeln!(out, "\nHTTP Headers:")?;
    for (key, value) in headers.iter() {
        writeln!(out, "{}: {}", key, value)?;
    }
    return Ok(());
}

/// Writes the headers as a json object indented by four spaces.
pub fn write_headers_file(headers: &HeaderMapping, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("couldn't create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let mut serializer = Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    headers
        .to_json_object()
        .serialize(&mut serializer)
        .with_context(|| format!("couldn't serialize headers to {}", path.display()))?;
    writer.flush().with_context(|| format!("couldn't write {}", path.display()))?;
    return Ok(());
}

/// Like [`write_headers_file`] but reports the outcome on the console instead
/// of returning it. Only a failing console is an error here.
pub fn save_headers_to_file(out: &mut impl Write, headers: &HeaderMapping, path: &Path) -> std::io::Result<()> {
    match write_headers_file(headers, path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "headers saved");
            writeln!(out, "Headers saved to {}", path.display())
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %format!("{:#}", e), "saving headers failed");
            writeln!(out, "Error saving headers: {:#}", e)
        }
    }
}
