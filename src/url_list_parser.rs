use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use crate::errors::FileIoError;

fn parse_url(line: &str) -> Option<String> {
    let url = line.trim();
    return if url.is_empty() { None } else { Some(url.to_string()) };
}

/// Reads one url per line, trimmed, skipping blank lines and keeping file order.
pub fn parse_url_file(url_file_path: &Path) -> Result<Vec<String>, FileIoError> {
    let file = match File::open(url_file_path) {
        Err(reason) if reason.kind() == ErrorKind::NotFound => {
            return Err(FileIoError(format!("File not found: {}", url_file_path.display())))
        }
        Err(reason) => return Err(FileIoError(format!("Error processing file: {}", reason))),
        Ok(file) => file,
    };

    let mut urls = Vec::new();
    for result_line in BufReader::new(file).lines() {
        let line = result_line.map_err(|reason| FileIoError(format!("Error processing file: {}", reason)))?;
        if let Some(url) = parse_url(&line) {
            urls.push(url);
        }
    }
    return Ok(urls);
}
