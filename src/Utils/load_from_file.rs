//! # Sectioned documents
//!
//! Input files are plain text split into sections. A section starts with a header line
//! written in capitals (e.g. `ENERGIES`) and runs until the next header or the end of the
//! file. The body of a section is JSON.
//!
//! ```text
//! ENERGIES
//! { "W1": -10.0, "B1": 5.0, "W2": -2.0 }
//! CONNECTIONS
//! [["W1", "B1"], ["B1", "W2"]]
//! ```
use log::{error, info};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SectionError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no '{0}' header found")]
    MissingHeader(String),
    #[error("error parsing section '{section}' at line {line}, column {column}: {message}")]
    Json {
        section: String,
        line: usize,
        column: usize,
        message: String,
    },
}

/// a header is a non-empty line made of capitals and underscores only
pub fn is_header(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c.is_uppercase() || c == '_')
}

#[derive(Debug, Clone)]
pub struct SectionDocument {
    pub source: String,
    pub lines: Vec<String>,
}

impl SectionDocument {
    pub fn from_file(path: &Path) -> Result<Self, SectionError> {
        let io_err = |source| SectionError::Io {
            path: path.display().to_string(),
            source,
        };
        let file = File::open(path).map_err(io_err)?;
        let reader = BufReader::new(file);
        let lines = reader
            .lines()
            .collect::<Result<Vec<String>, _>>()
            .map_err(io_err)?;
        Ok(SectionDocument {
            source: path.display().to_string(),
            lines,
        })
    }

    pub fn from_text(text: &str) -> Self {
        SectionDocument {
            source: "<text>".to_string(),
            lines: text.lines().map(|l| l.to_string()).collect(),
        }
    }

    /// index of the first line after the header, any of `headers` matches (case insensitive)
    fn section_start(&self, headers: &[&str]) -> Option<usize> {
        self.lines.iter().position(|line| {
            let trimmed = line.trim().to_uppercase();
            headers.iter().any(|h| trimmed == h.to_uppercase())
        })
        .map(|i| i + 1)
    }

    /// Returns the first line index of the section body and the body itself
    pub fn extract_section(&self, headers: &[&str]) -> Result<(usize, String), SectionError> {
        let start_index = self
            .section_start(headers)
            .ok_or_else(|| SectionError::MissingHeader(headers.join("' or '")))?;
        let end_index = self.lines[start_index..]
            .iter()
            .position(|line| is_header(line))
            .map(|offset| start_index + offset)
            .unwrap_or(self.lines.len());
        Ok((start_index, self.lines[start_index..end_index].join("\n")))
    }

    pub fn has_section(&self, headers: &[&str]) -> bool {
        self.section_start(headers).is_some()
    }

    /// Deserializes the body of a section. On a JSON error the offending line of the document
    /// is logged with a pointer to the column.
    pub fn parse_json_section<T: DeserializeOwned>(
        &self,
        headers: &[&str],
    ) -> Result<T, SectionError> {
        let (start_index, section) = self.extract_section(headers)?;
        match serde_json::from_str::<T>(&section) {
            Ok(data) => {
                info!(
                    "Successfully parsed section '{}' from '{}'",
                    headers[0], self.source
                );
                Ok(data)
            }
            Err(e) => {
                let error_line = e.line().max(1);
                let error_column = e.column();
                // zero-based index of the line in the whole document
                let actual_line = start_index + error_line - 1;
                let err = SectionError::Json {
                    section: headers[0].to_string(),
                    line: actual_line + 1,
                    column: error_column,
                    message: e.to_string(),
                };
                error!("{}", err);
                if let Some(problem_line) = self.lines.get(actual_line) {
                    error!("Problematic line: {}", problem_line);
                    if error_column >= 1 && error_column <= problem_line.len() {
                        error!("{}^", " ".repeat(error_column - 1));
                    }
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DOC: &str = "\
some free text
ENERGIES
{
  \"W1\": -10.0,
  \"B1\": 5.0
}
CONNECTIONS
[[\"W1\", \"B1\"]]
";

    #[test]
    fn test_header_detection() {
        assert!(is_header("ENERGIES"));
        assert!(is_header("  SUB_PES  "));
        assert!(!is_header("Energies"));
        assert!(!is_header("{"));
        assert!(!is_header(""));
    }

    #[test]
    fn test_extract_section_until_next_header() {
        let doc = SectionDocument::from_text(DOC);
        let (start, body) = doc.extract_section(&["ENERGIES"]).unwrap();
        assert_eq!(start, 2);
        assert!(body.contains("\"W1\""));
        assert!(!body.contains("CONNECTIONS"));
        let (_, conn) = doc.extract_section(&["connections"]).unwrap();
        assert_eq!(conn.trim(), "[[\"W1\", \"B1\"]]");
    }

    #[test]
    fn test_parse_json_section_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", DOC).unwrap();
        let doc = SectionDocument::from_file(temp_file.path()).unwrap();
        let energies: HashMap<String, f64> = doc.parse_json_section(&["ENERGIES"]).unwrap();
        assert_eq!(energies["W1"], -10.0);
        let conns: Vec<(String, String)> = doc.parse_json_section(&["CONNECTIONS"]).unwrap();
        assert_eq!(conns, vec![("W1".to_string(), "B1".to_string())]);
    }

    #[test]
    fn test_missing_header() {
        let doc = SectionDocument::from_text("ENERGIES\n{}\n");
        let result: Result<Vec<(String, String)>, _> = doc.parse_json_section(&["CONNECTIONS"]);
        assert!(matches!(result, Err(SectionError::MissingHeader(_))));
    }

    #[test]
    fn test_invalid_json_reports_document_line() {
        let doc = SectionDocument::from_text("ENERGIES\n{\n  \"W1\": -10.0,\n  \"B1\" 5.0\n}\n");
        let result: Result<HashMap<String, f64>, _> = doc.parse_json_section(&["ENERGIES"]);
        match result {
            Err(SectionError::Json { line, .. }) => assert_eq!(line, 4),
            other => panic!("expected a JSON error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let result = SectionDocument::from_file(Path::new("no_such_surface_file.txt"));
        assert!(matches!(result, Err(SectionError::Io { .. })));
    }
}
