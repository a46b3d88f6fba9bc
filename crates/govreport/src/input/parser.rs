//! CSV/TSV parser with delimiter detection.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::{Dataset, SourceMetadata};
use crate::error::{GovReportError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Extensions read as delimited text.
const TEXT_EXTENSIONS: &[&str] = &["csv", "tsv", "tab", "txt", "psv"];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

impl ParserConfig {
    /// Set the delimiter from user input such as `","` or `"\t"`.
    pub fn with_delimiter_str(mut self, delimiter: &str) -> Result<Self> {
        let byte = match delimiter {
            "\\t" | "tab" => b'\t',
            s if s.len() == 1 && s.is_ascii() => s.as_bytes()[0],
            other => return Err(GovReportError::InvalidDelimiter(other.to_string())),
        };
        if byte == b'"' || byte == b'\n' || byte == b'\r' {
            return Err(GovReportError::InvalidDelimiter(delimiter.to_string()));
        }
        self.delimiter = Some(byte);
        Ok(self)
    }

    /// Limit the number of data rows read.
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }
}

/// Parses delimited text into a [`Dataset`].
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the dataset and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
        let path = path.as_ref();
        check_extension(path)?;

        let contents = fs::read(path).map_err(|e| GovReportError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let (dataset, metadata) = self.parse_bytes(&contents)?;
        Ok((dataset, metadata.with_path(path)))
    }

    /// Parse in-memory text, e.g. an uploaded CSV body.
    pub fn parse_str(&self, data: &str) -> Result<(Dataset, SourceMetadata)> {
        self.parse_bytes(data.as_bytes())
    }

    /// Parse raw bytes, detecting the delimiter if not configured.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<(Dataset, SourceMetadata)> {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(bytes)?,
        };

        let dataset = self.read_records(bytes, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        debug!(
            format = %format,
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "parsed delimited input"
        );

        let metadata = SourceMetadata::new(
            None,
            hash,
            bytes.len() as u64,
            format,
            dataset.row_count(),
            dataset.column_count(),
        );

        Ok((dataset, metadata))
    }

    fn read_records(&self, bytes: &[u8], delimiter: u8) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut rows: Vec<Vec<String>> = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }
            let record = result?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        let headers: Vec<String> = if self.config.has_header {
            reader
                .headers()?
                .iter()
                .map(|s| s.trim().to_string())
                .collect()
        } else {
            // Generate column names from the widest row
            let width = rows.iter().map(Vec::len).max().unwrap_or(0);
            (0..width).map(|i| format!("column_{}", i + 1)).collect()
        };

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(GovReportError::EmptyData("No columns found".to_string()));
        }

        if rows.is_empty() {
            return Err(GovReportError::EmptyData("No data rows found".to_string()));
        }

        let expected_cols = headers.len();
        for row in &mut rows {
            // Pad short rows, truncate long ones
            row.resize(expected_cols, String::new());
        }

        Ok(Dataset::from_rows(headers, rows))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject extensions that are not delimited text.
fn check_extension(path: &Path) -> Result<()> {
    let Some(ext) = path.extension().map(|e| e.to_string_lossy().to_lowercase()) else {
        return Ok(());
    };

    if TEXT_EXTENSIONS.contains(&ext.as_str()) {
        return Ok(());
    }

    let message = match ext.as_str() {
        "xlsx" | "xls" => format!(".{} workbooks are not supported; export the sheet as CSV", ext),
        other => format!("unsupported file type: .{}", other),
    };
    Err(GovReportError::UnsupportedFormat(message))
}

/// Lines inspected when guessing the delimiter.
const SNIFF_LINES: usize = 10;

/// Pick the delimiter whose per-line field count is highest and steadiest
/// over the first non-blank lines. Ties favour tab, then comma.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let lines: Vec<String> = BufReader::new(bytes)
        .lines()
        .map_while(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .take(SNIFF_LINES)
        .collect();

    if lines.is_empty() {
        return Err(GovReportError::EmptyData("No lines to analyze".to_string()));
    }

    let best = DELIMITERS
        .iter()
        .map(|&delim| (delim, delimiter_score(&lines, delim)))
        .filter(|(_, score)| *score > 0)
        .fold(None, |best: Option<(u8, usize)>, candidate| match best {
            Some(current) if current.1 >= candidate.1 => Some(current),
            _ => Some(candidate),
        });

    Ok(best.map_or(b',', |(delim, _)| delim))
}

/// Score one delimiter: identical counts on every line beat nearly-identical
/// counts, which beat anything else.
fn delimiter_score(lines: &[String], delim: u8) -> usize {
    let counts: Vec<usize> = lines.iter().map(|l| unquoted_count(l, delim)).collect();
    let header = counts[0];
    if header == 0 {
        return 0;
    }

    if counts.iter().all(|&c| c == header) {
        let tab_bonus = if delim == b'\t' { 100 } else { 0 };
        return header * 1000 + tab_bonus;
    }

    let n = counts.len() as f64;
    let mean = counts.iter().sum::<usize>() as f64 / n;
    let spread = counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / n;
    if spread < 1.0 { header * 100 } else { header }
}

/// Occurrences of `delim` outside double quotes.
fn unquoted_count(line: &str, delim: u8) -> usize {
    let delim = delim as char;
    line.chars()
        .fold((0, false), |(count, quoted), ch| match ch {
            '"' => (count, !quoted),
            c if c == delim && !quoted => (count + 1, quoted),
            _ => (count, quoted),
        })
        .0
}
