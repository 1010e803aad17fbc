// src/matrix.rs

//! Parsing of language distance matrices.
//!
//! The input is a plain text document of sections:
//!
//! ```text
//! # english
//! apple=ˈæpəl\t0.0 0.5
//! banana=bəˈnɑːnə\t0.5 0.0
//! ```
//!
//! A `#` line opens a section named by the rest of the line (trimmed and
//! lowercased). Each following line is one matrix row: a `word=...` label, a
//! tab, and space separated values.

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use std::fmt;

/// Starting point for the off-diagonal maximum. Matrices without a positive
/// off-diagonal cell keep it, so every positive cell saturates at the top of
/// the gradient.
const MAX_VALUE_FLOOR: f64 = f64::MIN_POSITIVE;

/// A recoverable problem noticed while parsing. Each one is logged at `warn`
/// level as it is found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A row whose value count differs from the number of rows.
    MismatchedRow {
        language: String,
        row: usize,
        len: usize,
        expected: usize,
    },
    /// Data lines that appeared before the first `#` header.
    HeaderlessData { lines: usize },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::MismatchedRow {
                language,
                row,
                len,
                expected,
            } => write!(
                f,
                "Mismatched size in {}: row {} has {} values, expected {}",
                language, row, len, expected
            ),
            ParseWarning::HeaderlessData { lines } => write!(
                f,
                "{} data lines appear before the first '#' header; storing them under an empty language label",
                lines
            ),
        }
    }
}

fn report(warnings: &mut Vec<ParseWarning>, warning: ParseWarning) {
    warn!("{}", warning);
    warnings.push(warning);
}

/// A square matrix of values for one language.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedMatrix {
    language: String,
    values: Vec<Vec<f64>>,
    max_value: f64,
}

impl NamedMatrix {
    /// Builds a matrix from the raw data lines of one section.
    ///
    /// Fails on a line without a tab separator or on a token that is not a
    /// number. Rows whose length differs from the row count only log a warning.
    pub fn build<S: AsRef<str>>(language: &str, lines: &[S]) -> Result<Self> {
        Self::build_reporting(language, lines, &mut Vec::new())
    }

    fn build_reporting<S: AsRef<str>>(
        language: &str,
        lines: &[S],
        warnings: &mut Vec<ParseWarning>,
    ) -> Result<Self> {
        let mut values = Vec::with_capacity(lines.len());
        let mut max_value = MAX_VALUE_FLOOR;

        for (r, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let mut fields = line.split('\t');
            // The word before '=' only names the row; position is what indexes it.
            let word = fields
                .next()
                .and_then(|label| label.split('=').next())
                .unwrap_or_default();
            let data = fields.next().ok_or_else(|| {
                anyhow!(
                    "line {} of section '{}' has no tab separator: {:?}",
                    r + 1,
                    language,
                    line
                )
            })?;

            let mut row = Vec::new();
            for (c, token) in data.split(' ').filter(|t| !t.is_empty()).enumerate() {
                let value: f64 = token.trim().parse().with_context(|| {
                    format!(
                        "invalid number {:?} in row {} ('{}') of section '{}'",
                        token,
                        r + 1,
                        word,
                        language
                    )
                })?;
                if r != c && value > max_value {
                    max_value = value;
                }
                row.push(value);
            }
            values.push(row);
        }

        let rows = values.len();
        for (r, row) in values.iter().enumerate() {
            if row.len() != rows {
                report(
                    warnings,
                    ParseWarning::MismatchedRow {
                        language: language.to_string(),
                        row: r + 1,
                        len: row.len(),
                        expected: rows,
                    },
                );
            }
        }

        debug!(
            "Built matrix '{}' with {} rows, max off-diagonal {}",
            language, rows, max_value
        );

        Ok(Self {
            language: language.to_string(),
            values,
            max_value,
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Largest value among cells whose row differs from their column.
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// Number of rows, which is also the grid dimension used for rendering.
    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    /// Returns the value at `(row, col)`, or `None` when a short row lacks it.
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row).and_then(|r| r.get(col)).copied()
    }

    /// True when every row has as many values as there are rows.
    pub fn is_square(&self) -> bool {
        let n = self.values.len();
        self.values.iter().all(|row| row.len() == n)
    }
}

/// Splits a document into sections and builds one matrix per section, in order.
pub fn parse_document(text: &str) -> Result<Vec<NamedMatrix>> {
    parse_document_with_warnings(text).map(|(matrices, _)| matrices)
}

/// Like [`parse_document`], also returning the warnings that were logged.
pub fn parse_document_with_warnings(
    text: &str,
) -> Result<(Vec<NamedMatrix>, Vec<ParseWarning>)> {
    let mut matrices = Vec::new();
    let mut warnings = Vec::new();
    let mut language: Option<String> = None;
    let mut data: Vec<&str> = Vec::new();

    for raw in text.lines() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.trim().is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('#') {
            flush_section(&mut matrices, &mut warnings, language.take(), &mut data)?;
            language = Some(header.trim().to_lowercase());
        } else {
            data.push(line);
        }
    }
    flush_section(&mut matrices, &mut warnings, language, &mut data)?;

    info!(
        "Parsed {} matrices ({} warnings)",
        matrices.len(),
        warnings.len()
    );
    Ok((matrices, warnings))
}

fn flush_section(
    matrices: &mut Vec<NamedMatrix>,
    warnings: &mut Vec<ParseWarning>,
    language: Option<String>,
    data: &mut Vec<&str>,
) -> Result<()> {
    let language = match language {
        Some(language) => language,
        None if data.is_empty() => return Ok(()),
        None => {
            report(
                warnings,
                ParseWarning::HeaderlessData { lines: data.len() },
            );
            String::new()
        }
    };

    let matrix = NamedMatrix::build_reporting(&language, data, warnings)
        .with_context(|| format!("Failed to build matrix for section '{}'", language))?;
    matrices.push(matrix);
    data.clear();
    Ok(())
}
