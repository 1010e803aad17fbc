// src/selection.rs

//! Picks which loaded matrix is displayed.

use crate::matrix::NamedMatrix;
use anyhow::{bail, Result};
use std::fmt;
use std::str::FromStr;

/// Identifies one matrix of the loaded collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixSelector {
    /// Position in file order, from 0.
    Index(usize),
    /// Section label, compared lowercased like the parser stores it.
    Language(String),
}

impl Default for MatrixSelector {
    fn default() -> Self {
        MatrixSelector::Index(0)
    }
}

impl FromStr for MatrixSelector {
    type Err = anyhow::Error;

    /// All digits is an index; anything else names a language.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(MatrixSelector::Index(s.parse()?));
        }
        Ok(MatrixSelector::Language(s.to_lowercase()))
    }
}

impl fmt::Display for MatrixSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixSelector::Index(i) => write!(f, "index {}", i),
            MatrixSelector::Language(l) => write!(f, "language '{}'", l),
        }
    }
}

impl MatrixSelector {
    /// Resolves the selector, failing when nothing matches.
    pub fn select<'a>(&self, matrices: &'a [NamedMatrix]) -> Result<&'a NamedMatrix> {
        if matrices.is_empty() {
            bail!("cannot select {}: no matrices were loaded", self);
        }
        let found = match self {
            MatrixSelector::Index(i) => matrices.get(*i),
            MatrixSelector::Language(l) => matrices.iter().find(|m| m.language() == l.as_str()),
        };
        match found {
            Some(matrix) => Ok(matrix),
            None => bail!(
                "no matrix matches {} ({} matrices loaded)",
                self,
                matrices.len()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::parse_document;

    fn loaded() -> Vec<NamedMatrix> {
        parse_document("#english\na=1\t0\n#german\nb=1\t0\n#old norse\nc=1\t0\n").unwrap()
    }

    #[test_log::test]
    fn parses_index_or_language() {
        assert_eq!("2".parse::<MatrixSelector>().unwrap(), MatrixSelector::Index(2));
        assert_eq!(
            " German ".parse::<MatrixSelector>().unwrap(),
            MatrixSelector::Language("german".into())
        );
        assert_eq!(
            "-1".parse::<MatrixSelector>().unwrap(),
            MatrixSelector::Language("-1".into())
        );
    }

    #[test_log::test]
    fn selects_by_index_and_by_language() {
        let matrices = loaded();
        let by_index = MatrixSelector::Index(1).select(&matrices).unwrap();
        assert_eq!(by_index.language(), "german");

        let by_name: MatrixSelector = "Old Norse".parse().unwrap();
        assert_eq!(by_name.select(&matrices).unwrap().language(), "old norse");

        assert_eq!(MatrixSelector::default().select(&matrices).unwrap().language(), "english");
    }

    #[test_log::test]
    fn out_of_range_is_an_error_not_a_panic() {
        let matrices = loaded();
        let err = MatrixSelector::Index(22).select(&matrices).unwrap_err();
        assert!(err.to_string().contains("index 22"), "{}", err);
        assert!(err.to_string().contains("3 matrices"), "{}", err);

        assert!(MatrixSelector::Language("latin".into()).select(&matrices).is_err());
    }

    #[test_log::test]
    fn empty_collection_is_an_error() {
        let err = MatrixSelector::default().select(&[]).unwrap_err();
        assert!(err.to_string().contains("no matrices were loaded"), "{}", err);
    }
}
