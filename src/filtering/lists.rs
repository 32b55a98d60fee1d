//! Filter list files.
//!
//! Filter lists are text files with one entry per line:
//! exact section titles, or regular expressions.
//! Surrounding whitespace is trimmed and empty lines are ignored.
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use itertools::Itertools;
use regex::{Regex, RegexBuilder};

use crate::error::Error;

/// Read the entries of a list file, in file order, without duplicates.
pub fn read_lines(path: &Path) -> Result<Vec<String>, Error> {
    let reader = BufReader::new(File::open(path)?);
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }
    Ok(lines.into_iter().unique().collect())
}

/// Load a list file into a set. No file means an empty set.
pub fn file_to_set(path: Option<&Path>) -> Result<HashSet<String>, Error> {
    match path {
        Some(path) => Ok(read_lines(path)?.into_iter().collect()),
        None => Ok(HashSet::new()),
    }
}

/// Build a single case-insensitive regex that is the disjunction of `patterns`.
///
/// Returns `None` if there are no patterns.
pub fn disjunction<I, S>(patterns: I) -> Result<Option<Regex>, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = patterns
        .into_iter()
        .map(|p| format!("({})", p.as_ref()))
        .join("|");
    if joined.is_empty() {
        return Ok(None);
    }
    let regex = RegexBuilder::new(&joined).case_insensitive(true).build()?;
    Ok(Some(regex))
}

/// Load a pattern file into a single regex (see [disjunction]).
/// No file means no regex.
pub fn file_to_regex(path: Option<&Path>) -> Result<Option<Regex>, Error> {
    match path {
        Some(path) => disjunction(read_lines(path)?),
        None => Ok(None),
    }
}

/// Number of alternatives in a regex built by [disjunction], for logging.
pub fn pattern_count(regex: &Regex) -> usize {
    regex.captures_len() - 1
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn list_file(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn set_from_file() {
        let f = list_file("References\n  See also \n\nReferences\n");
        let set = file_to_set(Some(f.path())).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("See also"));
        assert!(!set.contains(""));
    }

    #[test]
    fn no_file() {
        assert!(file_to_set(None).unwrap().is_empty());
        assert!(file_to_regex(None).unwrap().is_none());
    }

    #[test]
    fn regex_from_file() {
        let f = list_file("^external links$\nbibliograph\n");
        let regex = file_to_regex(Some(f.path())).unwrap().unwrap();
        assert!(regex.is_match("External Links"));
        assert!(regex.is_match("Selected bibliography"));
        assert!(!regex.is_match("External links and more"));
        assert_eq!(pattern_count(&regex), 2);
    }

    #[test]
    fn empty_file_gives_no_regex() {
        let f = list_file("\n\n");
        assert!(file_to_regex(Some(f.path())).unwrap().is_none());
    }

    #[test]
    fn invalid_pattern() {
        assert!(matches!(disjunction(["("]), Err(Error::Regex(_))));
    }
}
