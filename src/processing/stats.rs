/*! Section statistics.

For every top-level section title seen in a corpus:

- how many times it appears,
- how many times the section would be empty if its lists were removed,
- the sum of its distances from the last section of its document.

These help deciding which sections are worth filtering.
!*/
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::ops::AddAssign;
use std::path::Path;

use log::{error, info};
use serde::Serialize;

use crate::error::Error;
use crate::io::{parse, DocReader};
use crate::transformers::{in_set, remove_tags, section_title};
use crate::tree::{Document, Element, Tag};

/// Statistics about a single section title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SectionStats {
    pub count: usize,
    /// Number of occurrences that are empty once lists are removed.
    pub empty: usize,
    /// Sum of the distances from the last section.
    pub position: usize,
}

impl SectionStats {
    pub fn empty_ratio(&self) -> f64 {
        ratio(self.empty, self.count)
    }

    pub fn position_ratio(&self) -> f64 {
        ratio(self.position, self.count)
    }
}

fn ratio(n: usize, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        n as f64 / count as f64
    }
}

impl AddAssign for SectionStats {
    fn add_assign(&mut self, other: Self) {
        self.count += other.count;
        self.empty += other.empty;
        self.position += other.position;
    }
}

/// Tab-separated: count, empty, empty ratio, position, position ratio.
impl fmt::Display for SectionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.count,
            self.empty,
            self.empty_ratio(),
            self.position,
            self.position_ratio()
        )
    }
}

pub type Statistics = BTreeMap<String, SectionStats>;

/// Merge `other` into `stats`.
pub fn merge(stats: &mut Statistics, other: Statistics) {
    for (title, s) in other {
        *stats.entry(title).or_default() += s;
    }
}

fn titles(sections: &[&Element]) -> HashSet<String> {
    sections.iter().filter_map(|s| section_title(s)).collect()
}

/// Add the sections of `doc` to `stats`.
pub fn document_stats(doc: &Document, stats: &mut Statistics) -> Result<(), Error> {
    let sections: Vec<&Element> = doc.sections().collect();
    let total = sections.len();
    for (idx, section) in sections.iter().enumerate() {
        match section_title(section) {
            Some(title) => {
                let s = stats.entry(title).or_default();
                s.count += 1;
                s.position += total - (idx + 1);
            }
            None => error!(
                "No header for section {} in {}",
                idx + 1,
                doc.display_title()
            ),
        }
    }

    let all = titles(&sections);
    let lists: HashSet<String> = ["ol", "ul"].iter().map(|s| s.to_string()).collect();
    let mut without_lists = doc.clone();
    remove_tags(without_lists.root_mut(), in_set(&lists))?;
    let nonempty = titles(&without_lists.sections().collect::<Vec<_>>());

    for title in all.difference(&nonempty) {
        stats.entry(title.clone()).or_default().empty += 1;
    }
    Ok(())
}

/// Collect statistics from a gzipped JSON-lines file.
pub fn file_stats(src: &Path) -> Result<Statistics, Error> {
    info!("Collecting statistics from {:?}...", src);
    let mut stats = Statistics::new();
    for (idx, html) in DocReader::from_path(src)?.enumerate() {
        if let Err(Error::Io(e)) = html {
            return Err(Error::Io(e));
        }
        let result = html
            .and_then(|html| parse(&html))
            .and_then(|doc| document_stats(&doc, &mut stats));
        if let Err(e) = result {
            error!("Error in file {:?}, line {}: {}", src, idx + 1, e);
        }
    }
    info!(
        "Collected statistics about {} sections from {:?}.",
        stats.len(),
        src
    );
    Ok(stats)
}

/// Write statistics as TSV lines (title first), sorted by title.
pub fn to_tsv(stats: &Statistics) -> String {
    stats
        .iter()
        .map(|(title, s)| format!("{}\t{}\n", title, s))
        .collect()
}

/// Total length of the (trimmed) text of the paragraphs under `root`.
pub fn count_paragraph_chars(root: &Element) -> usize {
    if *root.tag() == Tag::Paragraph {
        return root.text_content().trim().chars().count();
    }
    root.child_elements().map(count_paragraph_chars).sum()
}
