/*! Conversion pipeline.

Converts every gzipped JSON-lines file of the source directory into a
gzipped text file in the destination directory, with the same name
(`htmls` replaced by `txt`).

Before conversion, control characters (except tabs and newlines) are stripped,
unwanted documents are skipped and unwanted trailing sections removed.
The conversion unit is either the whole document or each of its sections.
!*/
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use lazy_static::lazy_static;
use log::{debug, error, info};
use rayon::prelude::*;
use regex::Regex;

use crate::converters::Converter;
use crate::error::Error;
use crate::filtering::{Filter, TitleFilter};
use crate::io::{parse, DocReader, DocWriter};
use crate::transformers::{remove_trailing_sections, SectionFilter};

use super::pipeline::{ensure_dir, input_files, log_document_error, thread_pool};
use super::Pipeline;

lazy_static! {
    /// Control, format, unassigned and private use characters, bar tab and newline.
    static ref CONTROL_CHARS: Regex = Regex::new(r"[\p{C}--[\t\n]]").unwrap();
}

/// Remove control characters (other than `\t` and `\n`) from `text`.
pub fn strip_control_chars(text: &str) -> String {
    CONTROL_CHARS.replace_all(text, "").into_owned()
}

/// What becomes a single output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Document,
    Section,
}

impl Default for Unit {
    fn default() -> Self {
        Unit::Document
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "doc" | "document" => Ok(Unit::Document),
            "section" => Ok(Unit::Section),
            other => Err(Error::Custom(format!(
                "invalid unit {}: expected doc, document or section",
                other
            ))),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Document => write!(f, "document"),
            Unit::Section => write!(f, "section"),
        }
    }
}

pub struct ConvertPipeline<C> {
    src: PathBuf,
    dst: PathBuf,
    converter: C,
    sections: SectionFilter,
    documents: TitleFilter,
    unit: Unit,
    uncased: bool,
    processes: usize,
}

impl<C> ConvertPipeline<C>
where
    C: Converter + Sync,
{
    pub fn new(src: PathBuf, dst: PathBuf, converter: C) -> Self {
        Self {
            src,
            dst,
            converter,
            sections: SectionFilter::default(),
            documents: TitleFilter::default(),
            unit: Unit::default(),
            uncased: false,
            processes: 1,
        }
    }

    pub fn with_sections(mut self, sections: SectionFilter) -> Self {
        self.sections = sections;
        self
    }

    pub fn with_documents(mut self, documents: TitleFilter) -> Self {
        self.documents = documents;
        self
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    /// Lowercase the converted text.
    pub fn uncased(mut self, uncased: bool) -> Self {
        self.uncased = uncased;
        self
    }

    pub fn with_processes(mut self, processes: usize) -> Self {
        self.processes = processes;
        self
    }

    /// Output file name: `htmls` in the input name is replaced by `txt`.
    fn output_path(&self, src: &Path) -> Result<PathBuf, Error> {
        match src.file_name().and_then(|name| name.to_str()) {
            Some(name) => Ok(self.dst.join(name.replace("htmls", "txt"))),
            None => Err(Error::Custom(format!("invalid input file {:?}", src))),
        }
    }

    /// Convert a single document.
    ///
    /// Returns `None` if the document is to be skipped.
    pub fn convert_document(&self, html: &str) -> Result<Option<String>, Error> {
        let mut doc = parse(&strip_control_chars(html)).map_err(|e| e.in_document(None))?;
        if !self.documents.detect(&doc) {
            return Ok(None);
        }

        if !self.sections.is_noop() {
            remove_trailing_sections(doc.root_mut(), &self.sections)
                .map_err(|e| e.in_document(doc.title().as_deref()))?;
        }

        let docs = match self.unit {
            Unit::Document => vec![doc],
            Unit::Section => {
                let title = doc.display_title();
                let sections = doc.into_section_documents();
                for (idx, section) in sections.iter().enumerate() {
                    if section.title().map_or(true, |t| t.is_empty()) {
                        debug!("No section title for section {} in {}", idx + 1, title);
                    }
                }
                sections
            }
        };

        let mut out = String::new();
        for doc in docs {
            out.push_str(&self.converter.convert(doc)?);
        }
        if self.uncased {
            out = out.to_lowercase();
        }
        Ok(Some(out))
    }

    /// Convert `src`, returning the number of documents read.
    fn convert_file(&self, src: &Path) -> Result<usize, Error> {
        let dst = self.output_path(src)?;
        info!("Converting {:?} to {:?}...", src, dst);

        let reader = DocReader::from_path(src)?;
        let mut writer = DocWriter::create(&dst)?;
        if let Some(header) = self.converter.header() {
            writer.write_text(&header)?;
            writer.write_text("\n")?;
        }

        let mut read = 0;
        for (idx, html) in reader.enumerate() {
            read += 1;
            let html = match html {
                Err(Error::Io(e)) => return Err(Error::Io(e)),
                html => html,
            };
            match html.and_then(|html| self.convert_document(&html)) {
                Ok(Some(text)) => writer.write_text(&text)?,
                Ok(None) => (),
                Err(e) => log_document_error(src, idx + 1, &e),
            }
        }
        writer.finish()?;

        info!("Converted {} documents from {:?} to {:?}.", read, src, dst);
        Ok(read)
    }
}

impl<C> Pipeline<usize> for ConvertPipeline<C>
where
    C: Converter + Sync,
{
    /// Returns the total number of documents read.
    fn run(&self) -> Result<usize, Error> {
        ensure_dir(&self.dst)?;
        let files = input_files(&self.src)?;
        info!(
            "Converting by {}, filtering {} sections.",
            self.unit,
            self.sections.titles().len()
        );

        let pool = thread_pool(self.processes)?;
        let total = pool.install(|| {
            files
                .par_iter()
                .map(|file| match self.convert_file(file) {
                    Ok(read) => read,
                    Err(e) => {
                        error!("Error with file {:?}: {}", file, e);
                        0
                    }
                })
                .sum::<usize>()
        });

        info!("Done. Converted a total of {} documents.", total);
        Ok(total)
    }
}
