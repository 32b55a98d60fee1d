/*! Filtering pipeline.

For each gzipped JSON-lines file of the source directory, writes a file of the same
name in the destination directory, containing the filtered documents:

1. documents whose title is unwanted are skipped,
2. the trailing unwanted sections are removed,
3. empty elements are removed,
4. documents that are left without a body are skipped.

Files are processed in parallel. Documents that fail to parse or to be
filtered are logged and skipped.
!*/
use std::path::{Path, PathBuf};

use log::{debug, error, info};
use rayon::prelude::*;

use crate::error::Error;
use crate::filtering::{Filter, TitleFilter};
use crate::io::{parse, to_html, DocReader, DocWriter};
use crate::transformers::{remove_empty, remove_trailing_sections, SectionFilter};
use crate::tree::Document;

use super::pipeline::{ensure_dir, input_files, log_document_error, thread_pool};
use super::Pipeline;

pub struct FilterPipeline {
    src: PathBuf,
    dst: PathBuf,
    sections: SectionFilter,
    documents: TitleFilter,
    processes: usize,
}

impl FilterPipeline {
    pub fn new(src: PathBuf, dst: PathBuf, sections: SectionFilter, documents: TitleFilter) -> Self {
        Self {
            src,
            dst,
            sections,
            documents,
            processes: 1,
        }
    }

    pub fn with_processes(mut self, processes: usize) -> Self {
        self.processes = processes;
        self
    }

    /// Filter a single document.
    ///
    /// Returns `None` if the document is to be skipped.
    pub fn filter_document(&self, html: &str) -> Result<Option<Document>, Error> {
        let mut doc = parse(html).map_err(|e| e.in_document(None))?;
        if !self.documents.detect(&doc) {
            return Ok(None);
        }

        self.remove_sections(&mut doc)
            .map_err(|e| e.in_document(doc.title().as_deref()))?;

        if doc.body().is_none() {
            debug!("Skipping empty document {}", doc.display_title());
            return Ok(None);
        }
        Ok(Some(doc))
    }

    fn remove_sections(&self, doc: &mut Document) -> Result<(), Error> {
        if !self.sections.is_noop() {
            remove_trailing_sections(doc.root_mut(), &self.sections)?;
        }
        remove_empty(doc.root_mut())
    }

    /// Filter `src` into `dst`, returning the number of documents read and written.
    fn filter_file(&self, src: &Path) -> Result<(usize, usize), Error> {
        let dst = match src.file_name() {
            Some(name) => self.dst.join(name),
            None => return Err(Error::Custom(format!("invalid input file {:?}", src))),
        };
        info!("Filtering {:?} to {:?}...", src, dst);

        let reader = DocReader::from_path(src)?;
        let mut writer = DocWriter::create(&dst)?;
        let mut read = 0;
        for (idx, html) in reader.enumerate() {
            read += 1;
            // a broken gzip stream loses the rest of the file
            let html = match html {
                Err(Error::Io(e)) => return Err(Error::Io(e)),
                html => html,
            };
            let filtered = html.and_then(|html| self.filter_document(&html));
            match filtered {
                Ok(Some(doc)) => writer.write(&to_html(&doc)?)?,
                Ok(None) => (),
                Err(e) => log_document_error(src, idx + 1, &e),
            }
        }
        let written = writer.finish()?;

        info!(
            "Filtered {} documents from {:?}; kept {}.",
            read - written,
            src,
            written
        );
        Ok((read, written))
    }
}

impl Pipeline<(usize, usize)> for FilterPipeline {
    /// Returns the total number of documents read and written.
    fn run(&self) -> Result<(usize, usize), Error> {
        ensure_dir(&self.dst)?;
        let files = input_files(&self.src)?;

        let pool = thread_pool(self.processes)?;
        let results: Vec<(usize, usize)> = pool.install(|| {
            files
                .par_iter()
                .filter_map(|file| match self.filter_file(file) {
                    Ok(counts) => Some(counts),
                    Err(e) => {
                        error!("Error with file {:?}: {}", file, e);
                        None
                    }
                })
                .collect()
        });

        let (read, written) = results
            .into_iter()
            .fold((0, 0), |(r, w), (read, written)| (r + read, w + written));
        info!(
            "Done. Filtered a total of {} documents, keeping {}.",
            read, written
        );
        Ok((read, written))
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use super::*;

    fn pipeline(titles: &[&str], documents: Option<&str>) -> FilterPipeline {
        FilterPipeline::new(
            PathBuf::new(),
            PathBuf::new(),
            SectionFilter::with_titles(titles.iter().copied()),
            TitleFilter::new(documents.map(|p| Regex::new(p).unwrap())),
        )
    }

    const DOC: &str = "<html><head><title>Paris</title></head><body>\
        <section><h2>History</h2><p>Old.</p></section>\
        <section><h2>See also</h2><ul><li>Lyon</li></ul></section>\
        </body></html>";

    #[test]
    fn removes_trailing_sections() {
        let doc = pipeline(&["See also"], None).filter_document(DOC).unwrap().unwrap();
        assert_eq!(doc.sections().count(), 1);
        assert_eq!(doc.title(), Some("Paris".to_string()));
    }

    #[test]
    fn skips_filtered_titles() {
        let p = pipeline(&[], Some("^Par"));
        assert!(p.filter_document(DOC).unwrap().is_none());
    }

    #[test]
    fn skips_emptied_documents() {
        let html = "<html><head><title>T</title></head><body>\
            <section><h2>References</h2><p>x</p></section></body></html>";
        assert!(pipeline(&["References"], None)
            .filter_document(html)
            .unwrap()
            .is_none());
    }
    #[test]
    fn parse_errors_are_tagged() {
        let mut html = String::from("<html><body><section>");
        for _ in 0..600 {
            html.push_str("<div>");
        }
        match pipeline(&[], None).filter_document(&html) {
            Err(Error::Document { title, source }) => {
                assert_eq!(title, "untitled");
                assert!(matches!(*source, Error::TooDeep { .. }));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn rejects_malformed_documents() {
        let html = "<html><head><title>T</title></head><body>stray\
            <section><h2>A</h2><p>x</p></section></body></html>";
        match pipeline(&[], None).filter_document(html) {
            Err(Error::Document { title, source }) => {
                assert_eq!(title, "T");
                assert!(matches!(*source, Error::Malformed(_)));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }
}
