/*! Writer for gzipped document files.

Documents are written as JSON-lines (one JSON string per line),
converted text is written as is.
!*/
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::Error;

pub struct Writer<W: Write> {
    handle: W,
    written: usize,
}

pub type DocWriter = Writer<GzEncoder<BufWriter<File>>>;

impl DocWriter {
    /// Create (or truncate) a gzipped file at `dst`.
    pub fn create(dst: &Path) -> Result<Self, Error> {
        let file = File::create(dst)?;
        Ok(Self::new(GzEncoder::new(
            BufWriter::new(file),
            Compression::default(),
        )))
    }

    /// Flush and close the gzip stream.
    pub fn finish(self) -> Result<usize, Error> {
        let mut inner = self.handle.finish()?;
        inner.flush()?;
        Ok(self.written)
    }
}

impl<W: Write> Writer<W> {
    pub fn new(handle: W) -> Self {
        Self { handle, written: 0 }
    }

    /// Write a document's HTML as a JSON-lines entry.
    pub fn write(&mut self, html: &str) -> Result<(), Error> {
        serde_json::to_writer(&mut self.handle, html)?;
        self.handle.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Write raw text.
    pub fn write_text(&mut self, text: &str) -> Result<(), Error> {
        self.handle.write_all(text.as_bytes())?;
        self.written += 1;
        Ok(())
    }

    /// Number of entries written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::DocReader;

    #[test]
    fn json_lines() {
        let mut w = Writer::new(Vec::new());
        w.write("<p>\"quoted\"\nline</p>").unwrap();
        w.write_text("raw\n").unwrap();
        assert_eq!(w.written(), 2);
        let out = String::from_utf8(w.into_inner()).unwrap();
        assert_eq!(out, "\"<p>\\\"quoted\\\"\\nline</p>\"\nraw\n");
    }

    #[test]
    fn gz_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.jsonl.gz");
        let mut w = DocWriter::create(&path).unwrap();
        w.write("<html>1</html>").unwrap();
        w.write("<html>2</html>").unwrap();
        assert_eq!(w.finish().unwrap(), 2);

        let docs: Vec<String> = DocReader::from_path(&path)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(docs, vec!["<html>1</html>", "<html>2</html>"]);
    }
}
