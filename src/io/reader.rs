/*! Reader for gzipped JSON-lines document files.

Each line holds one JSON string: the simple HTML of a document.

An I/O error (truncated or corrupt gzip stream) ends the iteration:
it is returned once, then the reader yields `None`.
!*/
use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::Error;

#[derive(Debug)]
pub struct Reader<T>
where
    T: Read,
{
    lines: Lines<BufReader<T>>,
    failed: bool,
}

pub type DocReader = Reader<MultiGzDecoder<File>>;

impl DocReader {
    pub fn from_path(src: &Path) -> Result<Self, Error> {
        let handle = File::open(src)?;
        Ok(Self::new(MultiGzDecoder::new(handle)))
    }
}

impl<T> Reader<T>
where
    T: Read,
{
    /// Read (uncompressed) lines from any reader.
    pub fn new(inner: T) -> Self {
        Self {
            lines: BufReader::new(inner).lines(),
            failed: false,
        }
    }
}

impl<T> Iterator for Reader<T>
where
    T: Read,
{
    type Item = Result<String, Error>;

    /// iterates over documents, skipping blank lines
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(Error::Io(e)));
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            return Some(serde_json::from_str::<String>(&line).map_err(Error::Serde));
        }
    }
}
