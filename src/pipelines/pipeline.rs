//! Pipeline trait, and helpers shared by file-based pipelines.
use std::path::{Path, PathBuf};

use log::{error, info, warn};
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::Error;

/// This trait must be implemented for each Pipeline,
/// and is generic over the return type so that
/// any custom pipeline that needs a return type can use the
/// trait aswell.
pub trait Pipeline<T> {
    fn run(&self) -> Result<T, Error>;
}

/// List the files in `src`, sorted.
pub(crate) fn input_files(src: &Path) -> Result<Vec<PathBuf>, Error> {
    let pattern = src.join("*");
    let pattern = pattern
        .to_str()
        .ok_or_else(|| Error::Custom(format!("invalid input path {:?}", src)))?;
    let mut files = Vec::new();
    for entry in glob::glob(pattern)? {
        let path = entry?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    info!("Scheduled {} files from {:?}", files.len(), src);
    Ok(files)
}

/// Create the destination directory if needed.
pub(crate) fn ensure_dir(dst: &Path) -> Result<(), Error> {
    if !dst.exists() {
        warn!("Destination {:?} does not exist. Creating", dst);
        std::fs::create_dir_all(dst)?;
    }
    if !dst.is_dir() {
        return Err(Error::Custom(format!(
            "Destination has to be a directory: {:?}",
            dst
        )));
    }
    Ok(())
}

/// Thread pool of `processes` threads.
pub(crate) fn thread_pool(processes: usize) -> Result<ThreadPool, Error> {
    if processes < 1 {
        return Err(Error::Custom(
            "Number of processes must be at least 1".to_string(),
        ));
    }
    Ok(ThreadPoolBuilder::new().num_threads(processes).build()?)
}

/// Log a per-document error, with its location.
pub(crate) fn log_document_error(file: &Path, line: usize, error: &Error) {
    error!("Something happened in file {:?}, line {}: {}", file, line, error);
}
