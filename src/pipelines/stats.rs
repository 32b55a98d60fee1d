//! Section statistics over a directory of document files.
use std::path::PathBuf;

use log::{error, info};
use rayon::prelude::*;

use crate::error::Error;
use crate::processing::stats::{file_stats, merge, Statistics};

use super::pipeline::{input_files, thread_pool};
use super::Pipeline;

pub struct StatsPipeline {
    src: PathBuf,
    processes: usize,
}

impl StatsPipeline {
    pub fn new(src: PathBuf) -> Self {
        Self { src, processes: 1 }
    }

    pub fn with_processes(mut self, processes: usize) -> Self {
        self.processes = processes;
        self
    }
}

impl Pipeline<Statistics> for StatsPipeline {
    fn run(&self) -> Result<Statistics, Error> {
        let files = input_files(&self.src)?;
        let pool = thread_pool(self.processes)?;
        let stats = pool.install(|| {
            files
                .par_iter()
                .filter_map(|file| match file_stats(file) {
                    Ok(stats) => Some(stats),
                    Err(e) => {
                        error!("Error with file {:?}: {}", file, e);
                        None
                    }
                })
                .reduce(Statistics::new, |mut all, stats| {
                    merge(&mut all, stats);
                    all
                })
        });
        info!("Done. Collected statistics for {} sections.", stats.len());
        Ok(stats)
    }
}
