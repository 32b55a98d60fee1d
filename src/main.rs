//! # zim-corpus
//!
//! Filters and converts documents in the simple HTML format
//! (Wikipedia pages or Project Gutenberg books extracted from ZIM archives).
//!
//! ```sh
//! zim-corpus 0.3.0
//! simple HTML corpus preparation tool.
//!
//! USAGE:
//!     zim-corpus <SUBCOMMAND>
//!
//! SUBCOMMANDS:
//!     convert    Convert simple HTML files to plain text
//!     filter     Filter sections and documents out of simple HTML files
//!     help       Prints this message or the help of the given subcommand(s)
//!     stats      Collect statistics about top-level sections
//! ```
use structopt::StructOpt;

#[macro_use]
extern crate log;

mod cli;

use zim_corpus::converters::TextConverter;
use zim_corpus::error::Error;
use zim_corpus::filtering::{file_to_regex, file_to_set, pattern_count, TitleFilter};
use zim_corpus::pipelines::{ConvertPipeline, FilterPipeline, Pipeline, StatsPipeline};
use zim_corpus::processing::stats::to_tsv;
use zim_corpus::transformers::SectionFilter;

/// Load the filter lists.
fn load_lists(lists: &cli::FilterLists) -> Result<(SectionFilter, TitleFilter), Error> {
    let titles = file_to_set(lists.sections.as_deref())?;
    let sections_regex = file_to_regex(lists.sections_regex.as_deref())?;
    let documents = file_to_regex(lists.documents.as_deref())?;

    if !titles.is_empty() {
        info!("Filtering {} exact sections.", titles.len());
    }
    if let Some(pattern) = &sections_regex {
        info!("Filtering {} section patterns.", pattern_count(pattern));
    }
    if let Some(pattern) = &documents {
        info!("Filtering {} document patterns.", pattern_count(pattern));
    }

    Ok((
        SectionFilter::new(titles, sections_regex),
        TitleFilter::new(documents),
    ))
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::ZimCorpus::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::ZimCorpus::Filter(f) => {
            if f.lists.is_empty() {
                return Err(Error::Custom(
                    "At least one filtering option (-s, -S, -d) must be specified.".to_string(),
                ));
            }
            let (sections, documents) = load_lists(&f.lists)?;
            let p = FilterPipeline::new(f.src, f.dst, sections, documents)
                .with_processes(f.processes);
            p.run()?;
        }

        cli::ZimCorpus::Convert(c) => {
            let (sections, documents) = load_lists(&c.lists)?;
            let mut converter = TextConverter::new(c.headers, c.lists_kept).with_indent(c.indent);
            if let Some(bullet) = &c.bullet {
                converter = converter.with_bullet(bullet);
            }
            let p = ConvertPipeline::new(c.src, c.dst, converter)
                .with_sections(sections)
                .with_documents(documents)
                .with_unit(c.unit)
                .uncased(c.uncased)
                .with_processes(c.processes);
            p.run()?;
        }

        cli::ZimCorpus::Stats(s) => {
            let stats = StatsPipeline::new(s.src)
                .with_processes(s.processes)
                .run()?;
            if s.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{}", to_tsv(&stats));
            }
        }
    };
    Ok(())
}
