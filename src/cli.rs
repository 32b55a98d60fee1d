//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

use zim_corpus::pipelines::Unit;

#[derive(Debug, StructOpt)]
#[structopt(name = "zim-corpus", about = "simple HTML corpus preparation tool.")]
/// Holds every command that is callable by the `zim-corpus` command.
pub enum ZimCorpus {
    #[structopt(about = "Filter sections and documents out of simple HTML files")]
    Filter(Filter),
    #[structopt(about = "Convert simple HTML files to plain text")]
    Convert(Convert),
    #[structopt(about = "Collect statistics about top-level sections")]
    Stats(Stats),
}

/// Filter lists shared by `filter` and `convert`.
#[derive(Debug, StructOpt)]
pub struct FilterLists {
    #[structopt(
        short = "s",
        long = "filter-sections",
        parse(from_os_str),
        help = "file listing the titles of sections to remove, one per line"
    )]
    pub sections: Option<PathBuf>,
    #[structopt(
        short = "S",
        long = "filter-sections-by-regex",
        parse(from_os_str),
        help = "file listing patterns of section titles to remove, one per line"
    )]
    pub sections_regex: Option<PathBuf>,
    #[structopt(
        short = "d",
        long = "filter-documents",
        parse(from_os_str),
        help = "file listing patterns of titles of documents to skip, one per line"
    )]
    pub documents: Option<PathBuf>,
}

impl FilterLists {
    pub fn is_empty(&self) -> bool {
        self.sections.is_none() && self.sections_regex.is_none() && self.documents.is_none()
    }
}

#[derive(Debug, StructOpt)]
/// Filter command and parameters.
///
/// ```sh
/// zim-corpus filter -s sections.txt -P 4 htmls/ filtered/
/// ```
pub struct Filter {
    #[structopt(parse(from_os_str), help = "input directory")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "output directory")]
    pub dst: PathBuf,
    #[structopt(flatten)]
    pub lists: FilterLists,
    #[structopt(
        short = "P",
        long = "processes",
        default_value = "1",
        help = "number of worker threads"
    )]
    pub processes: usize,
}

#[derive(Debug, StructOpt)]
/// Convert command and parameters.
pub struct Convert {
    #[structopt(parse(from_os_str), help = "input directory")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "output directory")]
    pub dst: PathBuf,
    #[structopt(flatten)]
    pub lists: FilterLists,
    #[structopt(
        short = "u",
        long = "unit",
        default_value = "document",
        help = "unit converted to a single output document (doc, document or section)"
    )]
    pub unit: Unit,
    #[structopt(short = "c", long = "uncased", help = "lowercase the text")]
    pub uncased: bool,
    #[structopt(long = "headers", help = "keep headings")]
    pub headers: bool,
    #[structopt(long = "lists", help = "keep lists")]
    pub lists_kept: bool,
    #[structopt(long = "bullet", help = "bullet for list items")]
    pub bullet: Option<String>,
    #[structopt(
        long = "indent",
        default_value = "0",
        help = "indentation of nested lists, in spaces"
    )]
    pub indent: usize,
    #[structopt(
        short = "P",
        long = "processes",
        default_value = "1",
        help = "number of worker threads"
    )]
    pub processes: usize,
}

#[derive(Debug, StructOpt)]
/// Stats command and parameters.
pub struct Stats {
    #[structopt(parse(from_os_str), help = "input directory")]
    pub src: PathBuf,
    #[structopt(long = "json", help = "print JSON instead of TSV")]
    pub json: bool,
    #[structopt(
        short = "P",
        long = "processes",
        default_value = "1",
        help = "number of worker threads"
    )]
    pub processes: usize,
}
