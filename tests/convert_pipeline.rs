use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use zim_corpus::converters::TextConverter;
use zim_corpus::pipelines::{ConvertPipeline, Pipeline, StatsPipeline, Unit};
use zim_corpus::transformers::SectionFilter;

const BOOK: &str = "<html><head><title>A Book</title></head><body>\
    <section><h1>Chapter I</h1><p>First\u{0}Page.</p>\
    <ul><li>item</li></ul></section>\
    <section><h1>Chapter II</h1><p>Second Page.</p></section>\
    <section><h1>Transcriber's notes</h1><p>typos</p></section>\
    </body></html>";

fn write_gz(path: &Path, lines: &[&str]) {
    let mut gz = GzEncoder::new(fs::File::create(path).unwrap(), Compression::default());
    for line in lines {
        serde_json::to_writer(&mut gz, line).unwrap();
        gz.write_all(b"\n").unwrap();
    }
    gz.finish().unwrap();
}

fn read_gz(path: &Path) -> String {
    let mut s = String::new();
    MultiGzDecoder::new(fs::File::open(path).unwrap())
        .read_to_string(&mut s)
        .unwrap();
    s
}

#[test]
fn convert_by_section() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    write_gz(&src.path().join("gutenberg_htmls_1.gz"), &[BOOK, BOOK]);

    let total = ConvertPipeline::new(
        src.path().to_path_buf(),
        dst.path().to_path_buf(),
        TextConverter::new(true, false),
    )
    .with_sections(SectionFilter::with_titles(["Transcriber's notes"]))
    .with_unit(Unit::Section)
    .uncased(true)
    .run()
    .unwrap();
    assert_eq!(total, 2);

    let text = read_gz(&dst.path().join("gutenberg_txt_1.gz"));
    let one = "chapter i\nfirstpage.\n\nchapter ii\nsecond page.\n\n";
    assert_eq!(text, format!("{}{}", one, one));
}

#[test]
fn section_stats() {
    let src = tempfile::tempdir().unwrap();
    write_gz(&src.path().join("a.gz"), &[BOOK]);
    write_gz(&src.path().join("b.gz"), &[BOOK]);

    let stats = StatsPipeline::new(src.path().to_path_buf())
        .with_processes(2)
        .run()
        .unwrap();
    assert_eq!(stats.len(), 3);
    assert_eq!(stats["Chapter I"].count, 2);
    assert_eq!(stats["Chapter I"].position, 4);
    assert_eq!(stats["Transcriber's notes"].empty, 0);
}
