/*!
# IO utilities

Loading and saving of document files, and (de)serialization of simple HTML.
!*/
pub mod reader;
pub mod simple_html;
pub mod writer;

pub use reader::DocReader;
pub use simple_html::{parse, to_html};
pub use writer::DocWriter;
