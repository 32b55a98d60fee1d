//! Error enum
use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Serde(serde_json::Error),
    Regex(regex::Error),
    Glob(glob::GlobError),
    GlobPattern(glob::PatternError),
    ThreadPool(rayon::ThreadPoolBuildError),
    Fmt(fmt::Error),

    /// A tag appeared where the document model does not allow it
    /// (e.g. a `p` directly under a `ul`).
    StructuralViolation {
        tag: String,
        context: String,
    },

    /// The tree breaks the document invariants (wrong root, text under `body`...).
    Malformed(String),

    /// Nesting is deeper than the traversal limit.
    TooDeep {
        depth: usize,
    },

    /// Any of the above, tagged with the title of the offending document.
    Document {
        title: String,
        source: Box<Error>,
    },
    Custom(String),
}

impl Error {
    /// Attach the document title (or `untitled`) to an error.
    ///
    /// Errors that already carry a title are returned as is.
    pub fn in_document(self, title: Option<&str>) -> Self {
        match self {
            Error::Document { .. } => self,
            e => Error::Document {
                title: title.unwrap_or("untitled").to_string(),
                source: Box::new(e),
            },
        }
    }

    pub fn structural(tag: impl Into<String>, context: impl Into<String>) -> Self {
        Error::StructuralViolation {
            tag: tag.into(),
            context: context.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Serde(e) => write!(f, "json error: {}", e),
            Error::Regex(e) => write!(f, "regex error: {}", e),
            Error::Glob(e) => write!(f, "glob error: {}", e),
            Error::GlobPattern(e) => write!(f, "glob pattern error: {}", e),
            Error::ThreadPool(e) => write!(f, "thread pool error: {}", e),
            Error::Fmt(e) => write!(f, "formatting error: {}", e),
            Error::StructuralViolation { tag, context } => {
                write!(f, "unexpected tag <{}> in {}", tag, context)
            }
            Error::Malformed(msg) => write!(f, "malformed document: {}", msg),
            Error::TooDeep { depth } => write!(f, "document nested deeper than {}", depth),
            Error::Document { title, source } => write!(f, "in document '{}': {}", title, source),
            Error::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<regex::Error> for Error {
    fn from(e: regex::Error) -> Error {
        Error::Regex(e)
    }
}

impl From<glob::GlobError> for Error {
    fn from(e: glob::GlobError) -> Error {
        Error::Glob(e)
    }
}

impl From<glob::PatternError> for Error {
    fn from(e: glob::PatternError) -> Error {
        Error::GlobPattern(e)
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(e: rayon::ThreadPoolBuildError) -> Error {
        Error::ThreadPool(e)
    }
}

impl From<fmt::Error> for Error {
    fn from(e: fmt::Error) -> Error {
        Error::Fmt(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}
