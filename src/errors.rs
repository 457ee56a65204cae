//! Error types with rich diagnostics using miette
//!
//! [`ProfileError`] is the error kind every stage raises. When the failure can be
//! tied to a line of the input file, it is wrapped in [`InputError`], which carries
//! the source text and the span of that line for pretty reporting.

use std::io;
use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<input>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }

    /// Attach a located line to an error kind.
    pub fn locate(&self, span: SourceSpan, kind: ProfileError) -> InputError {
        InputError {
            src: self.named_source(),
            span,
            kind,
        }
    }
}

/// The four error kinds of the pipeline. They are mutually exclusive and all fatal.
#[derive(Error, Diagnostic, Debug)]
pub enum ProfileError {
    #[error("{message}")]
    #[diagnostic(code(rxnprofile::format))]
    Format {
        message: String,
        #[help]
        suggestion: Option<String>,
    },

    #[error("dimensions of `{dim}` not valid")]
    #[diagnostic(
        code(rxnprofile::dimension),
        help("expected `WIDTH, HEIGHT` or `WIDTH, HEIGHT, DPI` as positive integers")
    )]
    Dimension { dim: String },

    #[error("units of `{unit}` not valid")]
    #[diagnostic(
        code(rxnprofile::unit),
        help("allowed units are hartrees, kj/mol, kcal/mol, ev and cm-1")
    )]
    Unit { unit: String },

    #[error("error accessing file {}", path.display())]
    #[diagnostic(code(rxnprofile::file_access))]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ProfileError {
    pub fn format(message: impl Into<String>) -> Self {
        ProfileError::Format {
            message: message.into(),
            suggestion: None,
        }
    }

    /// A format error with a hint on how to fix the input.
    pub fn format_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        ProfileError::Format {
            message: message.into(),
            suggestion: Some(help.into()),
        }
    }

    pub fn dimension(dim: impl Into<String>) -> Self {
        ProfileError::Dimension { dim: dim.into() }
    }

    pub fn unit(unit: impl Into<String>) -> Self {
        ProfileError::Unit { unit: unit.into() }
    }

    pub fn file_access(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ProfileError::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// A missing file, reported as a file access error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::file_access(
            path,
            io::Error::new(io::ErrorKind::NotFound, "file does not exist"),
        )
    }
}

/// A [`ProfileError`] located on a line of the input file
#[derive(Error, Diagnostic, Debug)]
#[error("invalid profile input")]
#[diagnostic(code(rxnprofile::input))]
pub struct InputError {
    #[source_code]
    pub src: NamedSource<String>,
    #[label("in this line")]
    pub span: SourceSpan,
    #[source]
    #[diagnostic_source]
    pub kind: ProfileError,
}
