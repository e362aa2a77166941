//! Error types and run diagnostics.
//!
//! Nothing in the pipeline is fatal to a run. Functions that parse one input
//! return [`Error`]; the pipeline turns each error into a [`Diagnostic`],
//! skips the offending unit or document, and keeps going.
//!
//! # Categories
//!
//! - `SourceParse`: a source file or test body could not be parsed
//! - `ResultParse`: a result document is malformed
//! - `Io`: a file could not be read
//! - `Config`: the configuration file is invalid

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for testdoc operations
#[derive(Debug, Error)]
pub enum Error {
    /// A source file or test body could not be parsed
    #[error("Source parse error in {}: {message}", display_path(path))]
    SourceParse {
        path: Option<PathBuf>,
        message: String,
    },

    /// A result document is malformed
    #[error("Result parse error in {}: {message}", display_path(path))]
    ResultParse {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: Option<quick_xml::Error>,
    },

    /// File system errors with the path that failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<memory>".to_string())
}

impl Error {
    pub fn source_parse(message: impl Into<String>) -> Self {
        Self::SourceParse {
            path: None,
            message: message.into(),
        }
    }

    pub fn result_parse(message: impl Into<String>) -> Self {
        Self::ResultParse {
            path: None,
            message: message.into(),
            source: None,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach a path to parse errors that were raised on in-memory text.
    pub fn with_path(self, path: impl AsRef<Path>) -> Self {
        let path = Some(path.as_ref().to_path_buf());
        match self {
            Self::SourceParse { message, .. } => Self::SourceParse { path, message },
            Self::ResultParse {
                message, source, ..
            } => Self::ResultParse {
                path,
                message,
                source,
            },
            other => other,
        }
    }

    /// Diagnostic category this error is reported under.
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Self::SourceParse { .. } => DiagnosticKind::SourceParse,
            Self::ResultParse { .. } | Self::Json(_) => DiagnosticKind::ResultParse,
            Self::Io { .. } => DiagnosticKind::Io,
            Self::Config(_) => DiagnosticKind::Config,
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(source: quick_xml::Error) -> Self {
        Self::ResultParse {
            path: None,
            message: source.to_string(),
            source: Some(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    SourceParse,
    ResultParse,
    /// A unit without a result entry, or a result entry without a unit.
    CorrelationGap,
    /// A result document whose source file could not be found.
    MissingCounterpart,
    Io,
    Extraction,
    Config,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::SourceParse => "source-parse",
            DiagnosticKind::ResultParse => "result-parse",
            DiagnosticKind::CorrelationGap => "correlation-gap",
            DiagnosticKind::MissingCounterpart => "missing-counterpart",
            DiagnosticKind::Io => "io",
            DiagnosticKind::Extraction => "extraction",
            DiagnosticKind::Config => "config",
        };
        f.write_str(name)
    }
}

/// A recoverable problem recorded for operator review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub path: Option<PathBuf>,
    /// Suite, unit, or document the diagnostic is about.
    pub subject: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: None,
            subject: None,
            message: message.into(),
        }
    }

    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn from_error(error: &Error) -> Self {
        let path = match error {
            Error::SourceParse { path, .. } | Error::ResultParse { path, .. } => path.clone(),
            Error::Io { path, .. } => Some(path.clone()),
            _ => None,
        };
        Self {
            kind: error.kind(),
            path,
            subject: None,
            message: error.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.kind)?;
        if let Some(subject) = &self.subject {
            write!(f, " {subject}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " ({})", path.display())?;
        }
        write!(f, ": {}", self.message)
    }
}
