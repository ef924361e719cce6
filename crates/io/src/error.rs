use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// A filesystem failure, tagged with the path it happened on.
#[derive(Debug)]
pub struct ExportIoError {
    pub path: PathBuf,
    pub source: io::Error,
}

impl ExportIoError {
    pub fn new(path: &Path, source: io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for ExportIoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.source)
    }
}

impl std::error::Error for ExportIoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[derive(Debug)]
pub enum IniError {
    Io(ExportIoError),
    /// 1-based line number
    Parse { line: usize, message: String },
    MissingSection(String),
}

impl fmt::Display for IniError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IniError::Io(e) => write!(f, "{e}"),
            IniError::Parse { line, message } => write!(f, "line {line}: {message}"),
            IniError::MissingSection(header) => write!(f, "missing section [{header}]"),
        }
    }
}

impl std::error::Error for IniError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IniError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ExportIoError> for IniError {
    fn from(e: ExportIoError) -> Self {
        IniError::Io(e)
    }
}
