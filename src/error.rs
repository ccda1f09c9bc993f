use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The persisted configuration exists but cannot be read or decoded.
    /// There is no degraded mode; startup aborts.
    #[error("invalid configuration at {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    /// A user-supplied path would resolve outside the notes root.
    #[error("path escapes the notes root: {path}")]
    PathEscape { path: PathBuf },

    /// An external program could not be started.
    #[error("failed to run `{command}`: {source}")]
    Process {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The search utility exited with a status that is neither success nor
    /// its "no matches" code.
    #[error("search failed with {status}")]
    Search { status: ExitStatus },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        let msg = err.to_string();
        Error::Io(err.into_io_error().unwrap_or_else(|| io::Error::other(msg)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walkdir_errors_surface_as_io() {
        let err = walkdir::WalkDir::new("/definitely/not/a/real/path")
            .into_iter()
            .next()
            .unwrap()
            .unwrap_err();
        assert!(matches!(Error::from(err), Error::Io(_)));
    }
}
