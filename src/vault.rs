use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// The notes root and the relative-path arithmetic around it.
///
/// Every user-supplied path is interpreted against this one directory; a
/// path that would land outside it is rejected rather than silently escaping.
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
}

impl Vault {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The fixed location under the user's home directory.
    pub fn open_default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(home.join("notebook"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Join a user-supplied relative path onto the root.
    ///
    /// Components are folded lexically: `.` drops, `..` pops. A `..` that
    /// would pop past the root, or an absolute input, is an error.
    pub fn resolve(&self, relative: &Path) -> Result<PathBuf> {
        let mut parts: Vec<&OsStr> = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => parts.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    if parts.pop().is_none() {
                        return Err(Error::PathEscape {
                            path: relative.to_path_buf(),
                        });
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(Error::PathEscape {
                        path: relative.to_path_buf(),
                    });
                }
            }
        }

        let mut resolved = self.root.clone();
        resolved.extend(parts);
        log::debug!("resolved {} -> {}", relative.display(), resolved.display());
        Ok(resolved)
    }

    /// Inverse of `resolve`, used only for display.
    pub fn relativize<'a>(&self, absolute: &'a Path) -> &'a Path {
        absolute.strip_prefix(&self.root).unwrap_or(absolute)
    }
}
