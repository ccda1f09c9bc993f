use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Folder,
    Note,
}

/// One row of the recursive listing, path relative to the notes root.
#[derive(Debug, Clone)]
pub struct Entry {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub depth: usize,
}

/// Everything a folder deletion would remove, enumerated before anything is
/// touched. Folders are ordered deepest-first so applying the plan never
/// removes a non-empty directory.
#[derive(Debug, Default)]
pub struct DeletePlan {
    pub files: Vec<PathBuf>,
    pub folders: Vec<PathBuf>,
}

impl DeletePlan {
    pub fn len(&self) -> usize {
        self.files.len() + self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.folders.is_empty()
    }
}
