use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::SystemTime;

use chrono::Local;
use walkdir::WalkDir;

use crate::config::Config;
use crate::domain::{DeletePlan, Entry, EntryKind};
use crate::error::Result;
use crate::process::{self, SearchOutcome};
use crate::vault::Vault;

fn display_rel(path: &Path) -> String {
    if path.as_os_str().is_empty() {
        ".".to_string()
    } else {
        path.display().to_string()
    }
}

fn mtime(entry: &walkdir::DirEntry) -> Option<SystemTime> {
    entry.metadata().ok().and_then(|m| m.modified().ok())
}

/// Create a note under `folder` (intermediate directories included), hand it
/// to the editor, and keep it only if the session wrote something.
pub fn create_note(vault: &Vault, config: &Config, folder: &Path) -> Result<()> {
    let dir = vault.resolve(folder)?;
    fs::create_dir_all(&dir)?;

    let name = format!("note_{}.txt", Local::now().format("%Y%m%d_%H%M%S"));
    let path = dir.join(name);
    process::run_interactive(&config.editor, &path)?;

    if discard_if_empty(&path)? {
        println!("empty note discarded");
    } else {
        println!("saved {}", vault.relativize(&path).display());
    }
    Ok(())
}

/// A zero-byte result (or no file at all, if the editor never saved) is
/// removed; returns whether the note was discarded.
fn discard_if_empty(path: &Path) -> Result<bool> {
    match fs::metadata(path) {
        Ok(meta) if meta.len() == 0 => {
            fs::remove_file(path)?;
            Ok(true)
        }
        Ok(_) => Ok(false),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(true),
        Err(e) => Err(e.into()),
    }
}

/// Walk the tree under `target`, entries at each level ordered by modified
/// time, most recent first.
pub fn collect_entries(vault: &Vault, target: &Path) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    let walker = WalkDir::new(target)
        .min_depth(1)
        .sort_by(|a, b| mtime(b).cmp(&mtime(a)));
    for entry in walker {
        let entry = entry?;
        let kind = if entry.file_type().is_dir() {
            EntryKind::Folder
        } else {
            EntryKind::Note
        };
        entries.push(Entry {
            path: vault.relativize(entry.path()).to_path_buf(),
            kind,
            depth: entry.depth(),
        });
    }
    Ok(entries)
}

pub fn list_notes(vault: &Vault, path: &Path) -> Result<()> {
    let target = vault.resolve(path)?;
    if !target.exists() {
        println!("not found: {}", display_rel(path));
        return Ok(());
    }

    for entry in collect_entries(vault, &target)? {
        let indent = "  ".repeat(entry.depth.saturating_sub(1));
        match entry.kind {
            EntryKind::Folder => println!("{indent}{}/", entry.path.display()),
            EntryKind::Note => println!("{indent}{}", entry.path.display()),
        }
    }
    Ok(())
}

pub fn view_note(vault: &Vault, config: &Config, path: &Path) -> Result<()> {
    let target = vault.resolve(path)?;
    if !target.is_file() {
        println!("not found: {}", display_rel(path));
        return Ok(());
    }
    process::run_interactive(&config.pager, &target)?;
    Ok(())
}

pub fn edit_note(vault: &Vault, config: &Config, path: &Path) -> Result<()> {
    let target = vault.resolve(path)?;
    if !target.is_file() {
        println!("not found: {}", display_rel(path));
        return Ok(());
    }
    process::run_interactive(&config.editor, &target)?;
    Ok(())
}

pub fn search(vault: &Vault, term: &str, path: &Path) -> Result<()> {
    if term.is_empty() {
        println!("search term is empty");
        return Ok(());
    }
    let target = vault.resolve(path)?;
    if !target.exists() {
        println!("not found: {}", display_rel(path));
        return Ok(());
    }

    match process::run_search(term, &target)? {
        SearchOutcome::Matches => {}
        SearchOutcome::NoMatches => println!("no matches"),
    }
    Ok(())
}

pub fn delete_note(vault: &Vault, path: &Path) -> Result<()> {
    let target = vault.resolve(path)?;
    if target.is_dir() {
        println!("{} is a folder, not a note (see rmdir)", display_rel(path));
        return Ok(());
    }
    if !target.is_file() {
        println!("not found: {}", display_rel(path));
        return Ok(());
    }
    fs::remove_file(&target)?;
    println!("deleted {}", display_rel(path));
    Ok(())
}

pub fn create_folder(vault: &Vault, path: &Path) -> Result<()> {
    let target = vault.resolve(path)?;
    if target.exists() {
        println!("already exists: {}", display_rel(path));
        return Ok(());
    }
    fs::create_dir_all(&target)?;
    println!("created {}", display_rel(path));
    Ok(())
}

/// Enumerate everything under `target`, the target folder included, without
/// touching any of it.
pub fn plan_delete(vault: &Vault, target: &Path) -> Result<DeletePlan> {
    let mut plan = DeletePlan::default();
    for entry in WalkDir::new(target) {
        let entry = entry?;
        let rel = vault.relativize(entry.path()).to_path_buf();
        if entry.file_type().is_dir() {
            plan.folders.push(rel);
        } else {
            plan.files.push(rel);
        }
    }
    // Deepest folders first, so each directory is empty by the time it is
    // removed.
    plan.folders
        .sort_by_key(|p| std::cmp::Reverse(p.components().count()));
    Ok(plan)
}

/// Files first, then folders in the plan's deepest-first order.
pub fn apply_delete(vault: &Vault, plan: &DeletePlan) -> Result<()> {
    for file in &plan.files {
        fs::remove_file(vault.resolve(file)?)?;
    }
    for folder in &plan.folders {
        fs::remove_dir(vault.resolve(folder)?)?;
    }
    Ok(())
}

/// Delete a folder and everything in it, after printing what would go and
/// reading a `y` from `input`. Any other answer leaves the tree untouched.
pub fn delete_folder(vault: &Vault, path: &Path, input: &mut dyn BufRead) -> Result<()> {
    let target = vault.resolve(path)?;
    if !target.is_dir() {
        println!("not found: {}", display_rel(path));
        return Ok(());
    }

    let plan = plan_delete(vault, &target)?;
    for file in &plan.files {
        println!("{}", file.display());
    }
    for folder in &plan.folders {
        println!("{}/", folder.display());
    }
    print!("delete {} items? [y/N] ", plan.len());
    io::stdout().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    if answer.trim().eq_ignore_ascii_case("y") {
        apply_delete(vault, &plan)?;
        println!("deleted {}", display_rel(path));
    } else {
        println!("cancelled");
    }
    Ok(())
}

/// Open the persisted configuration file itself in the editor.
pub fn edit_config(config: &Config) -> Result<()> {
    process::run_interactive(&config.editor, &Config::path())?;
    Ok(())
}
