// ABOUTME: Runs one khfix invocation: either the removal flow or the undo flow
// ABOUTME: Returns outcomes and errors to main, which alone decides what to print and how to exit

use crate::backup;
use crate::config::HostsPaths;
use crate::error::{FixError, Result};
use crate::prompt::Prompt;
use crate::remove::{check_line_number, parse_line_number, remove_line};
use crate::ssh::{read_lines, write_lines};

pub const RESTORE_QUESTION: &str = "Restore previous known_hosts file from backup? (y/n): ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Remove(Option<String>),
    Undo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Removed { line_number: usize },
    Restored,
    UndoDeclined,
}

pub fn run(action: &Action, paths: &HostsPaths, prompt: &mut dyn Prompt) -> Result<Outcome> {
    if !paths.known_hosts.is_file() {
        return Err(FixError::HostsFileMissing(paths.known_hosts.clone()));
    }

    match action {
        Action::Undo => undo(paths, prompt),
        Action::Remove(raw) => remove(raw.as_deref(), paths, prompt),
    }
}

fn undo(paths: &HostsPaths, prompt: &mut dyn Prompt) -> Result<Outcome> {
    if !prompt.confirm(RESTORE_QUESTION)? {
        return Ok(Outcome::UndoDeclined);
    }
    backup::restore(paths)?;
    Ok(Outcome::Restored)
}

fn remove(raw: Option<&str>, paths: &HostsPaths, prompt: &mut dyn Prompt) -> Result<Outcome> {
    let line_number = parse_line_number(raw)?;
    let lines = read_lines(&paths.known_hosts)?;
    check_line_number(line_number, lines.len())?;

    let kept = remove_line(line_number, &lines, paths, prompt)?;
    write_lines(&paths.known_hosts, &kept, paths.file_mode)?;

    Ok(Outcome::Removed { line_number })
}
