// ABOUTME: Error type shared by the removal, backup and undo engines
// ABOUTME: Splits failures into user-correctable conditions and fatal environment errors

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixError {
    #[error("Can't detect home directory")]
    NoHomeDir,

    #[error("Could not locate hosts file: {}", .0.display())]
    HostsFileMissing(PathBuf),

    #[error("Line needing fixed cannot be blank")]
    BlankLineNumber,

    #[error("Can't convert {0} to a line number")]
    InvalidLineNumber(String),

    #[error("There aren't {0} lines in the file, try again")]
    NotEnoughLines(usize),

    #[error("line not removed")]
    LineNotRemoved,

    #[error("line not found in file")]
    LineNotFound,

    #[error("Could not read current file: {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not create new file: {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not create backup of current file")]
    Backup(#[source] io::Error),

    #[error("could not create pre-undo file, exiting")]
    PreUndo(#[source] io::Error),

    #[error("could not restore file, exiting")]
    Restore(#[source] io::Error),

    #[error("Failed to read answer from terminal")]
    Prompt(#[source] io::Error),
}

impl FixError {
    /// Fatal errors mean the run may have left things half done; everything
    /// else is a "nothing happened, try again" condition.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            FixError::Read { .. }
                | FixError::Backup(_)
                | FixError::PreUndo(_)
                | FixError::Restore(_)
                | FixError::Prompt(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, FixError>;
