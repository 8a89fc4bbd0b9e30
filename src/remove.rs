// ABOUTME: Removes a single known_hosts line after asking the user to confirm it
// ABOUTME: Takes the backup before handing back new contents, so nothing is written unbacked

use crate::backup::create_backup;
use crate::config::HostsPaths;
use crate::error::{FixError, Result};
use crate::prompt::Prompt;
use crate::ssh::{Line, host_label};
use colored::Colorize;
use tracing::{debug, info};

/// Caller-side range check. The requested line must be strictly less than the
/// line count, so the last line of the file can never be targeted.
pub fn check_line_number(line_number: usize, line_count: usize) -> Result<()> {
    if line_number >= line_count {
        return Err(FixError::NotEnoughLines(line_number));
    }
    Ok(())
}

/// Parse the raw line-number argument into a 1-based line number.
pub fn parse_line_number(raw: Option<&str>) -> Result<usize> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(FixError::BlankLineNumber),
    };

    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(FixError::InvalidLineNumber(raw.to_string())),
    }
}

/// Walk `lines` once and drop the entry at `line_number` (1-based) if the
/// prompt confirms it.
///
/// A confirmed removal backs up the current file before returning. Declining
/// aborts without touching anything on disk.
pub fn remove_line(
    line_number: usize,
    lines: &[Line],
    paths: &HostsPaths,
    prompt: &mut dyn Prompt,
) -> Result<Vec<Line>> {
    let target = line_number.checked_sub(1).ok_or(FixError::LineNotFound)?;
    let mut kept = Vec::with_capacity(lines.len().saturating_sub(1));
    let mut removed = false;

    for (index, line) in lines.iter().enumerate() {
        if index == target {
            // Lossy only for display; the kept lines stay raw bytes
            let text = String::from_utf8_lossy(line);
            let label = host_label(&text);
            debug!("Line {} belongs to {:?}", line_number, label);

            let question = format!("Remove this line? : {label}\n(y/n) ");
            if !prompt.confirm(&question.yellow().to_string())? {
                return Err(FixError::LineNotRemoved);
            }

            create_backup(paths)?;
            removed = true;
            continue;
        }
        kept.push(line.clone());
    }

    if !removed {
        return Err(FixError::LineNotFound);
    }

    info!("Removed line {} from {}", line_number, paths.known_hosts.display());
    Ok(kept)
}
