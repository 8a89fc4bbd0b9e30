// ABOUTME: Line-level access to the known_hosts file and hostname extraction for prompts
// ABOUTME: Deliberately does not validate key material; only the host token is ever looked at

use crate::error::{FixError, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

const CERT_AUTHORITY_MARKER: &str = "@cert-authority";

/// Returns the host list a known_hosts line certifies.
///
/// Certificate-authority entries start with the marker, so their hosts live in
/// the second field. Malformed lines give back an empty label instead of failing.
pub fn host_label(line: &str) -> &str {
    let mut fields = line.split_whitespace();
    let label = if line.contains(CERT_AUTHORITY_MARKER) {
        fields.nth(1)
    } else {
        fields.next()
    };
    label.unwrap_or("")
}

/// A raw known_hosts line without its `\n`. Bytes are kept as-is so files
/// with non-UTF-8 comments or CRLF endings round-trip untouched.
pub type Line = Vec<u8>;

pub fn read_lines(path: &Path) -> Result<Vec<Line>> {
    let content = fs::read(path).map_err(|source| FixError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(split_lines(&content))
}

fn split_lines(content: &[u8]) -> Vec<Line> {
    if content.is_empty() {
        return Vec::new();
    }
    let content = content.strip_suffix(b"\n").unwrap_or(content);
    content.split(|&b| b == b'\n').map(<[u8]>::to_vec).collect()
}

/// Overwrites `path` with one line per entry, each terminated by `\n`.
/// `mode` only applies when the file has to be created.
pub fn write_lines(path: &Path, lines: &[Line], mode: u32) -> Result<()> {
    let to_write_error = |source| FixError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(mode);
    #[cfg(not(unix))]
    let _ = mode;

    let mut file = options.open(path).map_err(to_write_error)?;
    let mut buffer = Vec::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        buffer.extend_from_slice(line);
        buffer.push(b'\n');
    }
    file.write_all(&buffer).map_err(to_write_error)?;

    Ok(())
}
