// ABOUTME: known_hosts file handling for the line remover
// ABOUTME: Reads and writes the file line by line and labels entries for confirmation prompts

pub mod parser;

pub use parser::{Line, host_label, read_lines, write_lines};
