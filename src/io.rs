pub(crate) mod json;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads the first line of a file without its line terminator.
pub(crate) fn read_first_line(path: &Path) -> std::io::Result<String> {
    let mut line = String::new();
    _ = BufReader::new(File::open(path)?).read_line(&mut line)?;
    let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed_len);
    Ok(line)
}
