//! Tab-separated text pair files.
//!
//! One record per line: `id_left, id_right, text_left, text_right[, label]`.
//! Train files carry the label column, test files do not. Blank lines and
//! lines starting with `#` are skipped.

use crate::datapack::{Stage, TextPair};
use crate::error::Result;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parses text pairs from a reader.
///
/// Malformed lines fail with their 0-based line number.
pub fn parse_pairs<R: BufRead>(reader: R, stage: Stage) -> Result<Vec<TextPair>> {
    let mut pairs = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.trim().is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split('\t').collect();
        pairs.push(TextPair::from_fields(line_no, &fields, stage)?);
    }

    Ok(pairs)
}

/// Reads text pairs from a file.
pub fn read_pairs<P: AsRef<Path>>(path: P, stage: Stage) -> Result<Vec<TextPair>> {
    let file = File::open(path)?;
    parse_pairs(BufReader::new(file), stage)
}
