use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use super::oracle::parse_word;
use super::types::Word;

/// Read a wordlist: one five-letter word per line, UTF-8.
/// Duplicates are dropped while the first-seen order is preserved.
pub fn load_word_list(path: &Path) -> io::Result<Vec<Word>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut seen = HashSet::new();
    let mut words = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let raw = line?;
        if raw.trim().is_empty() {
            continue;
        }
        let word = parse_word(&raw).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("invalid word at line {}: {e}", idx + 1),
            )
        })?;

        if seen.insert(word) {
            words.push(word);
        }
    }

    if words.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "word list is empty after validation",
        ));
    }

    log::info!("loaded {} words from {}", words.len(), path.display());
    Ok(words)
}
