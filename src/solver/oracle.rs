use super::types::{Color, FeedbackId, SolverError, Word};

/// Parse a trimmed line into a [`Word`].
/// Accepts ASCII letters only, lowercases A-Z, rejects anything else.
/// Also rejects words repeating a letter more than three times: letter
/// multiplicities are packed into 2-bit lanes by the dictionary, and no
/// playable five-letter word exceeds three of a kind.
pub fn parse_word(line: &str) -> Result<Word, SolverError> {
    let s = line.trim().as_bytes();
    if s.len() != 5 {
        return Err(SolverError::InvalidWord(line.trim().to_string()));
    }

    let mut w = [0u8; 5];
    for i in 0..5 {
        let lower = match s[i] {
            b @ b'a'..=b'z' => b,
            b @ b'A'..=b'Z' => b + 32,
            _ => return Err(SolverError::InvalidWord(line.trim().to_string())),
        };
        w[i] = lower;
    }

    let word = Word(w);
    if word.letter_counts().iter().any(|&c| c > 3) {
        return Err(SolverError::InvalidWord(line.trim().to_string()));
    }
    Ok(word)
}

/// Compute the canonical feedback id for an ordered (guess, solution) pair.
///
/// Greens are placed first; yellows are then assigned left to right, each
/// consuming one remaining solution copy of its letter. A guess letter with
/// no unconsumed copies left goes grey. This ordering is what makes the id
/// canonical when guess and solution hold differing non-zero multiplicities
/// of the same letter.
pub fn feedback_id(guess: &Word, solution: &Word) -> FeedbackId {
    let g = guess.letters();
    let s = solution.letters();
    let s_counts = solution.letter_counts();

    // The count of each letter already consumed by a placed tile.
    let mut placed = [0u8; 26];
    let mut greens = [false; 5];
    let mut id = 0u64;

    // Pass 1: greens.
    for i in 0..5 {
        id |= (g[i] as u64) << (7 * i);
        if g[i] == s[i] {
            greens[i] = true;
            placed[g[i] as usize] += 1;
            id |= Color::Green.tag() << (7 * i + 5);
        }
    }

    // Pass 2: yellows, capped by the remaining solution multiplicity.
    for i in 0..5 {
        if greens[i] {
            continue;
        }
        let c = g[i] as usize;
        if placed[c] < s_counts[c] {
            placed[c] += 1;
            id |= Color::Yellow.tag() << (7 * i + 5);
        }
    }

    FeedbackId(id)
}

/// The pruning inputs derived from one feedback.
#[derive(Clone, Debug, Default)]
pub struct Constraints {
    /// Green tiles: the candidate must carry this letter at this position.
    pub correct: Vec<(u8, u8)>,
    /// Yellow and grey tiles: the candidate must not carry this letter at
    /// this position.
    pub wrong: Vec<(u8, u8)>,
    /// Lower bound on each letter's multiplicity (greens + yellows).
    pub min_counts: [u8; 26],
    /// Exact upper bound, present only for letters with at least one grey
    /// tile; it then equals that letter's greens + yellows.
    pub max_counts: [Option<u8>; 26],
}

impl Constraints {
    pub fn from_feedback(fid: FeedbackId) -> Constraints {
        let mut out = Constraints::default();
        let mut grey_seen = [false; 26];

        for i in 0..5 {
            let letter = fid.letter(i);
            match fid.color(i) {
                Color::Green => {
                    out.correct.push((i as u8, letter));
                    out.min_counts[letter as usize] += 1;
                }
                Color::Yellow => {
                    out.wrong.push((i as u8, letter));
                    out.min_counts[letter as usize] += 1;
                }
                Color::Grey => {
                    out.wrong.push((i as u8, letter));
                    grey_seen[letter as usize] = true;
                }
            }
        }

        // A grey tells us the solution holds exactly as many copies as were
        // colored green or yellow.
        for c in 0..26 {
            if grey_seen[c] {
                out.max_counts[c] = Some(out.min_counts[c]);
            }
        }

        out
    }
}
