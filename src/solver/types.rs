use std::error::Error;
use std::fmt;
use std::io;

/// A five-letter word, stored as normalized ASCII lowercase bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Word(pub(crate) [u8; 5]);

impl Word {
    /// Letter indices 0..26 (letter minus 'a'), position by position.
    #[inline]
    pub(crate) fn letters(&self) -> [u8; 5] {
        let mut out = [0u8; 5];
        for (slot, &b) in out.iter_mut().zip(self.0.iter()) {
            *slot = b - b'a';
        }
        out
    }

    /// Per-letter multiplicities, indexed 0..26.
    #[inline]
    pub(crate) fn letter_counts(&self) -> [u8; 26] {
        let mut counts = [0u8; 26];
        for &b in self.0.iter() {
            counts[(b - b'a') as usize] += 1;
        }
        counts
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Safe because words are normalized to ASCII lowercase at parse time.
        let s = std::str::from_utf8(&self.0).unwrap();
        write!(f, "{s}")
    }
}

/// Tile color, with the 2-bit tag used inside a [`FeedbackId`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Grey,
    Yellow,
    Green,
}

impl Color {
    #[inline]
    pub(crate) fn tag(self) -> u64 {
        match self {
            Color::Grey => 0b00,
            Color::Yellow => 0b01,
            Color::Green => 0b10,
        }
    }

    #[inline]
    pub(crate) fn from_tag(tag: u64) -> Color {
        match tag {
            0b01 => Color::Yellow,
            0b10 => Color::Green,
            _ => Color::Grey,
        }
    }
}

/// Canonical 35-bit identifier for a guess and its visible color pattern.
///
/// Each position i occupies seven bits: the guess letter in [7i, 7i+5) and
/// the color tag in [7i+5, 7i+7). Two (guess, solution) pairs share an id
/// exactly when their guess letters and color patterns are identical.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct FeedbackId(pub(crate) u64);

impl FeedbackId {
    /// Assemble an id from a guess and an explicit color pattern, e.g. one
    /// typed in by a user. The pattern is not required to be canonical.
    pub fn from_colors(guess: Word, colors: [Color; 5]) -> FeedbackId {
        let letters = guess.letters();
        let mut id = 0u64;
        for i in 0..5 {
            id |= (letters[i] as u64) << (7 * i);
            id |= colors[i].tag() << (7 * i + 5);
        }
        FeedbackId(id)
    }

    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }

    /// Guess letter index (0..26) at position i.
    #[inline]
    pub fn letter(self, i: usize) -> u8 {
        debug_assert!(i < 5);
        ((self.0 >> (7 * i)) & 0b11111) as u8
    }

    #[inline]
    pub fn color(self, i: usize) -> Color {
        debug_assert!(i < 5);
        Color::from_tag((self.0 >> (7 * i + 5)) & 0b11)
    }

    pub fn colors(self) -> [Color; 5] {
        let mut out = [Color::Grey; 5];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.color(i);
        }
        out
    }

    pub fn is_all_green(self) -> bool {
        (0..5).all(|i| self.color(i) == Color::Green)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GameStatus {
    Won,
    Ongoing,
}

#[derive(Debug)]
pub enum SolverError {
    /// Input is not five ASCII letters, or repeats a letter more often than
    /// the packed count encoding supports.
    InvalidWord(String),
    /// A prune lookup received a feedback id the index has never seen.
    MissingFeedback(FeedbackId),
    /// A serialized prune index does not match the wordlist it was opened
    /// against, or is structurally damaged.
    CorruptIndex(String),
    /// Feedback that no candidate word satisfies; the session state is
    /// left unchanged.
    InconsistentFeedback,
    Io(io::Error),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::InvalidWord(input) => {
                write!(f, "'{input}' is not a valid five-letter word")
            }
            SolverError::MissingFeedback(fid) => {
                write!(f, "no prune entry for feedback id {:#x}", fid.raw())
            }
            SolverError::CorruptIndex(detail) => {
                write!(f, "corrupt prune index: {detail}")
            }
            SolverError::InconsistentFeedback => {
                write!(
                    f,
                    "inconsistent feedback: no candidate matches that guess/pattern pair"
                )
            }
            SolverError::Io(e) => write!(f, "{e}"),
        }
    }
}

impl Error for SolverError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SolverError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SolverError {
    fn from(e: io::Error) -> Self {
        SolverError::Io(e)
    }
}
