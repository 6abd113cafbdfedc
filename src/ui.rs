use std::io::{self, BufRead};

use crate::session::Turn;
use crate::solver::{parse_word, Color, Word};

pub enum FeedbackDecision {
    Submit([Color; 5]),
    Use(Word),
    Help,
    Status,
    Cands(usize),
    Board,
    Undo,
    Exit,
    Invalid(String),
}

pub fn read_line_trimmed() -> io::Result<Option<String>> {
    let mut s = String::new();
    let n = io::stdin().lock().read_line(&mut s)?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(s.trim().to_string()))
}

/// Parse a five-tile pattern: G green, Y yellow, B or X grey.
pub fn parse_pattern(s: &str) -> Option<[Color; 5]> {
    let bytes = s.as_bytes();
    if bytes.len() != 5 {
        return None;
    }

    let mut colors = [Color::Grey; 5];
    for (slot, &b) in colors.iter_mut().zip(bytes) {
        *slot = match b.to_ascii_uppercase() {
            b'G' => Color::Green,
            b'Y' => Color::Yellow,
            b'B' | b'X' => Color::Grey,
            _ => return None,
        };
    }
    Some(colors)
}

pub fn parse_feedback(raw: &str) -> FeedbackDecision {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return FeedbackDecision::Invalid(trimmed.to_string());
    }

    if let Some(colors) = parse_pattern(trimmed) {
        return FeedbackDecision::Submit(colors);
    }

    let upper = trimmed.to_ascii_uppercase();
    let mut parts = upper.split_whitespace();
    let Some(cmd) = parts.next() else {
        return FeedbackDecision::Invalid(trimmed.to_string());
    };
    let arg = parts.next();

    match cmd {
        "HELP" => FeedbackDecision::Help,
        "STATUS" => FeedbackDecision::Status,
        "CANDS" => {
            let n = arg.and_then(|s| s.parse::<usize>().ok()).unwrap_or(10);
            FeedbackDecision::Cands(n.max(1))
        }
        "BOARD" => FeedbackDecision::Board,
        "USE" => match arg.map(parse_word) {
            Some(Ok(word)) => FeedbackDecision::Use(word),
            _ => FeedbackDecision::Invalid(trimmed.to_string()),
        },
        "UNDO" => FeedbackDecision::Undo,
        "EXIT" | "QUIT" => FeedbackDecision::Exit,
        _ => FeedbackDecision::Invalid(trimmed.to_string()),
    }
}

pub fn render_board(turns: &[Turn]) {
    if turns.is_empty() {
        println!("Board: (empty)");
        return;
    }

    println!("Board:");
    for (i, turn) in turns.iter().enumerate() {
        let tiles: String = turn
            .fid
            .colors()
            .iter()
            .map(|c| match c {
                Color::Green => "\u{1f7e9}",
                Color::Yellow => "\u{1f7e8}",
                Color::Grey => "\u{2b1b}",
            })
            .collect();
        println!("  {:>2}. {}  {}", i + 1, turn.guess, tiles);
    }
}

pub fn print_first_words(words: &[Word], n: usize) {
    let limit = n.min(words.len());
    if limit == 0 {
        println!("No candidates remain.");
        return;
    }
    println!("First {limit} of {} candidates:", words.len());
    for (i, w) in words.iter().take(limit).enumerate() {
        println!("  {:>2}. {}", i + 1, w);
    }
}
