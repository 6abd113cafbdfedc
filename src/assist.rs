use std::io;

use crate::session::Session;
use crate::solver::{GameStatus, Objective};
use crate::ui::{parse_feedback, print_first_words, read_line_trimmed, render_board, FeedbackDecision};

const COMMANDS: &[(&str, &str)] = &[
    ("GYBBY", "Apply feedback for the current guess (B or X for grey)"),
    ("USE <word>", "Play a different word this turn"),
    ("CANDS [n]", "Show the first n remaining candidates (default 10)"),
    ("STATUS", "Show turn and candidate status"),
    ("BOARD", "Show guess history"),
    ("UNDO", "Revert the previous accepted turn"),
    ("HELP", "Show this command list"),
    ("EXIT", "Quit"),
];

fn print_commands() {
    println!("Commands:");
    for (name, description) in COMMANDS {
        println!("  {name:<12} {description}");
    }
}

fn cost_summary(objective: Objective, cost: u32) -> String {
    match objective {
        Objective::WorstCase => format!("solves in at most {cost} more guesses"),
        Objective::MeanWeighted => format!("total path weight {cost}"),
    }
}

/// The interactive assist loop: recommend, read feedback, refine, repeat.
pub fn run(mut session: Session) -> io::Result<()> {
    println!("Adversarial Wordle solver. Type HELP for commands.\n");

    'game: loop {
        let Some((suggested, rec)) = session.recommend() else {
            println!("No candidates remain. Check the entered feedback (UNDO to revert).");
            break;
        };

        println!(
            "Turn {} | {} candidates left",
            session.turn_number(),
            session.live_count()
        );
        println!(
            "Suggested guess: {suggested} ({})",
            cost_summary(session.objective(), rec.cost)
        );

        let mut current = suggested;
        loop {
            println!("Enter feedback for '{current}' (G/Y/B), or a command:");
            let Some(input) = read_line_trimmed()? else {
                println!("EOF received. Exiting.");
                break 'game;
            };

            match parse_feedback(&input) {
                FeedbackDecision::Submit(colors) => match session.apply_turn(current, colors) {
                    Ok(GameStatus::Won) => {
                        println!("Solved in {} guesses.", session.turns().len());
                        break 'game;
                    }
                    Ok(GameStatus::Ongoing) => {
                        println!();
                        continue 'game;
                    }
                    Err(e) => {
                        println!("{e}");
                        println!("State unchanged. Re-enter feedback for '{current}'.");
                    }
                },
                FeedbackDecision::Use(word) => {
                    current = word;
                    println!("Playing '{current}' this turn.");
                }
                FeedbackDecision::Help => print_commands(),
                FeedbackDecision::Status => {
                    println!(
                        "Status: turn {} | {} candidates | current guess {current}",
                        session.turn_number(),
                        session.live_count()
                    );
                }
                FeedbackDecision::Cands(n) => {
                    print_first_words(&session.candidates(), n);
                }
                FeedbackDecision::Board => render_board(session.turns()),
                FeedbackDecision::Undo => {
                    if session.undo() {
                        println!("Previous turn undone.\n");
                    } else {
                        println!("Nothing to undo yet.\n");
                    }
                    continue 'game;
                }
                FeedbackDecision::Exit => break 'game,
                FeedbackDecision::Invalid(input) => {
                    println!("Invalid input '{input}'. Enter five of G/Y/B, or HELP.");
                }
            }
        }
    }

    Ok(())
}
