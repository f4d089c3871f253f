//! Operator input parsing for the console.
//!
//! One command per line on stdin. The vocabulary mirrors the control
//! surface of the scheduler plus console housekeeping.

use podium_core::Command;

/// A parsed line of operator input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// A command for the tick scheduler.
    Timer(Command),
    /// Print the command reference.
    Help,
    /// Shut everything down and exit.
    Quit,
}

/// Parse one line of operator input. Returns `None` for unrecognized
/// input (including empty lines).
pub fn parse(line: &str) -> Option<Input> {
    let mut words = line.split_whitespace();
    let verb = words.next()?;
    match verb.to_lowercase().as_str() {
        "start" | "s" => Some(Input::Timer(Command::Start)),
        "stop" => Some(Input::Timer(Command::Stop)),
        "reset" | "r" => Some(Input::Timer(Command::Reset)),
        "next" | "n" => Some(Input::Timer(Command::NextSpeaker)),
        "load" => {
            // Operators count speakers from 1, the roster from 0.
            let position: usize = words.next()?.parse().ok()?;
            let index = position.checked_sub(1)?;
            Some(Input::Timer(Command::LoadSpeaker(index)))
        }
        "help" | "?" => Some(Input::Help),
        "quit" | "exit" | "q" => Some(Input::Quit),
        _ => None,
    }
}

/// The command reference printed on `help` and on unrecognized input.
pub const HELP_TEXT: &str = "\
commands:
  start          begin the countdown for the active speaker
  stop           halt the countdown (time is kept)
  reset          restore the active speaker's allocation (while stopped)
  next           advance to the next speaker on the roster
  load <n>       load speaker n (1-based roster position)
  help           show this reference
  quit           shut down and exit";
