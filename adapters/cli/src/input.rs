//! Parsing of player input lines.

use grid_rescue_core::Direction;
use thiserror::Error;

/// Action requested by a single line of player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    Step(Direction),
    Start,
    Stop,
    Reset,
    Resize { columns: u32, rows: u32 },
    Obstacles(u32),
    Help,
    Quit,
    Idle,
}

/// Reasons an input line could not be understood.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum InputError {
    #[error("unknown command `{0}`; type `help` for a list")]
    Unknown(String),
    #[error("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("`{value}` is not a whole number")]
    NotANumber { value: String },
}

/// Parses one line of input. Blank lines only advance the clock.
pub(crate) fn parse(line: &str) -> Result<Input, InputError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Input::Idle);
    };

    let input = match head.to_ascii_lowercase().as_str() {
        "w" | "up" | "north" => Input::Step(Direction::North),
        "d" | "right" | "east" => Input::Step(Direction::East),
        "s" | "down" | "south" => Input::Step(Direction::South),
        "a" | "left" | "west" => Input::Step(Direction::West),
        "\u{1b}[a" => Input::Step(Direction::North),
        "\u{1b}[c" => Input::Step(Direction::East),
        "\u{1b}[b" => Input::Step(Direction::South),
        "\u{1b}[d" => Input::Step(Direction::West),
        "start" | "go" => Input::Start,
        "stop" | "pause" => Input::Stop,
        "reset" | "new" => Input::Reset,
        "size" => {
            let columns = number(words.next(), "size", "one or two dimensions")?;
            let rows = match words.next() {
                Some(value) => number(Some(value), "size", "one or two dimensions")?,
                None => columns,
            };
            Input::Resize { columns, rows }
        }
        "obstacles" => Input::Obstacles(number(words.next(), "obstacles", "a count")?),
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        other => return Err(InputError::Unknown(other.to_owned())),
    };

    Ok(input)
}

fn number(
    word: Option<&str>,
    command: &'static str,
    expected: &'static str,
) -> Result<u32, InputError> {
    let value = word.ok_or(InputError::MissingArgument { command, expected })?;
    value.parse().map_err(|_| InputError::NotANumber {
        value: value.to_owned(),
    })
}

/// Usage text printed by `help`.
pub(crate) const HELP: &str = "\
commands:
  w a s d        step north, west, south, or east (arrow keys work too)
  start | stop   begin or pause play
  reset          generate a fresh layout
  size N [M]     resize the grid (3 to 10 per side)
  obstacles N    request N obstacles (capped at half the grid)
  help           show this text
  quit           leave the game
  <enter>        refresh the board";
