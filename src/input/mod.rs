//! # Input Module
//!
//! Text command parsing for terminal front ends.

use crate::game::{Coordinate, Direction};
use crate::movement::GeoPoint;
use crate::{GridError, GridResult};

/// Player input that can be processed by a game driver.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerInput {
    /// Activate the cell at a coordinate
    Activate(Coordinate),
    /// Step one cell in a direction
    Step(Direction),
    /// Report a geographic position from the feed
    Position(GeoPoint),
    /// Show the cells around the player
    Look,
    /// Show the carried token
    Inventory,
    /// Show progress statistics
    Statistics,
    /// Start a new game
    Reset,
    /// Show help information
    Help,
    /// Quit the game
    Quit,
}

impl PlayerInput {
    /// Parses one line of input.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridmerge::{Coordinate, Direction, PlayerInput};
    ///
    /// assert_eq!(
    ///     PlayerInput::parse("click 1 -2").unwrap(),
    ///     PlayerInput::Activate(Coordinate::new(1, -2))
    /// );
    /// assert_eq!(PlayerInput::parse("step ne").unwrap(), PlayerInput::Step(Direction::Northeast));
    /// assert!(PlayerInput::parse("dance").is_err());
    /// ```
    pub fn parse(line: &str) -> GridResult<Self> {
        let mut words = line.split_whitespace();
        let command = words
            .next()
            .ok_or_else(|| invalid("empty command"))?
            .to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        let input = match (command.as_str(), args.as_slice()) {
            ("click" | "c", [i, j]) => PlayerInput::Activate(Coordinate::new(
                parse_number(i)?,
                parse_number(j)?,
            )),
            ("step" | "s", [direction]) => PlayerInput::Step(
                Direction::parse(direction)
                    .ok_or_else(|| invalid(format!("unknown direction '{direction}'")))?,
            ),
            ("goto" | "g", [lat, lng]) => {
                PlayerInput::Position(GeoPoint::new(parse_number(lat)?, parse_number(lng)?))
            }
            ("look" | "l", []) => PlayerInput::Look,
            ("inv" | "i", []) => PlayerInput::Inventory,
            ("stats", []) => PlayerInput::Statistics,
            ("reset", []) => PlayerInput::Reset,
            ("help" | "h" | "?", []) => PlayerInput::Help,
            ("quit" | "q" | "exit", []) => PlayerInput::Quit,
            _ => return Err(invalid(format!("unrecognized command '{}'", line.trim()))),
        };
        Ok(input)
    }
}

/// One-line summary of every command.
pub const HELP_TEXT: &str = "Commands: click <i> <j>, step <n|s|e|w|ne|nw|se|sw>, \
goto <lat> <lng>, look, inv, stats, reset, help, quit";

fn parse_number<T: std::str::FromStr>(text: &str) -> GridResult<T> {
    text.parse()
        .map_err(|_| invalid(format!("'{text}' is not a number")))
}

fn invalid(message: impl Into<String>) -> GridError {
    GridError::InvalidInput(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_activation() {
        assert_eq!(
            PlayerInput::parse("  CLICK  -3 4 ").unwrap(),
            PlayerInput::Activate(Coordinate::new(-3, 4))
        );
        assert!(PlayerInput::parse("click 1").is_err());
        assert!(PlayerInput::parse("click a b").is_err());
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(
            PlayerInput::parse("goto 36.9979 -122.057").unwrap(),
            PlayerInput::Position(GeoPoint::new(36.9979, -122.057))
        );
    }

    #[test]
    fn test_parse_step() {
        assert_eq!(
            PlayerInput::parse("step west").unwrap(),
            PlayerInput::Step(Direction::West)
        );
        assert!(PlayerInput::parse("step up").is_err());
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(PlayerInput::parse("look").unwrap(), PlayerInput::Look);
        assert_eq!(PlayerInput::parse("inv").unwrap(), PlayerInput::Inventory);
        assert_eq!(PlayerInput::parse("stats").unwrap(), PlayerInput::Statistics);
        assert_eq!(PlayerInput::parse("reset").unwrap(), PlayerInput::Reset);
        assert_eq!(PlayerInput::parse("?").unwrap(), PlayerInput::Help);
        assert_eq!(PlayerInput::parse("q").unwrap(), PlayerInput::Quit);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(PlayerInput::parse("").is_err());
        assert!(PlayerInput::parse("look around").is_err());
        assert!(PlayerInput::parse("jump").is_err());
    }
}
