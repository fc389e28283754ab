use std::{num::ParseIntError, str::FromStr};

use subcontrols_core::{
    Cell, Code, Color, Lever, LeverPosition, LeverPositionError, ParseCellError, ParseCodeError,
    ParseColorError, ParseLeverError,
};
use subcontrols_game::{ParsePuzzleIdError, PuzzleId};

/// One line of console input.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub(crate) enum Command {
    Code(Code),
    Pick(Color),
    Undo,
    Sonar(Cell),
    Lever { lever: Lever, position: LeverPosition },
    Polarity,
    Confirm,
    Spot(String),
    Answer(String),
    Status(Option<PuzzleId>),
    Reveal,
    Reset(Option<PuzzleId>),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub(crate) enum CommandError {
    #[display("unknown command {name:?}; type `help` for a list")]
    #[from(ignore)]
    Unknown {
        #[error(not(source))]
        name: String,
    },
    #[display("usage: {usage}")]
    #[from(ignore)]
    Usage {
        #[error(not(source))]
        usage: &'static str,
    },
    #[display("{_0}")]
    Color(ParseColorError),
    #[display("{_0}")]
    Code(ParseCodeError),
    #[display("{_0}")]
    Cell(ParseCellError),
    #[display("{_0}")]
    Lever(ParseLeverError),
    #[display("{_0}")]
    Position(LeverPositionError),
    #[display("invalid lever position: {_0}")]
    Number(ParseIntError),
    #[display("{_0}")]
    Puzzle(ParsePuzzleIdError),
}

pub(crate) const HELP: &str = "\
Commands:
  code <c1> <c2> <c3> <c4>   submit a full control code (colors: red blue green yellow purple orange)
  pick <color>               add one color to the current row
  undo                       remove the last color of the current row
  sonar <row>-<col>          toggle a sonar contact
  lever <lever> <0-4>        move bow, stern, port or starboard (2 is centre)
  polarity                   switch between flooding and venting
  confirm                    engage the ballast setting
  spot <difference-id>       mark or unmark a porthole difference
  answer <text>              answer the navigation riddle
  status [puzzle]            show progress of every puzzle or one of them
  reveal                     disclose every secret
  reset [puzzle]             reset every puzzle or one of them
  help                       show this list
  quit                       leave the console";

fn required<'a>(arg: &'a str, usage: &'static str) -> Result<&'a str, CommandError> {
    if arg.is_empty() {
        Err(CommandError::Usage { usage })
    } else {
        Ok(arg)
    }
}

fn optional_puzzle(arg: &str) -> Result<Option<PuzzleId>, CommandError> {
    if arg.is_empty() {
        Ok(None)
    } else {
        Ok(Some(arg.parse()?))
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (name, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(name, rest)| (name, rest.trim()));

        let command = match name.to_ascii_lowercase().as_str() {
            "code" => Self::Code(required(rest, "code <c1> <c2> <c3> <c4>")?.parse()?),
            "pick" => Self::Pick(required(rest, "pick <color>")?.parse()?),
            "undo" => Self::Undo,
            "sonar" => Self::Sonar(required(rest, "sonar <row>-<col>")?.parse()?),
            "lever" => {
                const USAGE: &str = "lever <bow|stern|port|starboard> <0-4>";
                let (lever, position) = required(rest, USAGE)?
                    .split_once(char::is_whitespace)
                    .ok_or(CommandError::Usage { usage: USAGE })?;
                let position = position.trim().parse::<u8>()?;
                Self::Lever {
                    lever: lever.parse()?,
                    position: LeverPosition::new(position)?,
                }
            }
            "polarity" => Self::Polarity,
            "confirm" => Self::Confirm,
            "spot" => Self::Spot(required(rest, "spot <difference-id>")?.to_owned()),
            "answer" => Self::Answer(required(rest, "answer <text>")?.to_owned()),
            "status" => Self::Status(optional_puzzle(rest)?),
            "reveal" => Self::Reveal,
            "reset" => Self::Reset(optional_puzzle(rest)?),
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => {
                return Err(CommandError::Unknown {
                    name: name.to_owned(),
                });
            }
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use subcontrols_core::Color::*;

    use super::*;

    #[test]
    fn test_parse_code() {
        assert_eq!(
            "code red blue green yellow".parse(),
            Ok(Command::Code(Code::new([Red, Blue, Green, Yellow])))
        );
        assert_eq!(
            "CODE red, red, orange, purple".parse(),
            Ok(Command::Code(Code::new([Red, Red, Orange, Purple])))
        );
        assert!(matches!(
            "code red blue".parse::<Command>(),
            Err(CommandError::Code(_))
        ));
    }

    #[test]
    fn test_parse_pick_and_undo() {
        assert_eq!(" pick Purple ".parse(), Ok(Command::Pick(Purple)));
        assert!(matches!(
            "pick teal".parse::<Command>(),
            Err(CommandError::Color(_))
        ));
        assert_eq!("undo".parse(), Ok(Command::Undo));
    }

    #[test]
    fn test_parse_sonar() {
        assert_eq!("sonar 2-3".parse(), Ok(Command::Sonar(Cell::new(2, 3))));
        assert!(matches!(
            "sonar 2,3".parse::<Command>(),
            Err(CommandError::Cell(_))
        ));
        assert_eq!(
            "sonar".parse::<Command>(),
            Err(CommandError::Usage {
                usage: "sonar <row>-<col>"
            })
        );
    }

    #[test]
    fn test_parse_lever() {
        assert_eq!(
            "lever starboard 4".parse(),
            Ok(Command::Lever {
                lever: Lever::Starboard,
                position: LeverPosition::MAX
            })
        );
        assert!(matches!(
            "lever bow 5".parse::<Command>(),
            Err(CommandError::Position(_))
        ));
        assert!(matches!(
            "lever bow x".parse::<Command>(),
            Err(CommandError::Number(_))
        ));
        assert!(matches!(
            "lever keel 1".parse::<Command>(),
            Err(CommandError::Lever(_))
        ));
        assert!("lever bow".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_free_text_arguments() {
        assert_eq!(
            "answer  a compass ".parse(),
            Ok(Command::Answer("a compass".to_owned()))
        );
        assert_eq!(
            "spot buoy-flag".parse(),
            Ok(Command::Spot("buoy-flag".to_owned()))
        );
    }

    #[test]
    fn test_parse_optional_puzzle() {
        assert_eq!("status".parse(), Ok(Command::Status(None)));
        assert_eq!(
            "reset ballast".parse(),
            Ok(Command::Reset(Some(PuzzleId::Ballast)))
        );
        assert!(matches!(
            "reset bilge".parse::<Command>(),
            Err(CommandError::Puzzle(_))
        ));
    }

    #[test]
    fn test_unknown_command() {
        let err = "dive".parse::<Command>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown command \"dive\"; type `help` for a list"
        );
        assert!("quit".parse::<Command>().unwrap().is_quit());
    }
}
