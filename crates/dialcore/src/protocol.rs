use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Set(i32),
    Reset,
    Get,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("'{0}' expects a value")]
    MissingArgument(&'static str),
    #[error("Invalid value '{0}'")]
    InvalidValue(String),
    #[error("Unexpected argument '{0}'")]
    TrailingArgument(String),
}

impl FromStr for Command {
    type Err = ProtocolError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(ProtocolError::Empty)?;

        let command = match verb.to_ascii_lowercase().as_str() {
            "set" => {
                let raw = words.next().ok_or(ProtocolError::MissingArgument("set"))?;
                let value = raw
                    .parse()
                    .map_err(|_| ProtocolError::InvalidValue(raw.to_string()))?;
                Command::Set(value)
            }
            "reset" => Command::Reset,
            "get" => Command::Get,
            _ => return Err(ProtocolError::Unknown(verb.to_string())),
        };

        match words.next() {
            Some(extra) => Err(ProtocolError::TrailingArgument(extra.to_string())),
            None => Ok(command),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Set(value) => write!(f, "set {value}"),
            Command::Reset => write!(f, "reset"),
            Command::Get => write!(f, "get"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let cases = vec![
            ("set 25", Command::Set(25)),
            ("  SET   -3 ", Command::Set(-3)),
            ("reset", Command::Reset),
            ("Get\n", Command::Get),
        ];

        for (line, expected) in cases {
            assert_eq!(line.parse::<Command>(), Ok(expected), "{line:?}");
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(ProtocolError::Empty));
        assert_eq!(
            "spin".parse::<Command>(),
            Err(ProtocolError::Unknown("spin".to_string()))
        );
        assert_eq!(
            "set".parse::<Command>(),
            Err(ProtocolError::MissingArgument("set"))
        );
        assert_eq!(
            "set ten".parse::<Command>(),
            Err(ProtocolError::InvalidValue("ten".to_string()))
        );
        assert_eq!(
            "get now".parse::<Command>(),
            Err(ProtocolError::TrailingArgument("now".to_string()))
        );
    }

    #[test]
    fn test_display_parses_back() {
        for command in [Command::Set(12), Command::Reset, Command::Get] {
            assert_eq!(command.to_string().parse::<Command>(), Ok(command));
        }
    }
}
