use std::fmt;

use services::QuizEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    Empty,
    UnknownCommand(String),
    InvalidQuestion(String),
    InvalidOption(String),
    MissingArgument(&'static str),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Empty => write!(f, "empty input"),
            InputError::UnknownCommand(raw) => write!(f, "unknown command: {raw}"),
            InputError::InvalidQuestion(raw) => write!(f, "invalid question number: {raw}"),
            InputError::InvalidOption(raw) => write!(f, "invalid option letter: {raw}"),
            InputError::MissingArgument(what) => write!(f, "missing {what}"),
        }
    }
}

impl std::error::Error for InputError {}

/// Commands accepted while browsing a review bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Group(String),
    Pick { index: usize, option: usize },
    Reveal(usize),
    List,
    Quit,
}

/// `"<n> <letter>"` selects, `"submit"` submits. Question numbers are 1-based.
pub fn parse_quiz_input(line: &str) -> Result<QuizEvent, InputError> {
    let mut parts = line.split_whitespace();
    let first = parts.next().ok_or(InputError::Empty)?;
    if first.eq_ignore_ascii_case("submit") {
        return Ok(QuizEvent::Submit);
    }
    let position = parse_question(first)?;
    let option = parse_option(parts.next().ok_or(InputError::MissingArgument("option letter"))?)?;
    Ok(QuizEvent::Select { position, option })
}

pub fn parse_browse_input(line: &str) -> Result<BrowseCommand, InputError> {
    let mut parts = line.split_whitespace();
    let command = parts.next().ok_or(InputError::Empty)?;
    match command.to_ascii_lowercase().as_str() {
        "group" => parts
            .next()
            .map(|key| BrowseCommand::Group(key.to_owned()))
            .ok_or(InputError::MissingArgument("group key")),
        "pick" => {
            let index = parse_question(parts.next().ok_or(InputError::MissingArgument("question number"))?)?;
            let option = parse_option(parts.next().ok_or(InputError::MissingArgument("option letter"))?)?;
            Ok(BrowseCommand::Pick { index, option })
        }
        "reveal" => {
            let index = parse_question(parts.next().ok_or(InputError::MissingArgument("question number"))?)?;
            Ok(BrowseCommand::Reveal(index))
        }
        "list" => Ok(BrowseCommand::List),
        "quit" | "exit" => Ok(BrowseCommand::Quit),
        _ => Err(InputError::UnknownCommand(command.to_owned())),
    }
}

fn parse_question(raw: &str) -> Result<usize, InputError> {
    raw.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| InputError::InvalidQuestion(raw.to_owned()))
}

fn parse_option(raw: &str) -> Result<usize, InputError> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => {
            Ok(usize::from(c.to_ascii_uppercase() as u8 - b'A'))
        }
        _ => Err(InputError::InvalidOption(raw.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_selection() {
        assert_eq!(
            parse_quiz_input("3 c").unwrap(),
            QuizEvent::Select { position: 2, option: 2 }
        );
        assert_eq!(
            parse_quiz_input("  1   A ").unwrap(),
            QuizEvent::Select { position: 0, option: 0 }
        );
    }

    #[test]
    fn parses_submit() {
        assert_eq!(parse_quiz_input("SUBMIT").unwrap(), QuizEvent::Submit);
    }

    #[test]
    fn rejects_bad_quiz_input() {
        assert_eq!(parse_quiz_input("").unwrap_err(), InputError::Empty);
        assert_eq!(
            parse_quiz_input("0 a").unwrap_err(),
            InputError::InvalidQuestion("0".into())
        );
        assert_eq!(
            parse_quiz_input("2 ab").unwrap_err(),
            InputError::InvalidOption("ab".into())
        );
        assert_eq!(
            parse_quiz_input("2").unwrap_err(),
            InputError::MissingArgument("option letter")
        );
    }

    #[test]
    fn parses_browse_commands() {
        assert_eq!(
            parse_browse_input("group CO2").unwrap(),
            BrowseCommand::Group("CO2".into())
        );
        assert_eq!(
            parse_browse_input("pick 4 d").unwrap(),
            BrowseCommand::Pick { index: 3, option: 3 }
        );
        assert_eq!(parse_browse_input("reveal 1").unwrap(), BrowseCommand::Reveal(0));
        assert_eq!(parse_browse_input("quit").unwrap(), BrowseCommand::Quit);
        assert!(matches!(
            parse_browse_input("jump 3"),
            Err(InputError::UnknownCommand(_))
        ));
    }
}
