// Line parser for the interactive form session

use jotter_core::Field;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputParseError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("unknown field `{0}` (expected title, content or tag)")]
    UnknownField(String),
}

/// One parsed line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Empty,
    /// Set a field; the rest of the line is the value, verbatim
    Set(Field, String),
    Blur(Field),
    Submit,
    Cancel,
    Show,
    Notes(Option<String>),
    New,
    Help,
    Quit,
}

impl Input {
    pub fn parse(line: &str) -> Result<Self, InputParseError> {
        let line = line.trim_start();
        if line.trim().is_empty() {
            return Ok(Input::Empty);
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest),
            None => (line.trim_end(), ""),
        };

        match command {
            "title" => Ok(Input::Set(Field::Title, rest.to_string())),
            "content" => Ok(Input::Set(Field::Content, rest.to_string())),
            "tag" => Ok(Input::Set(Field::Tag, rest.trim().to_string())),
            "blur" => {
                let name = rest.trim();
                if name.is_empty() {
                    return Err(InputParseError::MissingArgument("blur"));
                }
                name.parse::<Field>()
                    .map(Input::Blur)
                    .map_err(|_| InputParseError::UnknownField(name.to_string()))
            }
            "submit" | "save" => Ok(Input::Submit),
            "cancel" => Ok(Input::Cancel),
            "show" => Ok(Input::Show),
            "notes" => {
                let search = rest.trim();
                Ok(Input::Notes((!search.is_empty()).then(|| search.to_string())))
            }
            "new" => Ok(Input::New),
            "help" | "?" => Ok(Input::Help),
            "quit" | "exit" | "q" => Ok(Input::Quit),
            other => Err(InputParseError::UnknownCommand(other.to_string())),
        }
    }
}

pub const HELP: &str = "\
Commands:
  title <text>      set the title
  content <text>    set the content
  tag <tag>         set the tag (Todo, Work, Personal, Meeting, Shopping)
  blur <field>      leave a field, showing its error
  submit            validate and save
  cancel            close the form without saving
  show              print the form
  notes [search]    list notes through the cache
  new               open a fresh form once this one is closed
  help              this text
  quit              leave";

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("title Buy milk", Input::Set(Field::Title, "Buy milk".into()) ; "title keeps spaces")]
    #[test_case("content  two  spaces", Input::Set(Field::Content, " two  spaces".into()) ; "content is verbatim")]
    #[test_case("title", Input::Set(Field::Title, String::new()) ; "title can be cleared")]
    #[test_case("tag Shopping ", Input::Set(Field::Tag, "Shopping".into()) ; "tag is trimmed")]
    #[test_case("blur content", Input::Blur(Field::Content) ; "blur")]
    #[test_case("notes", Input::Notes(None) ; "notes without search")]
    #[test_case("notes milk", Input::Notes(Some("milk".into())) ; "notes with search")]
    #[test_case("   ", Input::Empty ; "blank line")]
    #[test_case("save", Input::Submit ; "save alias")]
    fn test_parse(line: &str, expected: Input) {
        assert_eq!(Input::parse(line).unwrap(), expected);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Input::parse("frobnicate"),
            Err(InputParseError::UnknownCommand("frobnicate".into()))
        );
        assert_eq!(
            Input::parse("blur"),
            Err(InputParseError::MissingArgument("blur"))
        );
        assert_eq!(
            Input::parse("blur colour"),
            Err(InputParseError::UnknownField("colour".into()))
        );
    }
}
