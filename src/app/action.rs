use std::str::FromStr;

use crate::domain::{vacation::UnknownTypeError, VacationType};

/// One user interaction with the form.
///
/// Actions are applied one at a time, in order, by
/// [`App::dispatch`](crate::App::dispatch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Pick an employee in the employee picker.
    SelectEmployee(String),
    /// Pick a vacation type.
    SelectType(VacationType),
    /// Type into the start date input.
    SetStartDate(String),
    /// Type into the end date input.
    SetEndDate(String),
    /// Press the submit button.
    Submit,
    /// Reveal the new-employee input.
    OpenAddEmployee,
    /// Type into the new-employee input.
    SetNewEmployeeName(String),
    /// Confirm the new employee.
    ConfirmAddEmployee,
    /// Hide the new-employee input without adding anyone.
    CancelAddEmployee,
}

/// Why a line could not be read as an [`Action`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseActionError {
    /// The first word is not a known verb.
    #[error("unknown action '{0}'")]
    UnknownVerb(String),

    /// The verb needs an argument.
    #[error("'{0}' needs a value")]
    MissingArgument(&'static str),

    /// The verb takes no argument.
    #[error("'{0}' takes no value")]
    UnexpectedArgument(&'static str),

    /// The vacation type label is not recognised.
    #[error(transparent)]
    UnknownType(#[from] UnknownTypeError),
}

/// A [`ParseActionError`] together with where it happened.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("line {line}: {source}")]
pub struct ScriptError {
    /// The 1-based line number.
    pub line: usize,
    /// What was wrong with the line.
    #[source]
    pub source: ParseActionError,
}

impl FromStr for Action {
    type Err = ParseActionError;

    /// Parses a single `verb [value]` line.
    ///
    /// Values run to the end of the line, so names may contain spaces.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, value) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, value)| (verb, value.trim()));

        let required = |verb: &'static str| {
            if value.is_empty() {
                Err(ParseActionError::MissingArgument(verb))
            } else {
                Ok(value.to_string())
            }
        };
        let bare = |verb: &'static str, action: Self| {
            if value.is_empty() {
                Ok(action)
            } else {
                Err(ParseActionError::UnexpectedArgument(verb))
            }
        };

        match verb {
            "employee" => required("employee").map(Self::SelectEmployee),
            "type" => Ok(Self::SelectType(required("type")?.parse()?)),
            "start" => Ok(Self::SetStartDate(value.to_string())),
            "end" => Ok(Self::SetEndDate(value.to_string())),
            "submit" => bare("submit", Self::Submit),
            "add-employee" => bare("add-employee", Self::OpenAddEmployee),
            "name" => Ok(Self::SetNewEmployeeName(value.to_string())),
            "confirm" => bare("confirm", Self::ConfirmAddEmployee),
            "cancel" => bare("cancel", Self::CancelAddEmployee),
            other => Err(ParseActionError::UnknownVerb(other.to_string())),
        }
    }
}

/// Parses a script of actions, one per line.
///
/// Blank lines and lines starting with `#` are skipped.
///
/// # Errors
///
/// Returns the first line that is not a valid action.
pub fn parse_script(script: &str) -> Result<Vec<Action>, ScriptError> {
    script
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            line.parse().map_err(|source| ScriptError {
                line: index + 1,
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("employee Abd Allah", Action::SelectEmployee("Abd Allah".into()); "name with spaces")]
    #[test_case("type emergency", Action::SelectType(VacationType::Emergency); "type")]
    #[test_case("start 2024-08-01", Action::SetStartDate("2024-08-01".into()); "start")]
    #[test_case("end", Action::SetEndDate(String::new()); "clear end")]
    #[test_case("  submit  ", Action::Submit; "padded submit")]
    #[test_case("add-employee", Action::OpenAddEmployee; "open")]
    #[test_case("name   Hesham", Action::SetNewEmployeeName("Hesham".into()); "name")]
    #[test_case("confirm", Action::ConfirmAddEmployee; "confirm")]
    #[test_case("cancel", Action::CancelAddEmployee; "cancel")]
    fn parses_line(line: &str, expected: Action) {
        assert_eq!(line.parse::<Action>().unwrap(), expected);
    }

    #[test_case("jump", ParseActionError::UnknownVerb("jump".into()); "unknown verb")]
    #[test_case("employee", ParseActionError::MissingArgument("employee"); "employee without name")]
    #[test_case("type", ParseActionError::MissingArgument("type"); "type without label")]
    #[test_case("submit now", ParseActionError::UnexpectedArgument("submit"); "submit with value")]
    fn rejects_line(line: &str, expected: ParseActionError) {
        assert_eq!(line.parse::<Action>().unwrap_err(), expected);
    }

    #[test]
    fn rejects_unknown_type() {
        assert!(matches!(
            "type sick".parse::<Action>(),
            Err(ParseActionError::UnknownType(_))
        ));
    }

    #[test]
    fn script_skips_blanks_and_comments() {
        let script = "# a comment\n\nstart 2024-08-01\n   \nsubmit\n";
        assert_eq!(
            parse_script(script).unwrap(),
            [Action::SetStartDate("2024-08-01".into()), Action::Submit]
        );
    }

    #[test]
    fn script_error_names_line() {
        let error = parse_script("submit\n\nfly away\n").unwrap_err();
        assert_eq!(error.line, 3);
        assert_eq!(error.to_string(), "line 3: unknown action 'fly'");
    }
}
