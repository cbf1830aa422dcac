//! Subcommand handlers.
//!
//! Read-only commands (`board`, `agents`, `projects`, `feed`) render a
//! freshly seeded store: state lives in memory only, so every invocation
//! sees the sample dashboard.

pub mod agents;
pub mod board;
pub mod completions;
pub mod feed;
pub mod login;
pub mod projects;
pub mod ui;

use crate::output::{CliError, OutputMode, render_error};
use std::str::FromStr;
use zayan_core::model::ParseEnumError;

/// Parse an optional enum-valued flag. A bad value is rendered as E2004
/// with the accepted values as the suggestion.
pub fn parse_enum_flag<T>(raw: Option<&str>, output: OutputMode) -> anyhow::Result<Option<T>>
where
    T: FromStr<Err = ParseEnumError>,
{
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.parse::<T>() {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            let err = CliError {
                suggestion: Some(format!("Valid values: {}", e.valid)),
                ..CliError::coded(e.code(), e.to_string())
            };
            render_error(output, &err)?;
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zayan_core::model::{Priority, TaskStatus};

    #[test]
    fn absent_flag_is_no_filter() {
        let parsed: Option<TaskStatus> = parse_enum_flag(None, OutputMode::Text).expect("parse");
        assert!(parsed.is_none());
    }

    #[test]
    fn flag_parses_leniently() {
        let parsed: Option<TaskStatus> =
            parse_enum_flag(Some("In-Progress"), OutputMode::Text).expect("parse");
        assert_eq!(parsed, Some(TaskStatus::InProgress));
    }

    #[test]
    fn bad_value_is_an_error() {
        let err = parse_enum_flag::<Priority>(Some("critical"), OutputMode::Text).unwrap_err();
        let parse = err.downcast_ref::<ParseEnumError>().expect("parse error");
        assert_eq!(parse.got, "critical");
        assert_eq!(parse.valid, "low, medium, high, urgent");
    }
}
