//! Command-line steps
//!
//! Each positional argument is one step:
//!
//! - `load` dispatches `RepositoryLoad`
//! - `wait` lets every in-flight fetch settle
//! - `move:<rows>:<dest>` dispatches `RowMove`, e.g. `move:0:3`
//! - `delete:<rows>` dispatches `RowDelete`, e.g. `delete:0,2,4`
//!
//! `<rows>` is a comma-separated list of row indices.

use std::fmt;
use std::str::FromStr;

use libloadlist::{Action, IndexSet, LoadListError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Dispatch(Action),
    Wait,
}

impl FromStr for Step {
    type Err = LoadListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split(':');
        let verb = parts.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = parts.collect();

        let step = match (verb.as_str(), args.as_slice()) {
            ("load", []) => Step::Dispatch(Action::RepositoryLoad),
            ("wait", []) => Step::Wait,
            ("move", [rows, dest]) => Step::Dispatch(Action::RowMove {
                source: parse_rows(rows, s)?,
                destination: parse_index(dest, s)?,
            }),
            ("delete", [rows]) => Step::Dispatch(Action::RowDelete {
                source: parse_rows(rows, s)?,
            }),
            _ => {
                return Err(LoadListError::InvalidInput(format!(
                    "Unknown step '{}'. Expected load, wait, move:<rows>:<dest> or delete:<rows>",
                    s
                )))
            }
        };
        Ok(step)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Wait => write!(f, "wait"),
            Step::Dispatch(Action::RowMove {
                source,
                destination,
            }) => write!(f, "move:{}:{}", join(source), destination),
            Step::Dispatch(Action::RowDelete { source }) => write!(f, "delete:{}", join(source)),
            Step::Dispatch(Action::RepositoryLoad) => write!(f, "load"),
            Step::Dispatch(action) => write!(f, "{}", action.name()),
        }
    }
}

fn parse_rows(raw: &str, step: &str) -> Result<IndexSet, LoadListError> {
    let rows = raw
        .split(',')
        .map(|part| parse_index(part, step))
        .collect::<Result<IndexSet, _>>()?;
    if rows.is_empty() {
        return Err(LoadListError::InvalidInput(format!(
            "Step '{}' names no rows",
            step
        )));
    }
    Ok(rows)
}

fn parse_index(raw: &str, step: &str) -> Result<usize, LoadListError> {
    raw.trim().parse().map_err(|_| {
        LoadListError::InvalidInput(format!("Invalid row index '{}' in step '{}'", raw, step))
    })
}

fn join(rows: &IndexSet) -> String {
    rows.iter()
        .map(|row| row.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
