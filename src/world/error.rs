use super::*;
use std::fmt;
use thiserror::Error;

/// What a validation failure is about, rendered as the leading part of the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Subject {
    Transform {
        index: usize,
        field: Option<&'static str>,
    },
    IdList,
    IdItem {
        index: usize,
    },
    Template {
        id: String,
    },
}

impl Subject {
    pub fn transform(index: usize) -> Self {
        Subject::Transform { index, field: None }
    }

    pub fn transform_field(index: usize, field: &'static str) -> Self {
        Subject::Transform {
            index,
            field: Some(field),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Transform { index, field: None } => write!(f, "Transform #{index}"),
            Subject::Transform {
                index,
                field: Some(field),
            } => write!(f, "Transform #{index} field \"{field}\""),
            Subject::IdList => write!(f, "IDs file"),
            Subject::IdItem { index } => write!(f, "IDs file item #{index}"),
            Subject::Template { id } => write!(f, "Template entity {id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{subject} {problem}")]
pub(crate) struct ValidationError {
    pub subject: Subject,
    pub problem: String,
}

impl ValidationError {
    pub fn new(subject: Subject, problem: impl Into<String>) -> Self {
        Self {
            subject,
            problem: problem.into(),
        }
    }

    pub fn transform_index(&self) -> Option<usize> {
        match self.subject {
            Subject::Transform { index, .. } => Some(index),
            _ => None,
        }
    }

    pub fn field(&self) -> Option<&'static str> {
        match self.subject {
            Subject::Transform { field, .. } => field,
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum WorldError {
    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {label} {}: {source}", path.display())]
    Parse {
        label: &'static str,
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{label} {} {problem}", path.display())]
    Schema {
        label: &'static str,
        path: PathBuf,
        problem: &'static str,
    },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("{0}")]
    Conflict(String),
    #[error("{0} Pass --yes to acknowledge and continue.")]
    NoOp(&'static str),
    #[error("Confirmation required in non-interactive mode. Re-run with --yes.")]
    ConfirmationRequired,
    #[error("Failed to read confirmation: {0}")]
    Prompt(#[source] std::io::Error),
    #[error("{0}")]
    Usage(String),
    #[error("Could not generate a unique entity id after {attempts} attempts")]
    IdSpaceExhausted { attempts: u32 },
    #[error("Failed to encode world document: {0}")]
    Encode(#[source] serde_json::Error),
}
