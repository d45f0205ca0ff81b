//! Error types, one per failure domain.

use std::io;

use thiserror::Error;

use crate::shape::ShapeKind;

pub type Result<T, E = ModelError> = std::result::Result<T, E>;

/// Failure to build a [`Shape`](crate::Shape) from a tag and its parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("{shape} requires {expected} parameters, got {actual}")]
    Arity {
        shape: ShapeKind,
        expected: usize,
        actual: usize,
    },
    #[error("unknown shape type '{tag}'")]
    UnknownShape { tag: String },
}

/// Failure while assembling a [`FuzzySystemModel`](crate::FuzzySystemModel).
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("<{element}>: {reason}")]
    Structural { element: String, reason: String },
    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },
    #[error("<{element}> attribute '{attribute}' is not a number: '{value}'")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },
    #[error("fuzzy term '{term}': {source}")]
    Shape {
        term: String,
        #[source]
        source: ShapeError,
    },
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ModelError {
    pub(crate) fn structural(element: impl Into<String>, reason: impl Into<String>) -> Self {
        ModelError::Structural {
            element: element.into(),
            reason: reason.into(),
        }
    }
}

/// Failure while loading [`TrainingSample`](crate::TrainingSample)s.
#[derive(Error, Debug)]
pub enum TrainingDataError {
    #[error("training data must contain the columns {required:?}")]
    Schema { required: Vec<&'static str> },
    #[error("row {row}, column '{column}': cannot read '{value}' as a number")]
    Value {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[test]
fn test_arity_message() {
    let err = ShapeError::Arity {
        shape: ShapeKind::Trapezoid,
        expected: 4,
        actual: 3,
    };

    assert_eq!(err.to_string(), "trapezoidShape requires 4 parameters, got 3");
}
