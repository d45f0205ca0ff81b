//! Typed models of IEEE 1855 fuzzy systems.
//!
//! A fuzzy markup document is read into a [`FuzzySystemModel`] of
//! variables, terms and Mamdani rules, and a companion table of labeled
//! samples into [`TrainingSample`]s. Nothing here evaluates the system.
//!
//! ```no_run
//! use fuzzy_markup::{load_training_data, FuzzySystemParser};
//!
//! let model = FuzzySystemParser::from_path("data/cimodel.xml")?.parse()?;
//!
//! for rule in &model.rules {
//!     println!("{}: {rule}", rule.name);
//! }
//!
//! // Training data fails independently of the model
//! match load_training_data("data/training_data.csv") {
//!     Ok(samples) => println!("{} samples", samples.len()),
//!     Err(err) => eprintln!("{err}"),
//! }
//! # Ok::<(), fuzzy_markup::ModelError>(())
//! ```

mod config;
mod error;
mod model;
mod parser;
mod rules;
mod shape;
mod terms;
mod training;
mod variable;
pub mod xml;

pub use config::{ParserConfig, TrainingDataConfig, IEEE1855_NAMESPACE};
pub use error::{ModelError, Result, ShapeError, TrainingDataError};
pub use model::FuzzySystemModel;
pub use parser::{parse_model, AttributePolicy, FuzzySystemParser};
pub use rules::{Clause, Connector, Consequent, Rule};
pub use shape::{create_shape, Shape, ShapeKind};
pub use terms::FuzzyTerm;
pub use training::{load_training_data, parse_training_data, Column, Table, TrainingSample, REQUIRED_COLUMNS};
pub use variable::{FuzzyVariable, VariableType};
