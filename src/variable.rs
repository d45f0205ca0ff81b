use std::fmt;

use crate::terms::FuzzyTerm;

/// Whether a variable is read by or produced by the system.
///
/// Only the exact tags `input` and `output` are recognized; any other
/// spelling is kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VariableType {
    Input,
    Output,
    Other(String),
}

impl From<&str> for VariableType {
    fn from(tag: &str) -> Self {
        match tag {
            "input" => Self::Input,
            "output" => Self::Output,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => f.write_str("input"),
            Self::Output => f.write_str("output"),
            Self::Other(tag) => f.write_str(tag),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FuzzyVariable {
    pub name: String,
    pub scale: String,
    // Bounds are taken as written; domain_left <= domain_right is not checked.
    pub domain_left: f64,
    pub domain_right: f64,
    pub var_type: VariableType,
    pub accumulation: String,
    pub defuzzifier: String,
    pub default_value: f64,
    pub terms: Vec<FuzzyTerm>,
}

impl FuzzyVariable {
    pub fn is_input(&self) -> bool {
        self.var_type == VariableType::Input
    }

    pub fn is_output(&self) -> bool {
        self.var_type == VariableType::Output
    }
}

#[test]
fn test_variable_type_from_tag() {
    assert_eq!(VariableType::from("input"), VariableType::Input);
    assert_eq!(VariableType::from("output"), VariableType::Output);
    assert_eq!(VariableType::from("latent"), VariableType::Other("latent".into()));
    assert_eq!(VariableType::from("latent").to_string(), "latent");
}

#[test]
fn test_variable_type_keeps_spelling() {
    for tag in ["INPUT", "Output"] {
        let var_type = VariableType::from(tag);

        assert_eq!(var_type, VariableType::Other(tag.into()));
        assert_eq!(var_type.to_string(), tag);
    }
}
