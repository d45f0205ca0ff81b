use crate::rules::Rule;
use crate::variable::FuzzyVariable;

/// Root of a parsed fuzzy system. Owns every variable and rule.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FuzzySystemModel {
    pub name: String,
    pub network_address: String,
    pub fuzzy_variables: Vec<FuzzyVariable>,
    pub rules: Vec<Rule>,
}

impl FuzzySystemModel {
    pub fn inputs(&self) -> impl Iterator<Item = &FuzzyVariable> {
        self.fuzzy_variables.iter().filter(|v| v.is_input())
    }

    pub fn outputs(&self) -> impl Iterator<Item = &FuzzyVariable> {
        self.fuzzy_variables.iter().filter(|v| v.is_output())
    }
}
