use crate::shape::Shape;

/// A linguistic label of a variable, defined by its membership curve.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FuzzyTerm {
    pub name: String,
    pub complement: bool,
    pub shape: Shape,
}

impl FuzzyTerm {
    pub fn new(name: impl Into<String>, complement: bool, shape: Shape) -> Self {
        Self {
            name: name.into(),
            complement,
            shape,
        }
    }
}
