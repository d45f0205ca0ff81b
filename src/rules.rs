use std::fmt;

/// `variable is term` in a rule premise. Names are not resolved against the
/// knowledge base.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clause {
    pub variable: String,
    pub term: String,
}

/// `variable is term` in a rule conclusion.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Consequent {
    pub variable: String,
    pub term: String,
}

impl Clause {
    pub fn new(variable: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            term: term.into(),
        }
    }
}

impl Consequent {
    pub fn new(variable: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            term: term.into(),
        }
    }
}

/// How the clauses of a rule premise are combined.
///
/// Only the exact connectors `and` and `or` are recognized; any other
/// spelling is kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Connector {
    And,
    Or,
    Other(String),
}

impl From<&str> for Connector {
    fn from(connector: &str) -> Self {
        match connector {
            "and" => Self::And,
            "or" => Self::Or,
            other => Self::Other(other.to_owned()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    pub name: String,
    pub connector: Connector,
    pub weight: f64,
    pub antecedents: Vec<Clause>,
    pub consequent: Consequent,
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is {}", self.variable, self.term)
    }
}

impl fmt::Display for Consequent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is {}", self.variable, self.term)
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => f.write_str("and"),
            Self::Or => f.write_str("or"),
            Self::Other(connector) => f.write_str(connector),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("if ")?;

        for (i, clause) in self.antecedents.iter().enumerate() {
            if i > 0 {
                write!(f, " {} ", self.connector)?;
            }
            write!(f, "{clause}")?;
        }

        write!(f, " then {}", self.consequent)
    }
}

#[test]
fn test_rule_display() {
    let rule = Rule {
        name: "r1".into(),
        connector: Connector::from("and"),
        weight: 1.,
        antecedents: vec![Clause::new("score", "high"), Clause::new("ratio", "good")],
        consequent: Consequent::new("decision", "approve"),
    };

    assert_eq!(rule.connector, Connector::And);
    assert_eq!(
        rule.to_string(),
        "if score is high and ratio is good then decision is approve"
    );
}

#[test]
fn test_unknown_connector_is_kept() {
    assert_eq!(Connector::from("xor"), Connector::Other("xor".into()));
    assert_eq!(Connector::from("or"), Connector::Or);
    assert_eq!(Connector::from("AND"), Connector::Other("AND".into()));
    assert_eq!(Connector::from("AND").to_string(), "AND");
}
