use std::fs;
use std::path::Path;

use tracing::{debug, trace};

use crate::config::ParserConfig;
use crate::error::{ModelError, Result};
use crate::model::FuzzySystemModel;
use crate::rules::{Clause, Consequent, Rule};
use crate::shape::create_shape;
use crate::terms::FuzzyTerm;
use crate::variable::{FuzzyVariable, VariableType};
use crate::xml::Element;

/// How a missing attribute is treated.
///
/// Attributes on the document root are optional, everything below it is
/// required.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributePolicy {
    /// Missing attributes read as an empty string.
    OptionalWithDefault,
    /// Missing attributes abort the parse.
    RequiredFailFast,
}

impl AttributePolicy {
    pub fn read(self, element: &Element, attribute: &str) -> Result<String> {
        match (self, element.attribute(attribute)) {
            (_, Some(value)) => Ok(value.to_owned()),
            (Self::OptionalWithDefault, None) => Ok(String::new()),
            (Self::RequiredFailFast, None) => Err(ModelError::MissingAttribute {
                element: element.name.clone(),
                attribute: attribute.to_owned(),
            }),
        }
    }
}

fn required(element: &Element, attribute: &str) -> Result<String> {
    AttributePolicy::RequiredFailFast.read(element, attribute)
}

fn required_f64(element: &Element, attribute: &str) -> Result<f64> {
    let value = required(element, attribute)?;

    parse_f64(element, attribute, &value)
}

fn parse_f64(element: &Element, attribute: &str, value: &str) -> Result<f64> {
    value.trim().parse().map_err(|_| ModelError::InvalidAttribute {
        element: element.name.clone(),
        attribute: attribute.to_owned(),
        value: value.to_owned(),
    })
}

/// Reads a fuzzy markup document into a [`FuzzySystemModel`].
///
/// The document is loaded once at construction; [`parse`](Self::parse) can
/// then be called any number of times and always yields an equal model.
#[derive(Clone, Debug)]
pub struct FuzzySystemParser {
    root: Element,
    config: ParserConfig,
}

impl FuzzySystemParser {
    pub fn from_xml(xml: &str) -> Result<Self> {
        let root = Element::parse_str(xml)?;

        debug!(root = %root.name, "loaded fuzzy system document");

        Ok(Self {
            root,
            config: ParserConfig::default(),
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let xml = fs::read_to_string(path)?;

        debug!(path = %path.display(), "reading fuzzy system document");

        Self::from_xml(&xml)
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    fn ns(&self) -> &str {
        &self.config.namespace
    }

    pub fn parse(&self) -> Result<FuzzySystemModel> {
        let root = &self.root;
        let ns = self.ns();

        let name = AttributePolicy::OptionalWithDefault.read(root, "name")?;
        let network_address = AttributePolicy::OptionalWithDefault.read(root, "networkAddress")?;

        let knowledge_base = root
            .child(ns, "knowledgeBase")
            .ok_or_else(|| ModelError::structural(&root.name, "missing <knowledgeBase>"))?;
        let fuzzy_variables = knowledge_base
            .children(ns, "fuzzyVariable")
            .map(|element| self.parse_fuzzy_variable(element))
            .collect::<Result<Vec<_>>>()?;

        let rule_base = root
            .child(ns, "mamdaniRuleBase")
            .ok_or_else(|| ModelError::structural(&root.name, "missing <mamdaniRuleBase>"))?;
        let rules = rule_base
            .children(ns, "rule")
            .map(|element| self.parse_rule(element))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            system = %name,
            variables = fuzzy_variables.len(),
            rules = rules.len(),
            "assembled fuzzy system model"
        );

        Ok(FuzzySystemModel {
            name,
            network_address,
            fuzzy_variables,
            rules,
        })
    }

    pub fn parse_fuzzy_variable(&self, element: &Element) -> Result<FuzzyVariable> {
        let variable = FuzzyVariable {
            name: required(element, "name")?,
            scale: required(element, "scale")?,
            domain_left: required_f64(element, "domainleft")?,
            domain_right: required_f64(element, "domainright")?,
            var_type: VariableType::from(required(element, "type")?.as_str()),
            accumulation: required(element, "accumulation")?,
            defuzzifier: required(element, "defuzzifier")?,
            default_value: required_f64(element, "defaultValue")?,
            terms: element
                .children(self.ns(), "fuzzyTerm")
                .map(|term| self.parse_fuzzy_term(term))
                .collect::<Result<Vec<_>>>()?,
        };

        trace!(variable = %variable.name, terms = variable.terms.len(), "parsed fuzzy variable");

        Ok(variable)
    }

    pub fn parse_fuzzy_term(&self, element: &Element) -> Result<FuzzyTerm> {
        let name = required(element, "name")?;
        // Only the exact string "true" sets the flag
        let complement = element.attribute("complement") == Some("true");

        let (shape_element, ignored) = match element.children.split_first() {
            Some(split) => split,
            None => {
                return Err(ModelError::structural(
                    &element.name,
                    format!("fuzzy term '{name}' has no shape element"),
                ))
            }
        };

        if !ignored.is_empty() {
            debug!(term = %name, ignored = ignored.len(), "using first shape element of fuzzy term");
        }

        let params = shape_element
            .attributes
            .iter()
            .map(|attr| parse_f64(shape_element, &attr.name, &attr.value))
            .collect::<Result<Vec<_>>>()?;

        let shape = create_shape(&shape_element.name, &params)
            .map_err(|source| ModelError::Shape {
                term: name.clone(),
                source,
            })?;

        trace!(term = %name, %shape, complement, "parsed fuzzy term");

        Ok(FuzzyTerm::new(name, complement, shape))
    }

    pub fn parse_rule(&self, element: &Element) -> Result<Rule> {
        let ns = self.ns();
        let name = required(element, "name")?;
        let connector = required(element, "connector")?;
        let weight = required_f64(element, "weight")?;

        let antecedent = element.child(ns, "antecedent").ok_or_else(|| {
            ModelError::structural(&element.name, format!("rule '{name}' has no <antecedent>"))
        })?;
        let antecedents = antecedent
            .children(ns, "clause")
            .map(|clause| {
                self.parse_clause(&name, clause)
                    .map(|(variable, term)| Clause { variable, term })
            })
            .collect::<Result<Vec<_>>>()?;

        let consequent = element
            .find(ns, &["consequent", "then", "clause"])
            .ok_or_else(|| {
                ModelError::structural(
                    &element.name,
                    format!("rule '{name}' has no <consequent><then><clause>"),
                )
            })?;
        let (variable, term) = self.parse_clause(&name, consequent)?;

        let rule = Rule {
            name,
            connector: connector.as_str().into(),
            weight,
            antecedents,
            consequent: Consequent { variable, term },
        };

        trace!(rule = %rule.name, "parsed rule: {rule}");

        Ok(rule)
    }

    fn parse_clause(&self, rule: &str, clause: &Element) -> Result<(String, String)> {
        let text = |child: &str| {
            clause
                .child(self.ns(), child)
                .map(|element| element.text.trim().to_owned())
                .ok_or_else(|| {
                    ModelError::structural(
                        &clause.name,
                        format!("clause of rule '{rule}' has no <{child}>"),
                    )
                })
        };

        Ok((text("variable")?, text("term")?))
    }
}

/// Reads and assembles a model from a document held in memory.
pub fn parse_model(xml: &str) -> Result<FuzzySystemModel> {
    FuzzySystemParser::from_xml(xml)?.parse()
}

#[cfg(test)]
fn element_from(xml: &str) -> Element {
    Element::parse_str(xml).unwrap()
}

#[cfg(test)]
fn parser() -> FuzzySystemParser {
    FuzzySystemParser::from_xml(r#"<fuzzySystem xmlns="http://www.ieee1855.org"/>"#).unwrap()
}

#[test]
fn test_complement_flag() {
    let parser = parser();
    let term = |complement: &str| {
        let xml = format!(
            r#"<fuzzyTerm xmlns="http://www.ieee1855.org" name="low" {complement}><gaussianShape mean="1" sigma="2"/></fuzzyTerm>"#
        );
        parser.parse_fuzzy_term(&element_from(&xml)).unwrap().complement
    };

    assert!(term(r#"complement="true""#));
    assert!(!term(r#"complement="false""#));
    assert!(!term(r#"complement="TRUE""#));
    assert!(!term(""));
}

#[test]
fn test_term_without_shape_is_rejected() {
    let err = parser()
        .parse_fuzzy_term(&element_from(r#"<fuzzyTerm xmlns="http://www.ieee1855.org" name="low"/>"#))
        .unwrap_err();

    assert!(matches!(err, ModelError::Structural { .. }), "{err}");
}

#[test]
fn test_only_first_shape_is_used() {
    let term = parser()
        .parse_fuzzy_term(&element_from(
            r#"<fuzzyTerm xmlns="http://www.ieee1855.org" name="mid">
                <triangularShape param1="1" param2="2" param3="3"/>
                <gaussianShape mean="1" sigma="2"/>
            </fuzzyTerm>"#,
        ))
        .unwrap();

    assert_eq!(term.shape, crate::Shape::Triangular { a: 1., b: 2., c: 3. });
}

#[test]
fn test_shape_params_follow_attribute_order() {
    let term = parser()
        .parse_fuzzy_term(&element_from(
            r#"<fuzzyTerm xmlns="http://www.ieee1855.org" name="t">
                <trapezoidShape z="4" y="3" b="2" a="1"/>
            </fuzzyTerm>"#,
        ))
        .unwrap();

    assert_eq!(term.shape.params(), vec![4., 3., 2., 1.]);
}

#[test]
fn test_shape_errors_name_the_term() {
    let err = parser()
        .parse_fuzzy_term(&element_from(
            r#"<fuzzyTerm xmlns="http://www.ieee1855.org" name="wide"><trapezoidShape a="1" b="2"/></fuzzyTerm>"#,
        ))
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "fuzzy term 'wide': trapezoidShape requires 4 parameters, got 2"
    );
}

#[test]
fn test_non_numeric_shape_param() {
    let err = parser()
        .parse_fuzzy_term(&element_from(
            r#"<fuzzyTerm xmlns="http://www.ieee1855.org" name="t"><gaussianShape mean="x" sigma="1"/></fuzzyTerm>"#,
        ))
        .unwrap_err();

    match err {
        ModelError::InvalidAttribute { element, attribute, value } => {
            assert_eq!(element, "gaussianShape");
            assert_eq!(attribute, "mean");
            assert_eq!(value, "x");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_attribute_policies() {
    let element = element_from(r#"<a present="yes"/>"#);

    assert_eq!(AttributePolicy::OptionalWithDefault.read(&element, "present").unwrap(), "yes");
    assert_eq!(AttributePolicy::OptionalWithDefault.read(&element, "absent").unwrap(), "");
    assert!(matches!(
        AttributePolicy::RequiredFailFast.read(&element, "absent"),
        Err(ModelError::MissingAttribute { .. })
    ));
}
