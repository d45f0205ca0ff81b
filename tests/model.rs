use std::io::Write;

use fuzzy_markup::{
    parse_model, Clause, Connector, Consequent, FuzzySystemParser, ModelError, ParserConfig, Shape, ShapeError,
    ShapeKind, VariableType,
};

const STUDENT_MODEL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<fuzzySystem xmlns="http://www.ieee1855.org" name="student-level" networkAddress="127.0.0.1">
    <knowledgeBase>
        <fuzzyVariable name="KUWA" scale="points" domainleft="0" domainright="100" type="input"
                       accumulation="MAX" defuzzifier="COG" defaultValue="0">
            <fuzzyTerm name="low" complement="false">
                <triangularShape param1="0" param2="25" param3="50"/>
            </fuzzyTerm>
            <fuzzyTerm name="high" complement="true">
                <gaussianShape mean="75" sigma="10.5"/>
            </fuzzyTerm>
        </fuzzyVariable>
    </knowledgeBase>
    <mamdaniRuleBase name="rules" activationMethod="MIN" andMethod="MIN" orMethod="MAX">
        <rule name="r1" connector="and" weight="1.0">
            <antecedent>
                <clause>
                    <variable>KUWA</variable>
                    <term>low</term>
                </clause>
            </antecedent>
            <consequent>
                <then>
                    <clause>
                        <variable>KUWA</variable>
                        <term>high</term>
                    </clause>
                </then>
            </consequent>
        </rule>
    </mamdaniRuleBase>
</fuzzySystem>
"#;

fn document(knowledge_base: &str, rule_base: &str) -> String {
    format!(r#"<fuzzySystem xmlns="http://www.ieee1855.org" name="s">{knowledge_base}{rule_base}</fuzzySystem>"#)
}

fn variable(terms: &str) -> String {
    format!(
        r#"<fuzzyVariable name="v" scale="" domainleft="0" domainright="1" type="output"
            accumulation="MAX" defuzzifier="COG" defaultValue="0.5">{terms}</fuzzyVariable>"#
    )
}

#[test]
fn test_minimal_model() {
    let model = parse_model(STUDENT_MODEL).unwrap();

    assert_eq!(model.name, "student-level");
    assert_eq!(model.network_address, "127.0.0.1");
    assert_eq!(model.fuzzy_variables.len(), 1);

    let kuwa = &model.fuzzy_variables[0];
    assert_eq!(kuwa.name, "KUWA");
    assert_eq!(kuwa.scale, "points");
    assert_eq!(kuwa.domain_left, 0.);
    assert_eq!(kuwa.domain_right, 100.);
    assert_eq!(kuwa.var_type, VariableType::Input);
    assert_eq!(kuwa.accumulation, "MAX");
    assert_eq!(kuwa.defuzzifier, "COG");
    assert_eq!(kuwa.default_value, 0.);

    let terms: Vec<_> = kuwa.terms.iter().map(|t| (t.name.as_str(), t.complement, t.shape)).collect();
    assert_eq!(
        terms,
        [
            ("low", false, Shape::Triangular { a: 0., b: 25., c: 50. }),
            ("high", true, Shape::Gaussian { mean: 75., sigma: 10.5 }),
        ]
    );

    assert_eq!(model.rules.len(), 1);
    let rule = &model.rules[0];
    assert_eq!(rule.name, "r1");
    assert_eq!(rule.connector, Connector::And);
    assert_eq!(rule.weight, 1.);
    assert_eq!(rule.antecedents, vec![Clause::new("KUWA", "low")]);
    assert_eq!(rule.consequent, Consequent::new("KUWA", "high"));
    assert_eq!(rule.to_string(), "if KUWA is low then KUWA is high");

    assert_eq!(model.inputs().count(), 1);
    assert_eq!(model.outputs().count(), 0);
}

#[test]
fn test_parse_is_repeatable() {
    let parser = FuzzySystemParser::from_xml(STUDENT_MODEL).unwrap();

    assert_eq!(parser.parse().unwrap(), parser.parse().unwrap());
    assert_eq!(parse_model(STUDENT_MODEL).unwrap(), parse_model(STUDENT_MODEL).unwrap());
}

#[test]
fn test_missing_containers() {
    let no_kb = document("", "<mamdaniRuleBase/>");
    let no_rb = document("<knowledgeBase/>", "");

    match parse_model(&no_kb) {
        Err(ModelError::Structural { reason, .. }) => assert!(reason.contains("knowledgeBase"), "{reason}"),
        other => panic!("unexpected result: {other:?}"),
    }
    match parse_model(&no_rb) {
        Err(ModelError::Structural { reason, .. }) => assert!(reason.contains("mamdaniRuleBase"), "{reason}"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_empty_rule_base() {
    let xml = document(
        &format!(
            "<knowledgeBase>{}</knowledgeBase>",
            variable(r#"<fuzzyTerm name="t"><leftGaussianShape mean="0" sigma="1"/></fuzzyTerm>"#)
        ),
        "<mamdaniRuleBase></mamdaniRuleBase>",
    );
    let model = parse_model(&xml).unwrap();

    assert!(model.rules.is_empty());
    assert_eq!(model.fuzzy_variables[0].var_type, VariableType::Output);
}

#[test]
fn test_root_attributes_are_optional() {
    let model = parse_model(
        r#"<fuzzySystem xmlns="http://www.ieee1855.org"><knowledgeBase/><mamdaniRuleBase/></fuzzySystem>"#,
    )
    .unwrap();

    assert_eq!(model.name, "");
    assert_eq!(model.network_address, "");
    assert!(model.fuzzy_variables.is_empty());
}

#[test]
fn test_missing_variable_attribute() {
    let xml = document(
        r#"<knowledgeBase><fuzzyVariable name="v" scale="" domainleft="0" domainright="1" type="input"
            accumulation="MAX" defuzzifier="COG"/></knowledgeBase>"#,
        "<mamdaniRuleBase/>",
    );

    match parse_model(&xml) {
        Err(ModelError::MissingAttribute { element, attribute }) => {
            assert_eq!(element, "fuzzyVariable");
            assert_eq!(attribute, "defaultValue");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_unparsable_domain() {
    let xml = document(
        r#"<knowledgeBase><fuzzyVariable name="v" scale="" domainleft="left" domainright="1" type="input"
            accumulation="MAX" defuzzifier="COG" defaultValue="0"/></knowledgeBase>"#,
        "<mamdaniRuleBase/>",
    );

    assert!(matches!(
        parse_model(&xml),
        Err(ModelError::InvalidAttribute { ref attribute, .. }) if attribute == "domainleft"
    ));
}

#[test]
fn test_domain_bounds_are_not_checked() {
    let xml = document(
        r#"<knowledgeBase><fuzzyVariable name="v" scale="" domainleft="10" domainright="-10" type="input"
            accumulation="MAX" defuzzifier="COG" defaultValue="0">
            <fuzzyTerm name="t"><trapezoidShape a="4" b="3" c="2" d="1"/></fuzzyTerm>
            </fuzzyVariable></knowledgeBase>"#,
        "<mamdaniRuleBase/>",
    );
    let model = parse_model(&xml).unwrap();
    let variable = &model.fuzzy_variables[0];

    assert_eq!((variable.domain_left, variable.domain_right), (10., -10.));
    assert_eq!(variable.terms[0].shape.params(), vec![4., 3., 2., 1.]);
}

#[test]
fn test_bad_shape_fails_whole_model() {
    let xml = document(
        &format!(
            "<knowledgeBase>{}</knowledgeBase>",
            variable(
                r#"<fuzzyTerm name="ok"><gaussianShape mean="0" sigma="1"/></fuzzyTerm>
                   <fuzzyTerm name="odd"><sigmoidShape a="1" b="2"/></fuzzyTerm>"#
            )
        ),
        "<mamdaniRuleBase/>",
    );

    match parse_model(&xml) {
        Err(ModelError::Shape { term, source }) => {
            assert_eq!(term, "odd");
            assert_eq!(source, ShapeError::UnknownShape { tag: "sigmoidShape".into() });
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_shape_arity_through_document() {
    let xml = document(
        &format!(
            "<knowledgeBase>{}</knowledgeBase>",
            variable(r#"<fuzzyTerm name="t"><rightGaussianShape mean="0" sigma="1" extra="2"/></fuzzyTerm>"#)
        ),
        "<mamdaniRuleBase/>",
    );

    match parse_model(&xml) {
        Err(ModelError::Shape { source, .. }) => assert_eq!(
            source,
            ShapeError::Arity {
                shape: ShapeKind::RightGaussian,
                expected: 2,
                actual: 3
            }
        ),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_namespace_declaration_on_shape_is_not_a_param() {
    let xml = document(
        &format!(
            "<knowledgeBase>{}</knowledgeBase>",
            variable(
                r#"<fuzzyTerm name="t"><f:triangularShape xmlns:f="http://www.ieee1855.org" a="1" b="2" c="3"/></fuzzyTerm>"#
            )
        ),
        "<mamdaniRuleBase/>",
    );
    let model = parse_model(&xml).unwrap();

    assert_eq!(model.fuzzy_variables[0].terms[0].shape, Shape::Triangular { a: 1., b: 2., c: 3. });
}

#[test]
fn test_rule_structure_errors() {
    let rule = |body: &str| {
        document(
            "<knowledgeBase/>",
            &format!(r#"<mamdaniRuleBase><rule name="r" connector="or" weight="0.5">{body}</rule></mamdaniRuleBase>"#),
        )
    };
    let clause = "<clause><variable>a</variable><term>b</term></clause>";

    let no_antecedent = rule(&format!("<consequent><then>{clause}</then></consequent>"));
    let no_consequent = rule(&format!("<antecedent>{clause}</antecedent>"));
    let no_then = rule(&format!("<antecedent>{clause}</antecedent><consequent>{clause}</consequent>"));
    let no_term = rule(&format!(
        "<antecedent><clause><variable>a</variable></clause></antecedent><consequent><then>{clause}</then></consequent>"
    ));
    let no_variable = rule(&format!(
        "<antecedent><clause><term>b</term></clause></antecedent><consequent><then>{clause}</then></consequent>"
    ));
    let consequent_without_variable = rule(&format!(
        "<antecedent>{clause}</antecedent><consequent><then><clause><term>b</term></clause></then></consequent>"
    ));

    for xml in [no_antecedent, no_consequent, no_then, no_term, no_variable, consequent_without_variable] {
        assert!(matches!(parse_model(&xml), Err(ModelError::Structural { .. })), "{xml}");
    }

    let ok = rule(&format!(
        "<antecedent>{clause}{clause}</antecedent><consequent><then>{clause}</then></consequent>"
    ));
    let model = parse_model(&ok).unwrap();

    assert_eq!(model.rules[0].connector, Connector::Or);
    assert_eq!(model.rules[0].weight, 0.5);
    assert_eq!(model.rules[0].antecedents.len(), 2);
}

#[test]
fn test_missing_rule_name_or_connector() {
    let body = "<antecedent/><consequent><then><clause><variable>a</variable><term>b</term></clause></then></consequent>";

    for (attributes, missing) in [(r#"connector="and" weight="1""#, "name"), (r#"name="r" weight="1""#, "connector")] {
        let xml = document(
            "<knowledgeBase/>",
            &format!("<mamdaniRuleBase><rule {attributes}>{body}</rule></mamdaniRuleBase>"),
        );

        match parse_model(&xml) {
            Err(ModelError::MissingAttribute { element, attribute }) => {
                assert_eq!(element, "rule");
                assert_eq!(attribute, missing);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}

#[test]
fn test_unrecognized_spellings_are_kept() {
    let xml = document(
        r#"<knowledgeBase><fuzzyVariable name="v" scale="" domainleft="0" domainright="1" type="INPUT"
            accumulation="MAX" defuzzifier="COG" defaultValue="0"/></knowledgeBase>"#,
        r#"<mamdaniRuleBase><rule name="r" connector="AND" weight="1"><antecedent/>
            <consequent><then><clause><variable>v</variable><term>t</term></clause></then></consequent>
            </rule></mamdaniRuleBase>"#,
    );
    let model = parse_model(&xml).unwrap();

    assert_eq!(model.fuzzy_variables[0].var_type, VariableType::Other("INPUT".into()));
    assert_eq!(model.fuzzy_variables[0].var_type.to_string(), "INPUT");
    assert_eq!(model.rules[0].connector, Connector::Other("AND".into()));
    assert_eq!(model.rules[0].connector.to_string(), "AND");
    assert!(model.rules[0].antecedents.is_empty());
}

#[test]
fn test_missing_rule_weight() {
    let xml = document(
        "<knowledgeBase/>",
        r#"<mamdaniRuleBase><rule name="r" connector="and"/></mamdaniRuleBase>"#,
    );

    assert!(matches!(
        parse_model(&xml),
        Err(ModelError::MissingAttribute { ref attribute, .. }) if attribute == "weight"
    ));
}

#[test]
fn test_foreign_namespace_is_not_matched() {
    let xml = r#"<fuzzySystem xmlns="urn:other"><knowledgeBase/><mamdaniRuleBase/></fuzzySystem>"#;

    assert!(matches!(parse_model(xml), Err(ModelError::Structural { .. })));

    let parser = FuzzySystemParser::from_xml(xml)
        .unwrap()
        .with_config(ParserConfig::default().with_namespace("urn:other"));

    assert_eq!(parser.config().namespace, "urn:other");
    assert_eq!(parser.root().name, "fuzzySystem");
    assert_eq!(parser.root().namespace.as_deref(), Some("urn:other"));
    assert!(parser.parse().unwrap().rules.is_empty());
}

#[test]
fn test_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(STUDENT_MODEL.as_bytes()).unwrap();

    let model = FuzzySystemParser::from_path(file.path()).unwrap().parse().unwrap();

    assert_eq!(model, parse_model(STUDENT_MODEL).unwrap());
    assert!(matches!(
        FuzzySystemParser::from_path(file.path().with_extension("missing")),
        Err(ModelError::Io(_))
    ));
}

#[test]
fn test_malformed_xml() {
    assert!(matches!(
        parse_model("<fuzzySystem><knowledgeBase></fuzzySystem>"),
        Err(ModelError::Xml(_))
    ));
}
