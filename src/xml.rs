//! Owned XML element tree.
//!
//! Documents are read once with `quick_xml` into [`Element`]s whose
//! namespaces are resolved and whose attributes keep their declaration
//! order, since shape parameters are positional.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

use crate::error::{ModelError, Result};

/// Deepest element nesting accepted, the same bound libxml2 applies.
pub const MAX_DEPTH: usize = 256;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub namespace: Option<String>,
    /// Local name, prefix stripped.
    pub name: String,
    /// Declaration order, namespace bindings excluded.
    pub attributes: Vec<Attribute>,
    pub children: Vec<Element>,
    pub text: String,
}

impl Element {
    /// Reads a whole document and returns its root element.
    pub fn parse_str(xml: &str) -> Result<Element> {
        let mut reader = NsReader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root = None;

        loop {
            match reader.read_resolved_event()? {
                (ns, Event::Start(e)) => {
                    let element = Element::open(ns, &e)?;

                    if stack.len() >= MAX_DEPTH {
                        return Err(ModelError::structural(element.name, "nesting too deep"));
                    }

                    stack.push(element);
                }
                (ns, Event::Empty(e)) => {
                    let element = Element::open(ns, &e)?;
                    close(&mut stack, &mut root, element)?;
                }
                (_, Event::End(_)) => {
                    // quick_xml checks end names, so the stack can't be empty here
                    if let Some(element) = stack.pop() {
                        close(&mut stack, &mut root, element)?;
                    }
                }
                (_, Event::Text(t)) => {
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&t.unescape()?);
                    }
                }
                (_, Event::CData(c)) => {
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                    }
                }
                (_, Event::Eof) => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(ModelError::structural(&open.name, "element is never closed"));
        }

        root.ok_or_else(|| ModelError::structural("document", "no root element"))
    }

    fn open(ns: ResolveResult<'_>, start: &BytesStart<'_>) -> Result<Element> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let namespace = match ns {
            ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).into_owned()),
            ResolveResult::Unbound => None,
            ResolveResult::Unknown(prefix) => {
                return Err(ModelError::structural(
                    name,
                    format!("undeclared namespace prefix '{}'", String::from_utf8_lossy(&prefix)),
                ))
            }
        };

        let mut attributes = Vec::new();

        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;

            if attr.key.as_namespace_binding().is_some() {
                continue;
            }

            attributes.push(Attribute {
                name: String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                value: attr.unescape_value()?.into_owned(),
            });
        }

        Ok(Element {
            namespace,
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
        })
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    fn is(&self, namespace: &str, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == Some(namespace)
    }

    /// First child with the given namespace and local name.
    pub fn child(&self, namespace: &str, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.is(namespace, name))
    }

    pub fn children<'e>(&'e self, namespace: &'e str, name: &'e str) -> impl Iterator<Item = &'e Element> {
        self.children.iter().filter(move |child| child.is(namespace, name))
    }

    /// Follows a path of child names, taking the first match at each step.
    pub fn find(&self, namespace: &str, path: &[&str]) -> Option<&Element> {
        path.iter()
            .try_fold(self, |element, name| element.child(namespace, name))
    }
}

fn close(stack: &mut Vec<Element>, root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(ModelError::structural(element.name, "second root element")),
    }

    Ok(())
}

#[cfg(test)]
const NS: &str = "http://www.ieee1855.org";

#[test]
fn test_tree_shape() {
    let root = Element::parse_str(
        r#"<?xml version="1.0"?>
        <fuzzySystem xmlns="http://www.ieee1855.org" name="demo">
            <knowledgeBase>
                <fuzzyVariable name="x"/>
                <fuzzyVariable name="y"/>
            </knowledgeBase>
            <other><variable> speed </variable></other>
        </fuzzySystem>"#,
    )
    .unwrap();

    assert_eq!(root.name, "fuzzySystem");
    assert_eq!(root.namespace.as_deref(), Some(NS));
    assert_eq!(root.attribute("name"), Some("demo"));
    assert_eq!(root.attribute("xmlns"), None);

    let kb = root.child(NS, "knowledgeBase").unwrap();
    let names: Vec<_> = kb.children(NS, "fuzzyVariable").filter_map(|v| v.attribute("name")).collect();
    assert_eq!(names, ["x", "y"]);

    assert_eq!(root.find(NS, &["other", "variable"]).map(|e| e.text.as_str()), Some("speed"));
    assert!(root.find(NS, &["other", "term"]).is_none());
}

#[test]
fn test_attribute_order_is_declaration_order() {
    let root = Element::parse_str(r#"<t xmlns:f="urn:x" z="1" a="2" f:m="3"/>"#).unwrap();
    let names: Vec<_> = root.attributes.iter().map(|a| a.name.as_str()).collect();

    assert_eq!(names, ["z", "a", "f:m"]);
}

#[test]
fn test_prefixed_elements_resolve() {
    let root = Element::parse_str(r#"<f:a xmlns:f="http://www.ieee1855.org"><f:b/><b/></f:a>"#).unwrap();

    assert_eq!(root.children(NS, "b").count(), 1);
    assert_eq!(root.children.len(), 2);
}

#[test]
fn test_malformed_documents() {
    assert!(matches!(Element::parse_str("<a><b></a>"), Err(ModelError::Xml(_))));
    assert!(Element::parse_str("<a>").is_err());
    assert!(matches!(Element::parse_str(""), Err(ModelError::Structural { .. })));
}

#[test]
fn test_nesting_depth_is_bounded() {
    let nested = |depth: usize| "<a>".repeat(depth) + &"</a>".repeat(depth);

    assert!(Element::parse_str(&nested(MAX_DEPTH)).is_ok());

    for depth in [MAX_DEPTH + 1, 20_000] {
        match Element::parse_str(&nested(depth)) {
            Err(ModelError::Structural { reason, .. }) => assert_eq!(reason, "nesting too deep"),
            other => panic!("unexpected result at depth {depth}: {other:?}"),
        }
    }
}
