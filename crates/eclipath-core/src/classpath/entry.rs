//! Typed library and variable entries

use std::fmt;

use serde::Serialize;

use super::xml::{Element, Node};

/// Attribute name Eclipse uses for documentation archives
pub const JAVADOC_LOCATION: &str = "javadoc_location";

pub(crate) const ENTRY_ELEMENT: &str = "classpathentry";

/// Kind of a managed classpath entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClasspathKind {
    /// `kind="lib"`: a project-relative or absolute jar
    Library,
    /// `kind="var"`: a path below a classpath variable
    Variable,
}

impl ClasspathKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Library => "lib",
            Self::Variable => "var",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "lib" => Some(Self::Library),
            "var" => Some(Self::Variable),
            _ => None,
        }
    }
}

impl fmt::Display for ClasspathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One library reference in the descriptor.
///
/// Equality covers all four fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ClasspathEntry {
    pub kind: ClasspathKind,
    pub path: String,
    pub source_path: Option<String>,
    pub javadoc_location: Option<String>,
}

impl ClasspathEntry {
    pub fn new(kind: ClasspathKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            source_path: None,
            javadoc_location: None,
        }
    }

    pub fn with_source_path(mut self, source_path: impl Into<String>) -> Self {
        self.source_path = Some(source_path.into());
        self
    }

    pub fn with_javadoc_location(mut self, location: impl Into<String>) -> Self {
        self.javadoc_location = Some(location.into());
        self
    }

    /// Read a managed entry from a `classpathentry` element.
    ///
    /// Returns `None` for other elements and for kinds other than `lib`/`var`.
    pub fn from_element(element: &Element) -> Option<Self> {
        if element.name != ENTRY_ELEMENT {
            return None;
        }
        let kind = ClasspathKind::parse(element.attribute("kind")?)?;
        let path = element.attribute("path")?.to_string();
        let javadoc_location = element
            .child_elements()
            .filter(|e| e.name == "attributes")
            .flat_map(|attributes| attributes.child_elements())
            .find(|a| a.name == "attribute" && a.attribute("name") == Some(JAVADOC_LOCATION))
            .and_then(|a| a.attribute("value"))
            .map(str::to_string);

        Some(Self {
            kind,
            path,
            source_path: element.attribute("sourcepath").map(str::to_string),
            javadoc_location,
        })
    }

    pub fn to_element(&self) -> Element {
        let mut element = Element::new(ENTRY_ELEMENT)
            .with_attribute("kind", self.kind.as_str())
            .with_attribute("path", self.path.as_str());
        if let Some(source_path) = &self.source_path {
            element = element.with_attribute("sourcepath", source_path.as_str());
        }
        if let Some(location) = &self.javadoc_location {
            let attribute = Element::new("attribute")
                .with_attribute("name", JAVADOC_LOCATION)
                .with_attribute("value", location.as_str());
            element
                .children
                .push(Node::Element(Element::new("attributes").with_child(attribute)));
        }
        element
    }
}

impl fmt::Display for ClasspathEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.path)
    }
}
