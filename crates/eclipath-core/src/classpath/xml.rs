//! Generic element tree parsed and serialized with `quick-xml`

use std::path::Path;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::{Error, Result};

/// A node inside an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
}

/// An element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, returning `true` if the element changed
    pub fn set_attribute(&mut self, name: &str, value: &str) -> bool {
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) if existing == value => false,
            Some((_, existing)) => {
                *existing = value.to_string();
                true
            }
            None => {
                self.attributes.push((name.to_string(), value.to_string()));
                true
            }
        }
    }

    /// Child elements, skipping text and comments
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }
}

/// A parsed document: the root element plus top-level comments around it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    pub prolog: Vec<Node>,
    pub root: Element,
    pub epilog: Vec<Node>,
}

/// Parse `text`; `path` is only used for error messages.
pub fn parse(path: &Path, text: &str) -> Result<XmlDocument> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut prolog = Vec::new();
    let mut epilog = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            Error::xml(path, format!("{} at byte {}", e, reader.buffer_position()))
        })?;
        match event {
            Event::Start(start) => stack.push(element_from(path, &start)?),
            Event::Empty(start) => {
                let element = element_from(path, &start)?;
                attach(path, &mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::xml(path, "unexpected closing tag"))?;
                attach(path, &mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let value = text.unescape().map_err(|e| Error::xml(path, e))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Text(value.into_owned())),
                    None => return Err(Error::xml(path, "text outside the root element")),
                }
            }
            Event::CData(data) => {
                let value = String::from_utf8_lossy(&data.into_inner()).into_owned();
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::CData(value)),
                    None => return Err(Error::xml(path, "CDATA outside the root element")),
                }
            }
            Event::Comment(comment) => {
                let node = Node::Comment(String::from_utf8_lossy(&comment).into_owned());
                match (stack.last_mut(), root.is_some()) {
                    (Some(parent), _) => parent.children.push(node),
                    (None, false) => prolog.push(node),
                    (None, true) => epilog.push(node),
                }
            }
            Event::Eof => break,
            // Declaration, doctype and processing instructions are regenerated or dropped
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(Error::xml(path, "unexpected end of document"));
    }
    let root = root.ok_or_else(|| Error::xml(path, "document has no root element"))?;

    Ok(XmlDocument {
        prolog,
        root,
        epilog,
    })
}

fn element_from(path: &Path, start: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::xml(path, e))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(|e| Error::xml(path, e))?;
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

fn attach(
    path: &Path,
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => return Err(Error::xml(path, "more than one root element")),
    }
    Ok(())
}

/// Serialize with an XML declaration, tab indentation and a trailing newline.
pub fn render(document: &XmlDocument) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);
    let map = |e: quick_xml::Error| Error::xml("<memory>", e);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(map)?;
    for node in &document.prolog {
        write_node(&mut writer, node).map_err(map)?;
    }
    write_element(&mut writer, &document.root).map_err(map)?;
    for node in &document.epilog {
        write_node(&mut writer, node).map_err(map)?;
    }

    let mut text = String::from_utf8_lossy(&writer.into_inner()).into_owned();
    text.push('\n');
    Ok(text)
}

fn write_node(
    writer: &mut Writer<Vec<u8>>,
    node: &Node,
) -> std::result::Result<(), quick_xml::Error> {
    match node {
        Node::Element(element) => write_element(writer, element),
        Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text))),
        Node::CData(text) => writer.write_event(Event::CData(BytesCData::new(text.as_str()))),
        Node::Comment(text) => {
            writer.write_event(Event::Comment(BytesText::from_escaped(text.as_str())))
        }
    }
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    element: &Element,
) -> std::result::Result<(), quick_xml::Error> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return writer.write_event(Event::Empty(start));
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))
}
