//! In-memory `.classpath` model with change tracking

use eclipath_fs::{NormalizedPath, io};

use super::entry::{ClasspathEntry, ENTRY_ELEMENT};
use super::xml::{self, Element, Node, XmlDocument};
use crate::artifact::VersionPattern;
use crate::{Error, Result};

const ROOT_ELEMENT: &str = "classpath";

/// Stable handle of a tracked entry within one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(usize);

/// A managed entry together with the element it was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedEntry {
    id: EntryId,
    entry: ClasspathEntry,
    element: Element,
}

impl TrackedEntry {
    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn entry(&self) -> &ClasspathEntry {
        &self.entry
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    Entry(TrackedEntry),
    Other(Node),
}

/// The descriptor of one project.
///
/// Managed `lib`/`var` entries are tracked; every other node is kept
/// verbatim and written back in place. The dirty flag is set by every
/// structural mutation and by synthesizing an empty document.
#[derive(Debug, Clone)]
pub struct ClasspathDocument {
    path: NormalizedPath,
    root_attributes: Vec<(String, String)>,
    prolog: Vec<Node>,
    epilog: Vec<Node>,
    items: Vec<Item>,
    dirty: bool,
    next_id: usize,
}

impl ClasspathDocument {
    /// Load the descriptor at `path`, or synthesize an empty one if absent.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path, "No descriptor, starting empty");
            return Ok(Self::empty(path.clone()));
        }
        let text = io::read_text(path)?;
        Self::parse(path.clone(), &text)
    }

    /// Parse descriptor text that belongs to `path`.
    pub fn parse(path: NormalizedPath, text: &str) -> Result<Self> {
        let XmlDocument {
            prolog,
            root,
            epilog,
        } = xml::parse(&path.to_native(), text)?;

        if root.name != ROOT_ELEMENT {
            return Err(Error::InvalidDescriptor {
                path: path.to_native(),
                message: format!("root element is <{}>, expected <{}>", root.name, ROOT_ELEMENT),
            });
        }

        let mut document = Self {
            path,
            root_attributes: root.attributes,
            prolog,
            epilog,
            items: Vec::with_capacity(root.children.len()),
            dirty: false,
            next_id: 0,
        };

        for child in root.children {
            let item = match child {
                Node::Element(element) => match ClasspathEntry::from_element(&element) {
                    Some(entry) => Item::Entry(document.track(entry, element)),
                    None => Item::Other(Node::Element(element)),
                },
                other => Item::Other(other),
            };
            document.items.push(item);
        }

        Ok(document)
    }

    /// A new `<classpath/>` document; it counts as modified.
    pub fn empty(path: NormalizedPath) -> Self {
        Self {
            path,
            root_attributes: Vec::new(),
            prolog: Vec::new(),
            epilog: Vec::new(),
            items: Vec::new(),
            dirty: true,
            next_id: 0,
        }
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Tracked entries in document order
    pub fn entries(&self) -> impl Iterator<Item = &TrackedEntry> {
        self.items.iter().filter_map(|item| match item {
            Item::Entry(tracked) => Some(tracked),
            Item::Other(_) => None,
        })
    }

    /// Tracked entry whose path equals `path` exactly
    pub fn find_by_path(&self, path: &str) -> Option<&TrackedEntry> {
        self.entries().find(|tracked| tracked.entry.path == path)
    }

    /// Tracked entries whose path matches the version-independent pattern
    pub fn find_by_pattern(&self, pattern: &VersionPattern) -> Vec<&TrackedEntry> {
        self.entries()
            .filter(|tracked| pattern.is_match(&tracked.entry.path))
            .collect()
    }

    /// Append a new entry
    pub fn add(&mut self, entry: ClasspathEntry) -> EntryId {
        let element = entry.to_element();
        let tracked = self.track(entry, element);
        let id = tracked.id;
        self.items.push(Item::Entry(tracked));
        self.dirty = true;
        id
    }

    /// Remove a tracked entry, returning it if it was present
    pub fn remove(&mut self, id: EntryId) -> Option<ClasspathEntry> {
        let index = self
            .items
            .iter()
            .position(|item| matches!(item, Item::Entry(tracked) if tracked.id == id))?;
        self.dirty = true;
        match self.items.remove(index) {
            Item::Entry(tracked) => Some(tracked.entry),
            Item::Other(_) => None,
        }
    }

    /// Make sure exactly one `con` entry whose path starts with `prefix`
    /// exists, and that its path is `path`.
    ///
    /// A new container goes after the last `src` entry, or first when there
    /// is none. Returns `true` if the document changed.
    pub fn ensure_container(&mut self, prefix: &str, path: &str) -> bool {
        let positions: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| container_path(item).is_some_and(|p| p.starts_with(prefix)))
            .map(|(index, _)| index)
            .collect();

        let Some((&first, duplicates)) = positions.split_first() else {
            let element = Element::new(ENTRY_ELEMENT)
                .with_attribute("kind", "con")
                .with_attribute("path", path);
            let index = self
                .items
                .iter()
                .rposition(|item| entry_kind(item) == Some("src"))
                .map_or(0, |i| i + 1);
            self.items.insert(index, Item::Other(Node::Element(element)));
            self.dirty = true;
            return true;
        };

        let mut changed = false;
        if let Item::Other(Node::Element(element)) = &mut self.items[first] {
            changed = element.set_attribute("path", path);
        }
        for &index in duplicates.iter().rev() {
            self.items.remove(index);
            changed = true;
        }

        if changed {
            self.dirty = true;
        }
        changed
    }

    /// The full element tree as it would be written
    pub fn to_xml(&self) -> XmlDocument {
        let mut root = Element::new(ROOT_ELEMENT);
        root.attributes = self.root_attributes.clone();
        root.children = self
            .items
            .iter()
            .map(|item| match item {
                Item::Entry(tracked) => Node::Element(tracked.element.clone()),
                Item::Other(node) => node.clone(),
            })
            .collect();

        XmlDocument {
            prolog: self.prolog.clone(),
            root,
            epilog: self.epilog.clone(),
        }
    }

    /// Serialized descriptor text
    pub fn render(&self) -> Result<String> {
        xml::render(&self.to_xml())
    }

    /// Persist the document if it changed. Returns `true` if a write happened.
    pub fn write(&mut self) -> Result<bool> {
        if !self.dirty {
            tracing::debug!(path = %self.path, "Descriptor unchanged, not writing");
            return Ok(false);
        }
        let text = self.render()?;
        io::write_text(&self.path, &text)?;
        self.dirty = false;
        tracing::info!(path = %self.path, "Wrote descriptor");
        Ok(true)
    }

    fn track(&mut self, entry: ClasspathEntry, element: Element) -> TrackedEntry {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        TrackedEntry { id, entry, element }
    }
}

fn entry_kind(item: &Item) -> Option<&str> {
    match item {
        Item::Other(Node::Element(element)) if element.name == ENTRY_ELEMENT => {
            element.attribute("kind")
        }
        _ => None,
    }
}

fn container_path(item: &Item) -> Option<&str> {
    match item {
        Item::Other(Node::Element(element)) if entry_kind(item) == Some("con") => {
            element.attribute("path")
        }
        _ => None,
    }
}
