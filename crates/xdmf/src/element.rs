//! Minimal XML element tree over the quick-xml event API
//!
//! XDMF descriptors are small, so the whole document is read into a tree of
//! [Element]s rather than handled as a stream of events.

// crate modules
use crate::error::{Error, Result};

// hmf modules
use hmf_utils::f;

// standard library
use std::io::Write;

// external crates
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

/// An XML element with its attributes, text and children
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Tag name
    pub name: String,
    /// Attributes in document order
    pub attributes: Vec<(String, String)>,
    /// Concatenated text and CDATA content
    pub text: String,
    /// Write the text as a CDATA section
    pub cdata: bool,
    /// Child elements in document order
    pub children: Vec<Element>,
}

impl Element {
    /// New element with no attributes or content
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Add an attribute
    pub fn attr(mut self, key: &str, value: impl ToString) -> Self {
        self.attributes.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a child element
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Set the text content
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the text content, to be written as CDATA
    pub fn cdata(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self.cdata = true;
        self
    }

    /// Value of an attribute, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value of a required attribute
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| Error::MissingAttribute {
            element: self.name.clone(),
            attribute: key.to_string(),
        })
    }

    /// All children with the given tag name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// The only child with the given tag name
    pub fn single_child(&self, name: &str) -> Result<&Element> {
        let mut matches = self.children_named(name);
        match (matches.next(), matches.next()) {
            (Some(child), None) => Ok(child),
            (None, _) => Err(Error::MissingElement(name.to_string())),
            (Some(_), Some(_)) => Err(Error::UnsupportedLayout(f!(
                "more than one <{name}> in <{}>",
                self.name
            ))),
        }
    }

    /// Parse a document and return its root element
    pub fn parse(xml: &str) -> Result<Element> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => stack.push(Self::from_start(&e)?),
                Event::Empty(e) => {
                    let element = Self::from_start(&e)?;
                    Self::close(element, &mut stack, &mut root);
                }
                Event::End(_) => {
                    if let Some(element) = stack.pop() {
                        Self::close(element, &mut stack, &mut root);
                    }
                }
                Event::Text(e) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&e.unescape()?);
                    }
                }
                Event::CData(e) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                        current.cdata = true;
                    }
                }
                Event::Eof => break,
                _ => (),
            }
        }

        root.ok_or_else(|| Error::MissingElement("root".to_string()))
    }

    /// Write the element as a complete document with an XML declaration
    pub fn write_document<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = Writer::new_with_indent(writer, b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;
        self.write_to(&mut writer)?;
        Ok(())
    }

    /// Write the element alone, without a declaration or indentation
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        self.write_to(&mut writer)?;
        Ok(String::from_utf8_lossy(&writer.into_inner()).to_string())
    }

    /// Serialise the element and its children
    fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.text.is_empty() && self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        if !self.text.is_empty() {
            match self.cdata {
                true => writer.write_event(Event::CData(BytesCData::new(self.text.as_str())))?,
                false => writer.write_event(Event::Text(BytesText::new(&self.text)))?,
            }
        }
        for child in &self.children {
            child.write_to(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }

    fn from_start(start: &BytesStart) -> Result<Element> {
        let mut element = Element::new(&String::from_utf8_lossy(start.name().as_ref()));
        for attribute in start.attributes() {
            let attribute = attribute?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).to_string();
            let value = attribute.unescape_value()?.to_string();
            element.attributes.push((key, value));
        }
        Ok(element)
    }

    /// Attach a finished element to its parent, or make it the root
    fn close(element: Element, stack: &mut [Element], root: &mut Option<Element>) {
        match stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None => *root = Some(element),
        }
    }
}
