use std::io::Write;

use tracing::debug;

use crate::entry::Entry;
use crate::error::Result;

pub mod render;
pub mod xml;

use render::{render_entry, RenderOptions};
use xml::Element;

const XMLNS_XHTML: &str = "http://www.w3.org/1999/xhtml";
const XMLNS_DICTIONARY: &str = "http://www.apple.com/DTDs/DictionaryService-1.0.rng";

pub const FRONT_MATTER_ID: &str = "front_back_matter";
pub const FRONT_MATTER_TITLE: &str = "Front/Back Matter";

/// The complete dictionary document: front matter plus one entry per airport, in order.
#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    options: RenderOptions,
    entries: Vec<Entry>,
}

impl Dictionary {
    pub fn new(options: RenderOptions) -> Self {
        Dictionary {
            options,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn front_matter(&self) -> Element {
        Element::new("d:entry")
            .attr("id", FRONT_MATTER_ID)
            .attr("d:title", FRONT_MATTER_TITLE)
            .child(Element::new("h1").child(Element::with_text("b", self.options.product_name.as_str())))
            .child(Element::with_text("h1", FRONT_MATTER_TITLE))
            .child(Element::with_text(
                "div",
                format!("Airports current as of {}", self.options.as_of),
            ))
    }

    /// Builds the `d:dictionary` root with every entry rendered.
    pub fn to_element(&self) -> Element {
        let mut root = Element::new("d:dictionary")
            .attr("xmlns", XMLNS_XHTML)
            .attr("xmlns:d", XMLNS_DICTIONARY);
        root.push(self.front_matter());
        for entry in &self.entries {
            root.push(render_entry(entry, &self.options));
        }
        root
    }

    pub fn write<W: Write>(&self, out: W) -> Result<()> {
        let root = self.to_element();
        debug!(entries = self.entries.len(), "serializing dictionary");
        xml::write_document(&root, out)
    }
}

impl Extend<Entry> for Dictionary {
    fn extend<T: IntoIterator<Item = Entry>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::render::RenderOptionsBuilder;

    #[test]
    fn front_matter_uses_configured_text() {
        let options = RenderOptionsBuilder::default()
            .product_name("Canadian Aerodromes")
            .as_of("March 2025")
            .build()
            .unwrap();
        let fm = Dictionary::new(options).front_matter();

        assert_eq!(fm.get_attr("id"), Some(FRONT_MATTER_ID));
        assert_eq!(fm.get_attr("d:title"), Some("Front/Back Matter"));
        let headings: Vec<String> = fm.children_named("h1").map(|h| h.text_content()).collect();
        assert_eq!(headings, ["Canadian Aerodromes", "Front/Back Matter"]);
        assert_eq!(
            fm.children_named("div").next().unwrap().text_content(),
            "Airports current as of March 2025"
        );
    }

    #[test]
    fn root_declares_both_namespaces() {
        let root = Dictionary::default().to_element();
        assert_eq!(root.name, "d:dictionary");
        assert_eq!(root.get_attr("xmlns"), Some(XMLNS_XHTML));
        assert_eq!(root.get_attr("xmlns:d"), Some(XMLNS_DICTIONARY));
        assert_eq!(root.elements().count(), 1);
    }

    #[test]
    fn entries_render_in_order() {
        let mut dict = Dictionary::default();
        dict.extend(vec![
            Entry::builder().id("b").build().unwrap(),
            Entry::builder().id("a").build().unwrap(),
        ]);
        dict.push(Entry::builder().id("b").build().unwrap());

        let ids: Vec<_> = dict
            .to_element()
            .children_named("d:entry")
            .map(|e| e.get_attr("id").unwrap_or_default().to_owned())
            .collect();
        assert_eq!(ids, [FRONT_MATTER_ID, "b", "a", "b"]);
    }

    #[test]
    fn writes_a_full_document() {
        let mut dict = Dictionary::default();
        dict.push(Entry::builder().id("x").name("Test Field").build().unwrap());

        let mut buf = Vec::new();
        dict.write(&mut buf).unwrap();
        let xml = String::from_utf8(buf).unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(
            r#"<d:dictionary xmlns="http://www.w3.org/1999/xhtml" xmlns:d="http://www.apple.com/DTDs/DictionaryService-1.0.rng">"#
        ));
        assert!(xml.contains("<b>US Airports</b>"));
        assert!(xml.contains(r#"<d:entry id="x" d:title="Test Field (Airport)">"#));
        assert_eq!(xml.matches("<d:entry ").count(), 2);
    }
}
