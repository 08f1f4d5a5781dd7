//! `Entry` -> `d:entry` element. Everything here is pure; nothing touches the writer.

use std::borrow::Cow;

use derive_builder::Builder;
use itertools::Itertools;
use url::form_urlencoded;

use super::xml::Element;
use crate::entry::Entry;
use crate::geo::{format_decimal, LatLon};

pub const DEFAULT_PRODUCT_NAME: &str = "US Airports";
pub const DEFAULT_AS_OF: &str = "September 2024";

/// Words of this many characters or fewer are not indexed when filtering is on.
pub const SHORT_WORD_LEN: usize = 3;

const MAP_URL: &str = "http://maps.apple.com/";
const MAP_ZOOM: u32 = 8;

/// Optional `d:priority` per kind of index term. Unset kinds carry no priority.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TermPriorities {
    pub ident: Option<u32>,
    pub icao: Option<u32>,
    pub name: Option<u32>,
    pub word: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Builder)]
#[builder(default)]
pub struct RenderOptions {
    /// Bold product name in the front matter.
    #[builder(setter(into))]
    pub product_name: String,
    /// Data freshness shown in the front matter, e.g. `September 2024`.
    #[builder(setter(into))]
    pub as_of: String,
    pub priorities: TermPriorities,
    /// Skip name words of `SHORT_WORD_LEN` characters or fewer.
    pub filter_short_words: bool,
    /// Form-url-encode the airport name in map links.
    pub escape_map_name: bool,
    /// Add a "Status" row from the operational status.
    pub show_status: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            product_name: DEFAULT_PRODUCT_NAME.to_owned(),
            as_of: DEFAULT_AS_OF.to_owned(),
            priorities: TermPriorities::default(),
            filter_short_words: true,
            escape_map_name: true,
            show_status: false,
        }
    }
}

/// A `d:index` alias.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexTerm {
    pub value: String,
    pub title: Option<String>,
    pub priority: Option<u32>,
}

impl IndexTerm {
    fn new<S: Into<String>>(value: S, priority: Option<u32>) -> Self {
        IndexTerm {
            value: value.into(),
            title: None,
            priority,
        }
    }

    fn titled<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn to_element(&self) -> Element {
        let mut el = Element::new("d:index").attr("d:value", &self.value);
        if let Some(title) = &self.title {
            el = el.attr("d:title", title);
        }
        if let Some(priority) = self.priority {
            el = el.attr("d:priority", priority);
        }
        el
    }
}

fn airport_suffixed(s: &str) -> String {
    format!("{} (Airport)", s)
}

/// The name as shown to users: `Airport` is appended unless the name already mentions it.
pub fn display_name(name: &str) -> Cow<str> {
    if name.to_lowercase().contains("airport") {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("{} Airport", name))
    }
}

/// ident, icao, then the name and its words.
pub fn index_terms(entry: &Entry, options: &RenderOptions) -> Vec<IndexTerm> {
    let priorities = &options.priorities;
    let mut terms = Vec::new();

    for (code, priority) in [
        (&entry.ident, priorities.ident),
        (&entry.icao, priorities.icao),
    ] {
        if let Some(code) = code {
            let title = airport_suffixed(code);
            terms.push(IndexTerm::new(code.as_str(), priority).titled(title.as_str()));
            terms.push(IndexTerm::new(title.as_str(), priority).titled(title.as_str()));
        }
    }

    if let Some(name) = &entry.name {
        terms.push(IndexTerm::new(display_name(name), priorities.name));
        terms.extend(
            name.split_whitespace()
                .filter(|word| !options.filter_short_words || word.chars().count() > SHORT_WORD_LEN)
                .map(|word| IndexTerm::new(word, priorities.word)),
        );
    }

    terms
}

fn map_link(location: LatLon, name: &str, escape: bool) -> String {
    let q: Cow<str> = if escape {
        Cow::Owned(form_urlencoded::byte_serialize(name.as_bytes()).collect())
    } else {
        Cow::Borrowed(name)
    };
    format!("{}?q={}&ll={}&z={}", MAP_URL, q, location.to_ll(), MAP_ZOOM)
}


fn definition(dl: Element, term: &str, value: Element) -> Element {
    dl.child(Element::with_text("dt", term)).child(value)
}

fn details(entry: &Entry, options: &RenderOptions, display: &str) -> Element {
    let mut dl = Element::new("dl");

    let elevation = entry
        .elevation
        .map(format_decimal)
        .unwrap_or_else(|| "(Unknown)".to_owned());
    dl = definition(dl, "Elevation", Element::with_text("dd", elevation));

    let mut location = Element::with_text(
        "dd",
        entry.location.map(|l| l.to_string()).unwrap_or_default(),
    );
    if let Some(ll) = entry.location {
        location = location.child(Element::new("br")).child(
            Element::with_text("a", "Map Link")
                .attr("href", map_link(ll, display, options.escape_map_name))
                .attr("d:priority", 2),
        );
    }
    dl = definition(dl, "Location", location);

    let ownership = if entry.private_use { "Private" } else { "Public" };
    dl = definition(dl, "Ownership", Element::with_text("dd", ownership));

    if entry.is_military() {
        let military = entry.military.as_deref().unwrap_or("");
        dl = definition(dl, "Military", Element::with_text("dd", military));
    }

    if let Some(status) = entry.status.as_deref().filter(|_| options.show_status) {
        dl = definition(dl, "Status", Element::with_text("dd", status));
    }

    Element::new("div").attr("d:priority", 0).child(dl)
}

/// Renders one airport as a `d:entry`.
pub fn render_entry(entry: &Entry, options: &RenderOptions) -> Element {
    let name = entry.name.as_deref().unwrap_or("");
    let display = display_name(name);

    let mut el = Element::new("d:entry")
        .attr("id", &entry.id)
        .attr("d:title", airport_suffixed(name));

    for term in index_terms(entry, options) {
        el.push(term.to_element());
    }

    let heading = format!("{} ({})", name, entry.ident.as_deref().unwrap_or(""));
    let locality = [entry.city.as_deref(), entry.state.as_deref()]
        .iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .join(", ");

    el.child(Element::new("div").child(Element::with_text("h1", heading)))
        .child(Element::with_text("span", locality.trim()).attr("class", "locality"))
        .child(details(entry, options, &display))
}
