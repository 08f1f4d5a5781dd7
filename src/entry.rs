use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use derive_builder::Builder;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::feature::{props, RawFeature};
use crate::geo::LatLon;

/// Military code meaning "no military use".
pub const CIVIL: &str = "CIVIL";

/// A normalized airport record, ready to render.
#[derive(Clone, Debug, Default, PartialEq, Builder)]
#[builder(default)]
pub struct Entry {
    #[builder(setter(into))]
    pub id: String,
    #[builder(setter(into, strip_option))]
    pub ident: Option<String>,
    #[builder(setter(into, strip_option))]
    pub icao: Option<String>,
    #[builder(setter(into, strip_option))]
    pub name: Option<String>,
    #[builder(setter(into, strip_option))]
    pub city: Option<String>,
    #[builder(setter(into, strip_option))]
    pub state: Option<String>,
    #[builder(setter(strip_option))]
    pub location: Option<LatLon>,
    #[builder(setter(strip_option))]
    pub elevation: Option<f64>,
    #[builder(setter(into, strip_option))]
    pub military: Option<String>,
    #[builder(setter(into, strip_option))]
    pub status: Option<String>,
    pub private_use: bool,
}

impl Entry {
    pub fn builder() -> EntryBuilder {
        EntryBuilder::default()
    }

    pub fn from_feature(feature: &RawFeature) -> Result<Entry> {
        if !feature.is_feature() {
            return Err(Error::NotAFeature {
                found: feature.type_name(),
            });
        }

        let location = match (feature.text(props::LATITUDE), feature.text(props::LONGITUDE)) {
            (Some(lat), Some(lon)) => {
                let location = LatLon::from_faa(&lat, &lon);
                if location.is_none() {
                    debug!(
                        id = ?feature.text(props::GLOBAL_ID),
                        lat = %lat,
                        lon = %lon,
                        "unparseable coordinates, entry will have no location"
                    );
                }
                location
            }
            _ => None,
        };

        Ok(Entry {
            id: feature.text(props::GLOBAL_ID).unwrap_or_default(),
            ident: feature.text(props::IDENT),
            icao: feature.text(props::ICAO_ID),
            name: feature.text(props::NAME).map(|name| name.trim().to_owned()),
            city: feature
                .text(props::SERVCITY)
                .map(|city| title_case(&city).trim().to_owned()),
            state: feature.text(props::STATE).map(|state| state.trim().to_owned()),
            location,
            elevation: feature.number(props::ELEVATION),
            military: feature.text(props::MIL_CODE),
            status: feature.text(props::OPERSTATUS),
            private_use: feature.flag(props::PRIVATEUSE),
        })
    }

    /// Anything but `CIVIL` gets a Military row, including a missing code.
    pub fn is_military(&self) -> bool {
        self.military.as_deref() != Some(CIVIL)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Title-cases free text: everything is lowercased, underscores and hyphens become spaces and
/// each word's first letter is capitalized. A letter after an apostrophe or parenthesis
/// that follows a word character stays lowercase (`O'FALLON` -> `O'fallon`).
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev: Option<char> = None;
    let mut prev2: Option<char> = None;

    for c in raw.chars() {
        let c = if c == '_' || c == '-' { ' ' } else { c };
        let starts_word = match prev {
            None => true,
            Some(p) if is_word_char(p) => false,
            Some(p) => {
                !(matches!(p, '\'' | '’' | '`' | '(' | ')') && prev2.map_or(false, is_word_char))
            }
        };
        if starts_word {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        prev2 = prev;
        prev = Some(c);
    }
    out
}

/// What to do with entries whose `id` was already seen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep every entry unchanged, even though the dictionary format wants unique ids.
    #[default]
    Keep,
    /// Keep the first entry for each id.
    Skip,
    /// Append `-2`, `-3`, ... to repeated ids.
    Suffix,
}

impl FromStr for DuplicatePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "keep" => Ok(DuplicatePolicy::Keep),
            "skip" => Ok(DuplicatePolicy::Skip),
            "suffix" => Ok(DuplicatePolicy::Suffix),
            _ => Err(Error::UnknownDuplicatePolicy { name: s.to_owned() }),
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            DuplicatePolicy::Keep => "keep",
            DuplicatePolicy::Skip => "skip",
            DuplicatePolicy::Suffix => "suffix",
        })
    }
}

impl DuplicatePolicy {
    /// Applies the policy, preserving source order.
    pub fn apply(self, entries: Vec<Entry>) -> Vec<Entry> {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut duplicates = 0;
        let mut out = Vec::with_capacity(entries.len());

        for mut entry in entries {
            let count = seen.entry(entry.id.clone()).or_insert(0);
            *count += 1;
            if *count == 1 {
                out.push(entry);
                continue;
            }

            duplicates += 1;
            match self {
                DuplicatePolicy::Keep => out.push(entry),
                DuplicatePolicy::Skip => debug!(id = %entry.id, "dropping duplicate entry"),
                DuplicatePolicy::Suffix => {
                    entry.id = format!("{}-{}", entry.id, count);
                    out.push(entry);
                }
            }
        }

        if duplicates > 0 {
            warn!(duplicates, policy = %self, "duplicate entry ids in input");
        }
        out
    }
}
