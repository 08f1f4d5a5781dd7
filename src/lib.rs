#![forbid(unsafe_code)]

//! Turns FAA airport GeoJSON into an Apple Dictionary Services XML source.

pub mod dictionary;
pub mod entry;
pub mod error;
pub mod feature;
pub mod geo;

use tracing::{info, warn};

pub use dictionary::render::{RenderOptions, RenderOptionsBuilder, TermPriorities};
pub use dictionary::Dictionary;
pub use entry::{DuplicatePolicy, Entry};
pub use error::{Error, Result};
pub use feature::{FeatureCollection, RawFeature};
pub use geo::LatLon;

/// Normalizes every feature of `collection` into a dictionary. Fails only when the input
/// is not a FeatureCollection; bad records and fields degrade to missing data.
pub fn build_dictionary(
    collection: FeatureCollection,
    options: RenderOptions,
    duplicates: DuplicatePolicy,
) -> Result<Dictionary> {
    collection.ensure_collection()?;
    info!(features = collection.len(), "Processing airport features...");

    let mut entries = Vec::with_capacity(collection.len());
    for feature in collection.into_features() {
        match Entry::from_feature(&feature) {
            Ok(entry) => entries.push(entry),
            Err(e @ Error::NotAFeature { .. }) => warn!("{}, ignoring", e),
            Err(e) => return Err(e),
        }
    }

    let located = entries.iter().filter(|e| e.location.is_some()).count();
    if located < entries.len() {
        warn!(
            missing = entries.len() - located,
            "some airports have no usable coordinates and will have no map link"
        );
    }

    let mut dictionary = Dictionary::new(options);
    dictionary.extend(duplicates.apply(entries));
    info!(entries = dictionary.len(), "Built dictionary entries");
    Ok(dictionary)
}
