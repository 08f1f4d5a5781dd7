//! GeoJSON input: the top-level collection and the loosely typed feature records.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::{Error, Result};

pub const FEATURE_COLLECTION: &str = "FeatureCollection";
pub const FEATURE: &str = "Feature";

/// Property keys used by the FAA airport dataset.
pub mod props {
    pub const GLOBAL_ID: &str = "GLOBAL_ID";
    pub const IDENT: &str = "IDENT";
    pub const ICAO_ID: &str = "ICAO_ID";
    pub const NAME: &str = "NAME";
    pub const SERVCITY: &str = "SERVCITY";
    pub const STATE: &str = "STATE";
    pub const ELEVATION: &str = "ELEVATION";
    pub const MIL_CODE: &str = "MIL_CODE";
    pub const OPERSTATUS: &str = "OPERSTATUS";
    pub const PRIVATEUSE: &str = "PRIVATEUSE";
    pub const LATITUDE: &str = "LATITUDE";
    pub const LONGITUDE: &str = "LONGITUDE";
}

#[derive(Debug, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default)]
    ty: Value,
    #[serde(default)]
    features: Vec<Value>,
}

impl FeatureCollection {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<FeatureCollection> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<FeatureCollection> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json(json: &str) -> Result<FeatureCollection> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks the top-level `type` marker.
    pub fn ensure_collection(&self) -> Result<()> {
        match &self.ty {
            Value::String(ty) if ty == FEATURE_COLLECTION => Ok(()),
            Value::String(ty) => Err(Error::NotFeatureCollection { found: ty.clone() }),
            Value::Null => Err(Error::NotFeatureCollection {
                found: "no type".to_owned(),
            }),
            other => Err(Error::NotFeatureCollection {
                found: other.to_string(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Features in source order. Records that are not JSON objects are dropped with a warning.
    pub fn into_features(self) -> impl Iterator<Item = RawFeature> {
        self.features
            .into_iter()
            .enumerate()
            .filter_map(|(i, value)| match serde_json::from_value(value) {
                Ok(feature) => Some(feature),
                Err(e) => {
                    warn!(index = i, error = %e, "ignoring unreadable feature record");
                    None
                }
            })
    }
}

/// One `features[]` member. Only the type marker and the properties are read; `geometry` is ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawFeature {
    #[serde(rename = "type", default)]
    pub ty: Option<Value>,
    #[serde(default)]
    pub properties: Option<Value>,
}

impl RawFeature {
    pub fn is_feature(&self) -> bool {
        matches!(&self.ty, Some(Value::String(ty)) if ty == FEATURE)
    }

    pub fn type_name(&self) -> String {
        match &self.ty {
            Some(Value::String(ty)) => ty.clone(),
            Some(other) => other.to_string(),
            None => "(none)".to_owned(),
        }
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.properties.as_ref()?.as_object()?.get(key)
    }

    /// A string property. Numbers are stringified, anything else is absent.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// A numeric property, accepting numeric strings.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// True only for a JSON number equal to 1.
    pub fn flag(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::Number(n)) => n.as_f64() == Some(1.0),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(props: Value) -> RawFeature {
        serde_json::from_value(json!({ "type": "Feature", "properties": props })).unwrap()
    }

    #[test]
    fn accepts_feature_collection() {
        let fc = FeatureCollection::from_json(
            r#"{"type": "FeatureCollection", "features": [{"type": "Feature", "properties": {}}]}"#,
        )
        .unwrap();
        assert!(fc.ensure_collection().is_ok());
        assert_eq!(fc.len(), 1);
        assert!(fc.into_features().all(|f| f.is_feature()));
    }

    #[test]
    fn rejects_other_top_level_types() {
        let fc = FeatureCollection::from_json(r#"{"type": "Feature"}"#).unwrap();
        match fc.ensure_collection() {
            Err(Error::NotFeatureCollection { found }) => assert_eq!(found, "Feature"),
            other => panic!("unexpected {:?}", other),
        }

        let fc = FeatureCollection::from_json(r#"{"features": []}"#).unwrap();
        assert!(fc.ensure_collection().is_err());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            FeatureCollection::from_json("{not json"),
            Err(Error::Json { .. })
        ));
    }

    #[test]
    fn non_object_features_are_dropped() {
        let fc = FeatureCollection::from_json(
            r#"{"type": "FeatureCollection", "features": [null, 3, {"type": "Feature"}]}"#,
        )
        .unwrap();
        assert_eq!(fc.len(), 3);
        assert_eq!(fc.into_features().count(), 1);
    }

    #[test]
    fn property_accessors_tolerate_shapes() {
        let f = feature(json!({
            "IDENT": "ABC",
            "ELEVATION": "123.5",
            "STATE": ["VA"],
            "PRIVATEUSE": 1,
            "ICAO_ID": 42
        }));
        assert_eq!(f.text(props::IDENT).as_deref(), Some("ABC"));
        assert_eq!(f.text(props::ICAO_ID).as_deref(), Some("42"));
        assert_eq!(f.text(props::STATE), None);
        assert_eq!(f.text(props::NAME), None);
        assert_eq!(f.number(props::ELEVATION), Some(123.5));
        assert!(f.flag(props::PRIVATEUSE));
    }

    #[test]
    fn flag_requires_numeric_one() {
        assert!(!feature(json!({ "PRIVATEUSE": 0 })).flag(props::PRIVATEUSE));
        assert!(!feature(json!({ "PRIVATEUSE": "1" })).flag(props::PRIVATEUSE));
        assert!(!feature(json!({})).flag(props::PRIVATEUSE));
        assert!(feature(json!({ "PRIVATEUSE": 1.0 })).flag(props::PRIVATEUSE));
    }

    #[test]
    fn null_properties_read_as_absent() {
        let f: RawFeature =
            serde_json::from_value(json!({ "type": "Feature", "properties": null })).unwrap();
        assert_eq!(f.text(props::NAME), None);
        assert!(!f.flag(props::PRIVATEUSE));
    }
}
