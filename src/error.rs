use custom_error::custom_error;

pub type Result<T> = std::result::Result<T, Error>;

custom_error! {pub Error
    Io{source: std::io::Error} = "I/O error",
    Json{source: serde_json::Error} = "malformed GeoJSON: {source}",
    XML{quick_xml: quick_xml::Error} = "XML error",
    NotFeatureCollection{found: String} = "Expected GeoJSON FeatureCollection, found {found}",
    NotAFeature{found: String} = "record of type {found} is not a Feature",
    UnknownDuplicatePolicy{name: String} = "unknown duplicate policy '{name}' (expected keep, skip or suffix)"
}

impl From<quick_xml::Error> for Error {
    fn from(e: quick_xml::Error) -> Error {
        Error::XML { quick_xml: e }
    }
}
