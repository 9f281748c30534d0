use serde::{Deserialize, Serialize};

use super::Extra;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edition {
    pub key:             Option<String>,
    pub title:           Option<String>,
    pub subtitle:        Option<String>,
    pub publishers:      Option<Vec<String>>,
    pub physical_format: Option<String>,
    pub publish_date:    Option<String>,
    pub number_of_pages: Option<u32>,
    pub isbn_10:         Option<Vec<String>>,
    pub isbn_13:         Option<Vec<String>>,
    pub languages:       Option<Vec<KeyRef>>,
    pub authors:         Option<Vec<KeyRef>>,
    pub works:           Option<Vec<KeyRef>>,
    pub covers:          Option<Vec<i64>>,
    pub ocaid:           Option<String>,
    #[serde(flatten)]
    pub extra:           Extra,
}

/// A `{"key": "/…/…"}` reference to another catalog record.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyRef {
    pub key: String,
}
