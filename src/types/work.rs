use serde::{Deserialize, Serialize};

use super::{book::Availability, edition::Edition, Extra};

/// A work record with its editions merged in.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkDetail {
    pub key:          String,
    pub title:        Option<String>,
    pub subjects:     Option<Vec<String>>,
    pub description:  Option<Description>,
    pub excerpts:     Option<Vec<Excerpt>>,
    pub ia:           Option<Vec<String>>,
    pub availability: Option<Availability>,
    #[serde(default)]
    pub editions:     Vec<Edition>,
    #[serde(flatten)]
    pub extra:        Extra,
}

/// Upstream serves descriptions either as a bare string or as a typed text
/// object. Both shapes are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Simple(String),
    Complex(DescriptionComplex),
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptionComplex {
    #[serde(rename = "type")]
    pub kind:  Option<String>,
    pub value: String,
}

impl Description {
    pub fn text(&self) -> &str {
        match self {
            Description::Simple(s) => s,
            Description::Complex(c) => &c.value,
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Excerpt {
    pub comment: Option<String>,
    #[serde(alias = "excerpt")]
    pub text:    Option<String>,
    #[serde(flatten)]
    pub extra:   Extra,
}

/// Shape of `works/{id}/editions.json`; only `entries` is merged.
#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct EditionsPage {
    #[serde(default)]
    pub entries: Vec<Edition>,
}
