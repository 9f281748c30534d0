use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use super::Extra;

/// `subjects/{subject}.json`
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectBooks {
    pub key:        Option<String>,
    pub name:       Option<String>,
    pub work_count: Option<u64>,
    #[serde(default)]
    pub works:      Vec<SubjectWork>,
    #[serde(flatten)]
    pub extra:      Extra,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectWork {
    pub key:      String,
    pub title:    Option<String>,
    pub cover_id: Option<i64>,
    #[serde(default)]
    pub authors:  Vec<NamedRef>,
    #[serde(flatten)]
    pub extra:    Extra,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    pub key:  Option<String>,
    pub name: Option<String>,
}

/// `people/{user}/books/{shelf}.json`
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingLog {
    pub page:                Option<u32>,
    #[serde(default)]
    pub reading_log_entries: Vec<ReadingLogEntry>,
    #[serde(flatten)]
    pub extra:               Extra,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingLogEntry {
    pub work:           Option<serde_json::Value>,
    pub logged_edition: Option<String>,
    pub logged_date:    Option<String>,
    #[serde(flatten)]
    pub extra:          Extra,
}

/// One value of the `api/books?jscmd=data` map, keyed by `{type}:{id}`.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookData {
    #[serde(default)]
    pub url:             String,
    #[serde(default)]
    pub key:             String,
    pub title:           Option<String>,
    pub subtitle:        Option<String>,
    pub authors:         Option<Vec<NamedLink>>,
    pub identifiers:     Option<Identifiers>,
    pub publishers:      Option<Vec<NamedRef>>,
    pub publish_date:    Option<String>,
    pub number_of_pages: Option<u32>,
    pub subjects:        Option<Vec<NamedLink>>,
    pub cover:           Option<Cover>,
    #[serde(flatten)]
    pub extra:           Extra,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedLink {
    pub name: String,
    pub url:  Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifiers {
    pub isbn_10:     Option<Vec<String>>,
    pub isbn_13:     Option<Vec<String>>,
    pub oclc:        Option<Vec<String>>,
    pub lccn:        Option<Vec<String>>,
    pub openlibrary: Option<Vec<String>>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cover {
    pub small:  Option<String>,
    pub medium: Option<String>,
    pub large:  Option<String>,
}

/// Reading log shelves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shelf {
    WantToRead,
    CurrentlyReading,
    AlreadyRead,
}

impl Shelf {
    pub const ALL: [Shelf; 3] = [Shelf::WantToRead, Shelf::CurrentlyReading, Shelf::AlreadyRead];

    pub fn as_str(&self) -> &'static str {
        match self {
            Shelf::WantToRead => "want-to-read",
            Shelf::CurrentlyReading => "currently-reading",
            Shelf::AlreadyRead => "already-read",
        }
    }
}

impl Display for Shelf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Shelf {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shelf::ALL
            .into_iter()
            .find(|shelf| shelf.as_str() == s)
            .ok_or_else(|| format!("{s} is not a shelf"))
    }
}

/// Identifier schemes understood by the `api/books` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
    Isbn,
    Oclc,
    Lccn,
}

impl IdentifierKind {
    pub const ALL: [IdentifierKind; 3] =
        [IdentifierKind::Isbn, IdentifierKind::Oclc, IdentifierKind::Lccn];

    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierKind::Isbn => "isbn",
            IdentifierKind::Oclc => "oclc",
            IdentifierKind::Lccn => "lccn",
        }
    }
}

impl Display for IdentifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IdentifierKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IdentifierKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s.to_lowercase())
            .ok_or_else(|| format!("{s} is not one of isbn, oclc, lccn"))
    }
}
