use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use super::{
    cover::{cover_url, known_cover_id, CoverSize},
    key::WorkKey,
    Extra,
};

/// One document of a catalog search.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub key:                String,
    pub title:              Option<String>,
    pub author_name:        Option<Vec<String>>,
    pub author_key:         Option<Vec<String>>,
    pub first_publish_year: Option<i32>,
    pub cover_i:            Option<i64>,
    pub isbn:               Option<Vec<String>>,
    pub language:           Option<Vec<String>>,
    pub publisher:          Option<Vec<String>>,
    pub number_of_pages:    Option<u32>,
    pub preview:            Option<String>,
    pub ia:                 Option<Vec<String>>,
    pub availability:       Option<Availability>,
    #[serde(flatten)]
    pub extra:              Extra,
}

impl Book {
    /// The bare work id, if the key has the `/works/{id}` shape.
    pub fn work_id(&self) -> Option<&str> {
        WorkKey::parse(&self.key).ok().map(|key| key.id())
    }

    pub fn first_author_key(&self) -> Option<&str> {
        self.author_key
            .as_ref()
            .and_then(|keys| keys.first())
            .map(String::as_str)
    }

    pub fn cover_url(&self, size: CoverSize) -> Option<String> {
        self.cover_i.and_then(known_cover_id).map(|id| cover_url(id, size))
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    #[serde(default)]
    pub status:                String,
    #[serde(default)]
    pub available_to_borrow:   bool,
    #[serde(default)]
    pub available_to_waitlist: bool,
    pub borrow_url:            Option<String>,
    #[serde(flatten)]
    pub extra:                 Extra,
}

/// Envelope returned by `search.json`. The default value is what a failed
/// search yields.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "tolerant_docs")]
    pub docs:      Vec<Book>,
    #[serde(rename = "numFound", default)]
    pub num_found: u64,
}

/// Decodes each document on its own. A document with an unexpected field type
/// keeps its key and carries every field in `extra`.
fn tolerant_docs<'de, D>(deserializer: D) -> Result<Vec<Book>, D::Error>
where
    D: Deserializer<'de>,
{
    let docs = Vec::<Value>::deserialize(deserializer)?;
    Ok(docs.into_iter().map(Book::from_value_lossy).collect())
}

impl Book {
    fn from_value_lossy(doc: Value) -> Self {
        match serde_json::from_value::<Book>(doc.clone()) {
            Ok(book) => book,
            Err(e) => {
                warn!("Search document kept untyped: {e}");
                let mut extra = match doc {
                    Value::Object(map) => map,
                    other => Extra::from_iter([("value".to_string(), other)]),
                };
                let key = match extra.remove("key") {
                    Some(Value::String(key)) => key,
                    _ => String::new(),
                };
                Book {
                    key,
                    extra,
                    ..Book::default()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn search_doc_keeps_unknown_fields() {
        let book: Book = serde_json::from_str(
            r#"{
                "key": "/works/OL1168083W",
                "title": "Nineteen Eighty-Four",
                "author_key": ["OL118077A"],
                "cover_i": 9267242,
                "ebook_access": "borrowable",
                "availability": {"status": "borrow_available", "available_to_borrow": true}
            }"#,
        )
        .unwrap();
        assert_eq!(book.work_id(), Some("OL1168083W"));
        assert_eq!(book.first_author_key(), Some("OL118077A"));
        assert_eq!(
            book.cover_url(CoverSize::default()).as_deref(),
            Some("https://covers.openlibrary.org/b/id/9267242-M.jpg")
        );
        assert_eq!(book.extra["ebook_access"], "borrowable");
        let availability = book.availability.unwrap();
        assert!(availability.available_to_borrow);
        assert!(!availability.available_to_waitlist);
    }

    #[test]
    fn odd_documents_do_not_sink_the_page() {
        let response: SearchResponse = serde_json::from_str(
            r#"{
                "numFound": 3,
                "docs": [
                    {"key": "/works/OL1W", "title": "Kept"},
                    {"key": "/works/OL2W", "cover_i": -1},
                    {"key": "/works/OL3W", "title": 1984, "cover_i": "n/a"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(response.num_found, 3);
        assert_eq!(response.docs.len(), 3);
        assert_eq!(response.docs[0].title.as_deref(), Some("Kept"));
        assert_eq!(response.docs[1].cover_i, Some(-1));
        assert_eq!(response.docs[1].cover_url(CoverSize::Small), None);
        assert_eq!(response.docs[2].key, "/works/OL3W");
        assert_eq!(response.docs[2].title, None);
        assert_eq!(response.docs[2].extra["title"], 1984);
        assert_eq!(response.docs[2].work_id(), Some("OL3W"));
    }

    #[test]
    fn empty_envelope_is_default() {
        let response: SearchResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response, SearchResponse::default());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({"docs": [], "numFound": 0})
        );
    }
}
