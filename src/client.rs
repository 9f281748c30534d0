use std::{collections::HashMap, sync::Arc};

use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use crate::{
    config::Config,
    error::{CatalogError, Result},
    notify::TracingNotifier,
    traits::Notifier,
    types::{
        author::AuthorDetail,
        book::{Book, SearchResponse},
        cover::{cover_url, CoverSize},
        edition::Edition,
        inside::{ArchiveMetadata, InsideResults},
        key::{author_key_from_id, AuthorKey, WorkKey},
        lookup::{BookData, IdentifierKind, ReadingLog, Shelf, SubjectBooks},
        work::{EditionsPage, WorkDetail},
    },
};

pub const SEARCH_LIMIT: u32 = 20;
pub const SEARCH_FIELDS: &str = "*,availability";
pub const SHARD_PLACEHOLDER: &str = "{shard}";

pub const NOTICE_SEARCH_FAILED: &str = "Failed to fetch books. Please try again.";
pub const NOTICE_DETAILS_FAILED: &str = "Failed to fetch book details. Please try again.";

/// Access to the catalog, the archive metadata service and the full-text
/// search service.
///
/// Every operation is a read that never fails from the caller's point of view:
/// errors are logged, primary operations additionally send a notice, and an
/// empty value is returned.
#[derive(Clone)]
pub struct CatalogClient {
    http:            reqwest::Client,
    openlibrary_url: Url,
    archive_url:     Url,
    fulltext_url:    String,
    notifier:        Arc<dyn Notifier>,
}

/// What opening a single search result loads.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct BookCardDetail {
    pub work:   Option<WorkDetail>,
    pub author: Option<AuthorDetail>,
}

impl CatalogClient {
    pub fn new(config: &Config, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;
        Ok(Self {
            http,
            openlibrary_url: Url::parse(&config.openlibrary_url)?,
            archive_url: Url::parse(&config.archive_url)?,
            fulltext_url: config.fulltext_url.clone(),
            notifier,
        })
    }

    /// Client on the default endpoints, sending notices to the log.
    pub fn with_defaults() -> Result<Self> {
        Self::new(&Config::default(), Arc::new(TracingNotifier))
    }

    /// `GET {base}/search.json?q={query}&fields=*,availability&limit=20`
    pub async fn search(&self, query: &str) -> SearchResponse {
        let result = self.try_search(query).await;
        self.recover(result, "fetching books", Some(NOTICE_SEARCH_FAILED))
            .unwrap_or_default()
    }

    async fn try_search(&self, query: &str) -> Result<SearchResponse> {
        let mut url = endpoint(&self.openlibrary_url, &["search.json"])?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("fields", SEARCH_FIELDS)
            .append_pair("limit", &SEARCH_LIMIT.to_string());
        self.get_json(url).await
    }

    /// Work record and its editions, fetched together. Fails as a whole when
    /// either request fails.
    pub async fn book_details(&self, work_id: &str) -> Option<WorkDetail> {
        let result = self.try_book_details(work_id).await;
        self.recover(result, "fetching book details", Some(NOTICE_DETAILS_FAILED))
    }

    async fn try_book_details(&self, work_id: &str) -> Result<WorkDetail> {
        let work_url = endpoint(&self.openlibrary_url, &["works", &format!("{work_id}.json")])?;
        let editions_url = endpoint(&self.openlibrary_url, &["works", work_id, "editions.json"])?;
        let (mut work, editions) = tokio::try_join!(
            self.get_json::<WorkDetail>(work_url),
            self.get_json::<EditionsPage>(editions_url),
        )?;
        work.editions = editions.entries;
        Ok(work)
    }

    /// Rejects keys not shaped like `/authors/{id}` before any request is made.
    pub async fn author_details(&self, author_key: &str) -> Option<AuthorDetail> {
        let result = self.try_author_details(author_key).await;
        self.recover(result, "fetching author details", None)
    }

    async fn try_author_details(&self, author_key: &str) -> Result<AuthorDetail> {
        let key = AuthorKey::parse(author_key)?;
        let url = endpoint(&self.openlibrary_url, &["authors", &format!("{}.json", key.id())])?;
        self.get_json(url).await
    }

    pub async fn subject_books(&self, subject: &str) -> Option<SubjectBooks> {
        let result = self.try_subject_books(subject).await;
        self.recover(result, "fetching subject books", None)
    }

    async fn try_subject_books(&self, subject: &str) -> Result<SubjectBooks> {
        let url = endpoint(&self.openlibrary_url, &["subjects", &format!("{subject}.json")])?;
        self.get_json(url).await
    }

    pub async fn book_by_isbn(&self, isbn: &str) -> Option<Edition> {
        let result = self.try_book_by_isbn(isbn).await;
        self.recover(result, "fetching book by ISBN", None)
    }

    async fn try_book_by_isbn(&self, isbn: &str) -> Result<Edition> {
        let url = endpoint(&self.openlibrary_url, &["isbn", &format!("{isbn}.json")])?;
        self.get_json(url).await
    }

    /// Keyed by `{kind}:{id}`; an identifier the catalog does not know yields
    /// an empty map.
    pub async fn book_by_identifier(
        &self,
        kind: IdentifierKind,
        id: &str,
    ) -> Option<HashMap<String, BookData>> {
        let result = self.try_book_by_identifier(kind, id).await;
        self.recover(result, "fetching book by identifier", None)
    }

    async fn try_book_by_identifier(
        &self,
        kind: IdentifierKind,
        id: &str,
    ) -> Result<HashMap<String, BookData>> {
        let mut url = endpoint(&self.openlibrary_url, &["api", "books"])?;
        url.query_pairs_mut()
            .append_pair("bibkeys", &format!("{kind}:{id}"))
            .append_pair("format", "json")
            .append_pair("jscmd", "data");
        self.get_json(url).await
    }

    pub async fn reading_log(&self, username: &str, shelf: Shelf) -> Option<ReadingLog> {
        let result = self.try_reading_log(username, shelf).await;
        self.recover(result, "fetching reading log", None)
    }

    async fn try_reading_log(&self, username: &str, shelf: Shelf) -> Result<ReadingLog> {
        let url = endpoint(
            &self.openlibrary_url,
            &["people", username, "books", &format!("{shelf}.json")],
        )?;
        self.get_json(url).await
    }

    pub fn cover_url(&self, cover_id: u64, size: CoverSize) -> String {
        cover_url(cover_id, size)
    }

    /// Full-text search inside a scanned item.
    ///
    /// The full-text index lives on whichever archive host currently serves
    /// the item, so the item's metadata is read first for its `d1` host and
    /// `dir` path. Without both the search request is never sent.
    pub async fn search_inside(&self, query: &str, item_id: &str) -> Option<InsideResults> {
        let result = self.try_search_inside(query, item_id).await;
        self.recover(result, "searching inside book", None)
    }

    async fn try_search_inside(&self, query: &str, item_id: &str) -> Result<InsideResults> {
        let metadata_url = endpoint(&self.archive_url, &["metadata", item_id])?;
        let metadata: ArchiveMetadata = self.get_json(metadata_url).await?;
        let shard = metadata
            .d1
            .filter(|x| !x.is_empty())
            .ok_or_else(|| CatalogError::missing_metadata(item_id, "d1"))?;
        let dir = metadata
            .dir
            .filter(|x| !x.is_empty())
            .ok_or_else(|| CatalogError::missing_metadata(item_id, "dir"))?;
        let url = fulltext_search_url(&self.fulltext_url, &shard, item_id, &dir, query)?;
        self.get_json(url).await
    }

    /// Loads the work behind a search result and, when the result names an
    /// author, that author alongside it. Each half keeps its own failure
    /// handling. A key not shaped like `/works/{id}` loads no work.
    pub async fn load_book_card(&self, book: &Book) -> BookCardDetail {
        let author_key = book.first_author_key().map(author_key_from_id);
        let work = async {
            match WorkKey::parse(&book.key) {
                Ok(key) => self.book_details(key.id()).await,
                Err(e) => self.recover::<WorkDetail>(Err(e), "loading book card", None),
            }
        };
        let author = async {
            match &author_key {
                Some(key) => self.author_details(key).await,
                None => None,
            }
        };
        let (work, author) = tokio::join!(work, author);
        BookCardDetail { work, author }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {url}");
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                url: url.into(),
                status,
            });
        }
        let body = response.bytes().await?;
        let de = &mut serde_json::Deserializer::from_slice(&body);
        serde_path_to_error::deserialize(de).map_err(|source| CatalogError::Decode {
            url: url.into(),
            source,
        })
    }

    fn recover<T>(&self, result: Result<T>, action: &str, notice: Option<&str>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                error!("Error {action}: {e}");
                if let Some(notice) = notice {
                    self.notifier.notify(notice);
                }
                None
            }
        }
    }
}

/// Appends percent-encoded path segments to `base`.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| CatalogError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Search request for the shard host `shard`, built from a template holding a
/// `{shard}` placeholder.
pub fn fulltext_search_url(
    template: &str,
    shard: &str,
    item_id: &str,
    dir: &str,
    query: &str,
) -> Result<Url> {
    let mut url = Url::parse(&template.replace(SHARD_PLACEHOLDER, shard))?;
    url.query_pairs_mut()
        .append_pair("item_id", item_id)
        .append_pair("doc", item_id)
        .append_pair("path", dir)
        .append_pair("q", query);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs().into_owned().collect()
    }

    #[test]
    fn fulltext_url_uses_shard_and_dir() {
        let url = fulltext_search_url(
            "https://{shard}.us.archive.org/fulltext/inside.php",
            "ia800300",
            "nineteeneightyfo00orwe",
            "/27/items/nineteeneightyfo00orwe",
            "big brother",
        )
        .unwrap();
        assert_eq!(url.host_str(), Some("ia800300.us.archive.org"));
        assert_eq!(url.path(), "/fulltext/inside.php");
        assert_eq!(
            pairs(&url),
            vec![
                ("item_id".into(), "nineteeneightyfo00orwe".into()),
                ("doc".into(), "nineteeneightyfo00orwe".into()),
                ("path".into(), "/27/items/nineteeneightyfo00orwe".into()),
                ("q".into(), "big brother".into()),
            ]
        );
    }

    #[test]
    fn path_segments_are_encoded() {
        let base = Url::parse("https://openlibrary.org").unwrap();
        let url = endpoint(&base, &["subjects", "science fiction/space.json"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://openlibrary.org/subjects/science%20fiction%2Fspace.json"
        );
    }

    #[test]
    fn base_with_trailing_slash() {
        let base = Url::parse("http://127.0.0.1:8080/mirror/").unwrap();
        let url = endpoint(&base, &["works", "OL45883W.json"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/mirror/works/OL45883W.json");
    }
}
