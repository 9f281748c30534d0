use crate::error::{CatalogError, Result};

pub const WORKS_PREFIX: &str = "/works/";
pub const AUTHORS_PREFIX: &str = "/authors/";

/// A catalog key of the form `/works/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkKey<'a>(&'a str);

impl<'a> WorkKey<'a> {
    pub fn parse(key: &'a str) -> Result<Self> {
        match key.strip_prefix(WORKS_PREFIX) {
            Some(id) if is_plain_id(id) => Ok(Self(id)),
            _ => Err(CatalogError::InvalidWorkKey(key.to_string())),
        }
    }

    pub fn id(&self) -> &'a str {
        self.0
    }
}

/// An author key of the form `/authors/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorKey<'a>(&'a str);

impl<'a> AuthorKey<'a> {
    pub fn parse(key: &'a str) -> Result<Self> {
        match key.strip_prefix(AUTHORS_PREFIX) {
            Some(id) if is_plain_id(id) => Ok(Self(id)),
            _ => Err(CatalogError::InvalidAuthorKey(key.to_string())),
        }
    }

    pub fn id(&self) -> &'a str {
        self.0
    }
}

/// Search documents list author keys without the `/authors/` prefix.
pub fn author_key_from_id(id_or_key: &str) -> String {
    if id_or_key.starts_with(AUTHORS_PREFIX) {
        id_or_key.to_string()
    } else {
        format!("{AUTHORS_PREFIX}{id_or_key}")
    }
}

/// Accepts either a full `/works/{id}` key or the bare id.
pub fn work_id_from_key(key_or_id: &str) -> &str {
    key_or_id.strip_prefix(WORKS_PREFIX).unwrap_or(key_or_id)
}

fn is_plain_id(id: &str) -> bool {
    !id.is_empty() && !id.contains('/')
}
