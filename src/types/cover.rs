use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

pub const COVERS_URL: &str = "https://covers.openlibrary.org";

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverSize {
    #[serde(rename = "S")]
    Small,
    #[default]
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "L")]
    Large,
}

impl CoverSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverSize::Small => "S",
            CoverSize::Medium => "M",
            CoverSize::Large => "L",
        }
    }
}

impl Display for CoverSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CoverSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "S" | "s" => Ok(CoverSize::Small),
            "M" | "m" => Ok(CoverSize::Medium),
            "L" | "l" => Ok(CoverSize::Large),
            _ => Err(format!("{s} is not a cover size, expected S, M or L")),
        }
    }
}

/// Image location for a cover id. Whether the id exists is the caller's
/// concern.
pub fn cover_url(cover_id: u64, size: CoverSize) -> String {
    format!("{COVERS_URL}/b/id/{cover_id}-{size}.jpg")
}

/// Catalog records use `-1` and other non-positive ids for "no cover".
pub fn known_cover_id(raw: i64) -> Option<u64> {
    u64::try_from(raw).ok().filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_size_is_medium() {
        assert_eq!(CoverSize::default(), CoverSize::Medium);
        assert_eq!(
            cover_url(240727, CoverSize::default()),
            "https://covers.openlibrary.org/b/id/240727-M.jpg"
        );
    }

    #[test]
    fn every_size() {
        assert_eq!(
            cover_url(8739161, CoverSize::Small),
            "https://covers.openlibrary.org/b/id/8739161-S.jpg"
        );
        assert_eq!(
            cover_url(8739161, CoverSize::Large),
            "https://covers.openlibrary.org/b/id/8739161-L.jpg"
        );
        assert_eq!(
            cover_url(8739161, CoverSize::Large),
            cover_url(8739161, CoverSize::Large)
        );
    }

    #[test]
    fn placeholder_ids_have_no_cover() {
        assert_eq!(known_cover_id(-1), None);
        assert_eq!(known_cover_id(0), None);
        assert_eq!(known_cover_id(240727), Some(240727));
    }

    #[test]
    fn parse_size() {
        assert_eq!("l".parse::<CoverSize>(), Ok(CoverSize::Large));
        assert!("XL".parse::<CoverSize>().is_err());
    }
}
