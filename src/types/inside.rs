use serde::{Deserialize, Serialize};

use super::Extra;

/// The two fields of `archive.org/metadata/{item}` needed to find the
/// full-text shard. Either may be absent.
#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct ArchiveMetadata {
    pub d1:  Option<String>,
    pub dir: Option<String>,
}

/// Response of `fulltext/inside.php`.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsideResults {
    #[serde(default)]
    pub matches: Vec<SearchMatch>,
    #[serde(flatten)]
    pub extra:   Extra,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub text: String,
    #[serde(default)]
    pub par:  Vec<Paragraph>,
}

impl SearchMatch {
    pub fn page(&self) -> Option<u32> {
        self.par.first().map(|p| p.page)
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub page:        u32,
    #[serde(default)]
    pub page_width:  u32,
    #[serde(default)]
    pub page_height: u32,
    #[serde(default)]
    pub boxes:       Vec<BoundingBox>,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub r: i64,
    pub b: i64,
    pub t: i64,
    pub l: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn match_with_boxes() {
        let results: InsideResults = serde_json::from_str(
            r#"{"ia": "nineteeneightyfo00orwe", "q": "big brother", "matches": [{
                "text": "{{{BIG BROTHER}}} IS WATCHING YOU",
                "par": [{"page": 3, "page_width": 1600, "page_height": 2500,
                         "boxes": [{"r": 900, "b": 400, "t": 360, "l": 500}]}]
            }]}"#,
        )
        .unwrap();
        assert_eq!(results.matches.len(), 1);
        assert_eq!(results.matches[0].page(), Some(3));
        assert_eq!(
            results.matches[0].par[0].boxes[0],
            BoundingBox {
                r: 900,
                b: 400,
                t: 360,
                l: 500,
            }
        );
    }
}
