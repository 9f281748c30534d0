use serde::{Deserialize, Serialize};

/// Author record, handed through exactly as upstream sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorDetail(pub serde_json::Value);

impl AuthorDetail {
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(|x| x.as_str())
    }

    pub fn birth_date(&self) -> Option<&str> {
        self.0.get("birth_date").and_then(|x| x.as_str())
    }

    pub fn death_date(&self) -> Option<&str> {
        self.0.get("death_date").and_then(|x| x.as_str())
    }
}
