pub mod author;
pub mod book;
pub mod cover;
pub mod edition;
pub mod inside;
pub mod key;
pub mod lookup;
pub mod work;

/// Upstream fields this crate has no typed slot for, kept as they arrived.
pub type Extra = serde_json::Map<String, serde_json::Value>;
