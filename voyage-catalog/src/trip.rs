use serde::{Deserialize, Serialize};

/// A travel package as listed on the site. Read-only once the catalog is loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Trip {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Display price, already formatted (e.g. "$1,299").
    pub price: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brochure: Option<String>,
}
