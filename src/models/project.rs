//! Project model for the gallery and the archive.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tech: Vec<String>,
    pub link: String,
    /// Placeholder image path
    pub image: String,
    pub year: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub featured: bool,
}
