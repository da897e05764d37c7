//! Blog post and downloadable resource models.

use ascend_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

/// A downloadable guide, template, or worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Format tag, e.g. `pdf`, `template`, `video`.
    #[serde(rename = "type")]
    pub resource_type: String,
    pub media_url: String,
    pub download_count: u64,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResource {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub media_url: String,
}

/// A blog article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: EntityId,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub image_url: Option<String>,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlogPost {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogPost {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub is_published: Option<bool>,
}

impl BlogPost {
    /// Apply the present fields of `update` in place.
    pub fn apply(&mut self, update: UpdateBlogPost) {
        if let Some(v) = update.title {
            self.title = v;
        }
        if let Some(v) = update.slug {
            self.slug = v;
        }
        if let Some(v) = update.excerpt {
            self.excerpt = v;
        }
        if let Some(v) = update.content {
            self.content = v;
        }
        if let Some(v) = update.category {
            self.category = v;
        }
        if update.image_url.is_some() {
            self.image_url = update.image_url;
        }
        if let Some(v) = update.is_published {
            self.is_published = v;
        }
    }
}
