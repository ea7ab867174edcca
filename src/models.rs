use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub type Id = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Post {
    #[schema(value_type = i64)]
    pub id: Id,
    pub title: String,
    pub content: String,
    pub author_id: String,
    pub category: String,
    pub tags: String, // comma separated, "" when absent
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create / update request body. Fields are optional on the wire so that a
/// missing field surfaces as a validation error instead of a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author_id: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Missing required fields")]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

/// Validated post fields, ready for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    pub author_id: String,
    pub category: String,
    pub tags: String,
}

impl NewPost {
    pub fn validate(self) -> Result<PostInput, ValidationError> {
        fn required(v: Option<String>, name: &'static str, missing: &mut Vec<&'static str>) -> String {
            match v {
                Some(s) if !s.is_empty() => s,
                _ => {
                    missing.push(name);
                    String::new()
                }
            }
        }
        let mut missing = Vec::new();
        let title = required(self.title, "title", &mut missing);
        let content = required(self.content, "content", &mut missing);
        let author_id = required(self.author_id, "authorId", &mut missing);
        let category = required(self.category, "category", &mut missing);
        if !missing.is_empty() {
            return Err(ValidationError { missing });
        }
        Ok(PostInput { title, content, author_id, category, tags: self.tags.unwrap_or_default() })
    }
}

impl From<&Post> for NewPost {
    fn from(p: &Post) -> Self {
        Self {
            title: Some(p.title.clone()),
            content: Some(p.content.clone()),
            author_id: Some(p.author_id.clone()),
            category: Some(p.category.clone()),
            tags: Some(p.tags.clone()),
        }
    }
}

/// `?search=&category=` on the list endpoint. Empty values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PostFilter {
    /// Case-insensitive substring matched against title, content and tags
    pub search: Option<String>,
    /// Exact category match
    pub category: Option<String>,
}

impl PostFilter {
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthBody {
    pub status: String,
}
