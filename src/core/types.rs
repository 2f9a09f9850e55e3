//! Core data types for the devgate service.
//!
//! Response shapes shared between providers and HTTP handlers.

use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// One entry in a repository directory listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    /// Base name of the entry
    pub name: String,

    /// Path relative to the repository root
    pub path: String,

    /// Entry kind as reported by the upstream API ("file" or "dir")
    #[serde(rename = "type")]
    pub kind: String,
}

/// Decoded file blob returned by the blob endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobResponse {
    pub content: String,
}

/// Names of the configured OpenAPI schemas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaListResponse {
    pub available_schemas: Vec<String>,
}

/// Stack Exchange search result envelope (decoded as-is from the
/// upstream filter projection)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<Question>,
}

/// A question with its answers and comments
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// An answer with its comments
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Answer {
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// A comment on a question or answer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_entry_serializes_type_field() {
        let entry = FileEntry {
            name: "README.md".to_string(),
            path: "README.md".to_string(),
            kind: "file".to_string(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "file");
        assert_eq!(json["name"], "README.md");
    }

    #[test]
    fn test_search_response_missing_fields_default() {
        // The upstream filter omits fields that are empty; decoding
        // must tolerate that.
        let json = r#"{"items":[{"title":"How do I?","score":3}]}"#;
        let resp: SearchResponse = serde_json::from_str(json).unwrap();

        assert_eq!(resp.items.len(), 1);
        assert_eq!(resp.items[0].title, "How do I?");
        assert!(resp.items[0].answers.is_empty());
        assert!(resp.items[0].comments.is_empty());
    }

    #[test]
    fn test_search_response_nested_shape() {
        let json = r#"{
            "items": [{
                "title": "q", "score": 1, "body": "qb",
                "answers": [{"score": 2, "body": "ab", "comments": [{"score": 0, "body": "cb"}]}],
                "comments": [{"score": 5, "body": "qc"}]
            }]
        }"#;
        let resp: SearchResponse = serde_json::from_str(json).unwrap();

        let q = &resp.items[0];
        assert_eq!(q.answers[0].comments[0].body, "cb");
        assert_eq!(q.comments[0].score, 5);
    }
}
