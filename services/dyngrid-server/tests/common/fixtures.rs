// Test fixtures for integration testing

use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;

/// Column list used by most grid tests
#[allow(dead_code)] // Used in integration tests
pub const USER_COLUMNS: [&str; 6] = ["_id", "name", "email", "version", "created", "tags"];

/// A small user collection
#[allow(dead_code)] // Used in integration tests
pub fn user_documents() -> Value {
    json!([
        {
            "_id": "u1",
            "name": "Ann Lee",
            "email": "ann@example.com",
            "version": 0,
            "created": {"$date": "2024-01-15T08:00:00Z"},
            "tags": ["admin", "ops"]
        },
        {
            "_id": "u2",
            "name": "Bob Stone",
            "email": "bob@example.com",
            "version": 3,
            "created": {"$date": "2023-06-01T12:30:00Z"},
            "tags": []
        },
        {
            "_id": "u3",
            "name": "Joanna Park",
            "email": "jo@example.org",
            "version": "0",
            "created": {"$date": "2024-03-02T00:00:00Z"},
            "tags": ["ops"]
        },
        {
            "_id": "u4",
            "name": "Carl Diaz",
            "email": "carl@example.org",
            "version": 7
        },
        {
            "_id": "u5",
            "name": "Dana Hanna",
            "email": "dana@example.com",
            "version": 1,
            "created": null,
            "tags": ["finance"]
        }
    ])
}

/// Documents written to a temporary JSON file
#[allow(dead_code)] // Used in integration tests
pub struct DataFile {
    pub file: NamedTempFile,
}

impl DataFile {
    #[allow(dead_code)] // Used in integration tests
    pub fn with_documents(documents: &Value) -> Self {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        write!(file, "{documents}").expect("Failed to write documents");
        Self { file }
    }

    #[allow(dead_code)] // Used in integration tests
    pub fn users() -> Self {
        Self::with_documents(&user_documents())
    }

    #[allow(dead_code)] // Used in integration tests
    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }
}
