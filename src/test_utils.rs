//! Shared test utilities for execute and output tests.
//!
//! This module provides sample schemas and file helpers used across command tests.

use std::io::Write;

use tempfile::NamedTempFile;

/// Create a temporary file containing the given content.
///
/// Used to create schema and config files for command tests.
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

/// Two tables: a unicode `User` keyed by a binary id and an auto-increment `Post`.
///
/// Use for: build, inspect
pub const USER_POST_SCHEMA: &str = r#"
type User @sql(unicode: true) {
  userId: String @sql(type: "BINARY(16)", primary: true)
  uniqueColumn: Int @sql(unique: true)
  graphqlOnlyField: String
  posts: [Post]
}

type Post {
  postId: Int @sql(primary: true, auto: true)
  userId: String @sql(type: "BINARY(16)", index: true)
  content: String @sql(type: "VARCHAR(300)", unicode: true, nullable: true)
  likes: Int @sql
  dateCreated: String @sql(type: "TIMESTAMP", default: "CURRENT_TIMESTAMP")
}
"#;

/// One table with two secondary indices and table-level constraints.
pub const USER_PAIR_SCHEMA: &str = r#"
type UserPair
  @sql(
    constraints: "UNIQUE(parentUserId, childUserId),\n  FOREIGN KEY (parentUserId) REFERENCES User(userId)"
  ) {
  userPairId: String @sql(type: "BINARY(16)", primary: true)
  parentUserId: String @sql(type: "BINARY(16)", index: true)
  childUserId: String @sql(type: "BINARY(16)", index: true)
}
"#;
