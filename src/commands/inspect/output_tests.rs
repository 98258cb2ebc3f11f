//! Output formatting tests for inspect command.

#[cfg(test)]
mod tests {
    use super::super::execute::{ColumnSummary, InspectResult, TableSummary};
    use rstest::{fixture, rstest};

    const EMPTY_TABLE_OUTPUT: &str = "\
Relational model: schema.graphql

No annotated types found.";

    const FULL_TABLE_OUTPUT: &str = "\
Relational model: schema.graphql

Found 1 table(s), 3 column(s):

Post (unicode)
  postId: INT NOT NULL [auto]
  content: VARCHAR(300) NULL [unicode]
  dateCreated: TIMESTAMP NOT NULL [default CURRENT_TIMESTAMP]
  PRIMARY KEY postId
  INDEX dateCreated
  CONSTRAINTS
    UNIQUE(postId, content),
    FOREIGN KEY (postId) REFERENCES Other(id)";

    const DECLARATIONS_TABLE_OUTPUT: &str = "\
Relational model: schema.graphql

No annotated types found.

Directive declarations:

directive @sqlSkip on FIELD_DEFINITION";

    fn column(name: &str, sql_type: &str) -> ColumnSummary {
        ColumnSummary {
            name: name.to_string(),
            declared_type: "String".to_string(),
            sql_type: sql_type.to_string(),
            nullable: false,
            flags: Vec::new(),
            default: None,
            generated: None,
        }
    }

    #[fixture]
    fn empty_result() -> InspectResult {
        InspectResult {
            schema: "schema.graphql".to_string(),
            ..Default::default()
        }
    }

    #[fixture]
    fn full_result() -> InspectResult {
        let mut post_id = column("postId", "INT");
        post_id.flags = vec!["auto".to_string()];
        let mut content = column("content", "VARCHAR(300)");
        content.nullable = true;
        content.flags = vec!["unicode".to_string()];
        let mut date = column("dateCreated", "TIMESTAMP");
        date.default = Some("CURRENT_TIMESTAMP".to_string());

        InspectResult {
            schema: "schema.graphql".to_string(),
            total_columns: 3,
            tables: vec![TableSummary {
                name: "Post".to_string(),
                unicode: true,
                primary_index: "postId".to_string(),
                secondary_indices: vec!["dateCreated".to_string()],
                constraints: Some(
                    "UNIQUE(postId, content),\n  FOREIGN KEY (postId) REFERENCES Other(id)".to_string(),
                ),
                columns: vec![post_id, content, date],
            }],
            declarations: None,
        }
    }

    #[fixture]
    fn declarations_result() -> InspectResult {
        InspectResult {
            schema: "schema.graphql".to_string(),
            declarations: Some("directive @sqlSkip on FIELD_DEFINITION".to_string()),
            ..Default::default()
        }
    }

    crate::output_table_test! {
        test_name: test_to_table_empty,
        fixture: empty_result,
        fixture_type: InspectResult,
        expected: EMPTY_TABLE_OUTPUT,
    }

    crate::output_table_test! {
        test_name: test_to_table_with_data,
        fixture: full_result,
        fixture_type: InspectResult,
        expected: FULL_TABLE_OUTPUT,
    }

    crate::output_table_test! {
        test_name: test_to_table_with_declarations,
        fixture: declarations_result,
        fixture_type: InspectResult,
        expected: DECLARATIONS_TABLE_OUTPUT,
    }

    crate::output_json_test! {
        test_name: test_format_json_declarations,
        fixture: declarations_result,
        fixture_type: InspectResult,
        assertions: {
            "declarations": "directive @sqlSkip on FIELD_DEFINITION",
        },
    }

    crate::output_json_test! {
        test_name: test_format_json,
        fixture: full_result,
        fixture_type: InspectResult,
        assertions: {
            "schema": "schema.graphql",
            "total_columns": 3,
        },
    }

    #[rstest]
    fn test_format_json_columns(full_result: InspectResult) {
        use crate::output::{OutputFormat, Outputable};
        let parsed: serde_json::Value =
            serde_json::from_str(&full_result.format(OutputFormat::Json)).unwrap();
        let columns = &parsed["tables"][0]["columns"];
        assert_eq!(columns[0]["flags"][0], "auto");
        assert!(columns[0].get("default").is_none());
        assert_eq!(columns[2]["default"], "CURRENT_TIMESTAMP");
        assert!(parsed.get("declarations").is_none());
    }

    crate::output_toon_test! {
        test_name: test_format_toon,
        fixture: full_result,
        fixture_type: InspectResult,
        contains: ["schema: schema.graphql", "total_columns: 3"],
    }
}
