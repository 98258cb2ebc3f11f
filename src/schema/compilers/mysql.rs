//! MySQL DDL compiler.
//!
//! Generates `CREATE TABLE` statements from a validated relational model. The
//! output is deterministic: tables in declaration order, columns in field order,
//! one blank line between statements, and no trailing newline.

use crate::schema::definition::{Column, RelationalModel, Table};

/// Character set and collation applied to unicode columns and tables.
pub const UNICODE_CLAUSE: &str = "CHARACTER SET utf8mb4 COLLATE utf8mb4_unicode_ci";

/// Compiler for generating MySQL DDL from the relational model.
#[derive(Debug, Clone, Copy)]
pub struct MysqlCompiler<'a> {
    /// Database every table name is qualified with
    pub database_name: &'a str,

    /// Prepended to every table name (may be empty)
    pub table_prefix: &'a str,
}

impl<'a> MysqlCompiler<'a> {
    pub fn new(database_name: &'a str, table_prefix: &'a str) -> Self {
        Self {
            database_name,
            table_prefix,
        }
    }

    /// Generate the column definition for a single column.
    ///
    /// Produces output in the format:
    /// ```sql
    /// `name` TYPE [CHARACTER SET ...] NULL|NOT NULL [DEFAULT v | GENERATED expr] [AUTO_INCREMENT] [UNIQUE]
    /// ```
    pub fn compile_column(column: &Column) -> String {
        let mut clauses = vec![format!("`{}`", column.name), column.sql_type().to_string()];

        if column.unicode {
            clauses.push(UNICODE_CLAUSE.to_string());
        }

        clauses.push(if column.nullable { "NULL" } else { "NOT NULL" }.to_string());

        if let Some(generated) = &column.generated {
            clauses.push(generated_clause(generated));
        } else if let Some(default) = &column.default {
            clauses.push(format!("DEFAULT {}", default));
        }

        if column.auto {
            clauses.push("AUTO_INCREMENT".to_string());
        }
        if column.unique {
            clauses.push("UNIQUE".to_string());
        }

        clauses.join(" ").trim_end().to_string()
    }

    /// Generate the `CREATE TABLE` statement for a single table.
    ///
    /// Produces output in the format:
    /// ```sql
    /// CREATE TABLE `db`.`prefixTable` (
    ///   `col` TYPE NOT NULL,
    ///   PRIMARY KEY (`col`),
    ///   INDEX `OTHERINDEX` (`other` ASC),
    ///   <constraints>
    /// ) CHARACTER SET utf8mb4 COLLATE utf8mb4_unicode_ci;
    /// ```
    pub fn compile_table(&self, table: &Table) -> String {
        let columns = table
            .columns
            .values()
            .map(Self::compile_column)
            .collect::<Vec<_>>()
            .join(",\n  ");

        let primary_key = table.primary_index.as_deref().unwrap_or_default();

        let indices = table
            .secondary_columns()
            .map(|c| format!(",\n  INDEX `{}INDEX` (`{}` ASC)", c.name.to_uppercase(), c.name))
            .collect::<String>();

        let constraints = table
            .constraints
            .as_deref()
            .map(|c| format!(",\n  {}", c))
            .unwrap_or_default();

        let unicode = if table.unicode {
            format!(" {}", UNICODE_CLAUSE)
        } else {
            String::new()
        };

        format!(
            "CREATE TABLE `{}`.`{}{}` (\n  {},\n  PRIMARY KEY (`{}`){}{}\n){};",
            self.database_name,
            self.table_prefix,
            table.name,
            columns,
            primary_key,
            indices,
            constraints,
            unicode
        )
    }

    /// Generate the full script: every table statement, separated by a blank line.
    pub fn compile_all(&self, model: &RelationalModel) -> String {
        model
            .tables()
            .map(|table| self.compile_table(table))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// The generated-column clause, prefixed with `GENERATED` unless the
/// expression already starts with that keyword as a whole word.
fn generated_clause(expression: &str) -> String {
    const KEYWORD: &str = "GENERATED";

    let expression = expression.trim();
    let starts_with_keyword = expression
        .get(..KEYWORD.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(KEYWORD))
        && expression[KEYWORD.len()..]
            .chars()
            .next()
            .is_none_or(|next| next.is_whitespace() || next == '(');

    if starts_with_keyword {
        expression.to_string()
    } else {
        format!("{} {}", KEYWORD, expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn column(name: &str, sql_type: &str) -> Column {
        let mut column = Column::new(name, "String");
        column.sql_type = Some(sql_type.to_string());
        column
    }

    fn table_with(name: &str, columns: Vec<Column>) -> Table {
        let mut table = Table::new(name);
        for column in columns {
            if column.primary {
                table.primary_index = Some(column.name.clone());
            } else if column.index {
                table.secondary_indices.push(column.name.clone());
            }
            table.columns.insert(column.name.clone(), column);
        }
        table
    }

    #[rstest]
    fn test_plain_column() {
        assert_eq!(
            MysqlCompiler::compile_column(&column("likes", "INT")),
            "`likes` INT NOT NULL"
        );
    }

    #[rstest]
    fn test_column_clause_order() {
        let mut c = column("postId", "INT");
        c.auto = true;
        c.unique = true;
        assert_eq!(
            MysqlCompiler::compile_column(&c),
            "`postId` INT NOT NULL AUTO_INCREMENT UNIQUE"
        );
    }

    #[rstest]
    fn test_unicode_nullable_column() {
        let mut c = column("content", "VARCHAR(300)");
        c.unicode = true;
        c.nullable = true;
        assert_eq!(
            MysqlCompiler::compile_column(&c),
            "`content` VARCHAR(300) CHARACTER SET utf8mb4 COLLATE utf8mb4_unicode_ci NULL"
        );
    }

    #[rstest]
    fn test_default_column() {
        let mut c = column("dateCreated", "TIMESTAMP");
        c.default = Some("CURRENT_TIMESTAMP".to_string());
        assert_eq!(
            MysqlCompiler::compile_column(&c),
            "`dateCreated` TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP"
        );
    }

    #[rstest]
    #[case(
        "GENERATED ALWAYS AS (data->>'$.test') VIRTUAL",
        "`t` VARCHAR(30) NOT NULL GENERATED ALWAYS AS (data->>'$.test') VIRTUAL"
    )]
    #[case(
        "ALWAYS AS (data->>'$.test')",
        "`t` VARCHAR(30) NOT NULL GENERATED ALWAYS AS (data->>'$.test')"
    )]
    #[case(
        "AS (data->>'$.test') STORED",
        "`t` VARCHAR(30) NOT NULL GENERATED AS (data->>'$.test') STORED"
    )]
    #[case(
        "generated always as (1)",
        "`t` VARCHAR(30) NOT NULL generated always as (1)"
    )]
    #[case(
        "  GENERATED ALWAYS AS (1) VIRTUAL\n",
        "`t` VARCHAR(30) NOT NULL GENERATED ALWAYS AS (1) VIRTUAL"
    )]
    #[case(
        "  AS (1)  ",
        "`t` VARCHAR(30) NOT NULL GENERATED AS (1)"
    )]
    #[case(
        "GENERATED(1)",
        "`t` VARCHAR(30) NOT NULL GENERATED(1)"
    )]
    #[case(
        "GENERATED_COL + 1",
        "`t` VARCHAR(30) NOT NULL GENERATED GENERATED_COL + 1"
    )]
    fn test_generated_column(#[case] expression: &str, #[case] expected: &str) {
        let mut c = column("t", "VARCHAR(30)");
        c.generated = Some(expression.to_string());
        assert_eq!(MysqlCompiler::compile_column(&c), expected);
    }

    #[rstest]
    fn test_generated_replaces_default() {
        let mut c = column("t", "INT");
        c.default = Some("0".to_string());
        c.generated = Some("ALWAYS AS (1)".to_string());
        assert_eq!(
            MysqlCompiler::compile_column(&c),
            "`t` INT NOT NULL GENERATED ALWAYS AS (1)"
        );
    }

    #[rstest]
    fn test_trailing_whitespace_is_trimmed() {
        let mut c = column("t", "INT");
        c.default = Some("0  ".to_string());
        assert_eq!(MysqlCompiler::compile_column(&c), "`t` INT NOT NULL DEFAULT 0");
    }

    #[rstest]
    fn test_table_with_indices_and_constraints() {
        let mut pk = column("userPairId", "BINARY(16)");
        pk.primary = true;
        let mut parent = column("parentUserId", "BINARY(16)");
        parent.index = true;
        let mut child = column("childUserId", "BINARY(16)");
        child.index = true;

        let mut table = table_with("UserPair", vec![pk, parent, child]);
        table.constraints = Some(
            "UNIQUE(parentUserId, childUserId),\n  FOREIGN KEY (parentUserId) REFERENCES User(userId)"
                .to_string(),
        );

        let expected = "\
CREATE TABLE `dbname`.`test_UserPair` (
  `userPairId` BINARY(16) NOT NULL,
  `parentUserId` BINARY(16) NOT NULL,
  `childUserId` BINARY(16) NOT NULL,
  PRIMARY KEY (`userPairId`),
  INDEX `PARENTUSERIDINDEX` (`parentUserId` ASC),
  INDEX `CHILDUSERIDINDEX` (`childUserId` ASC),
  UNIQUE(parentUserId, childUserId),
  FOREIGN KEY (parentUserId) REFERENCES User(userId)
);";
        let compiler = MysqlCompiler::new("dbname", "test_");
        assert_eq!(compiler.compile_table(&table), expected);
    }

    #[rstest]
    fn test_unicode_table_without_prefix() {
        let mut pk = column("id", "INT");
        pk.primary = true;
        let mut table = table_with("User", vec![pk]);
        table.unicode = true;

        let expected = "\
CREATE TABLE `app`.`User` (
  `id` INT NOT NULL,
  PRIMARY KEY (`id`)
) CHARACTER SET utf8mb4 COLLATE utf8mb4_unicode_ci;";
        assert_eq!(MysqlCompiler::new("app", "").compile_table(&table), expected);
    }

    #[rstest]
    fn test_compile_all_separates_with_blank_line() {
        let mut model = RelationalModel::new();
        for name in ["A", "B"] {
            let mut pk = column("id", "INT");
            pk.primary = true;
            model.tables.insert(name.to_string(), table_with(name, vec![pk]));
        }

        let script = MysqlCompiler::new("db", "").compile_all(&model);
        assert_eq!(
            script,
            "CREATE TABLE `db`.`A` (\n  `id` INT NOT NULL,\n  PRIMARY KEY (`id`)\n);\n\n\
             CREATE TABLE `db`.`B` (\n  `id` INT NOT NULL,\n  PRIMARY KEY (`id`)\n);"
        );
        assert!(!script.ends_with('\n'));
    }

    #[rstest]
    fn test_compile_all_empty_model() {
        assert_eq!(MysqlCompiler::new("db", "").compile_all(&RelationalModel::new()), "");
    }
}
