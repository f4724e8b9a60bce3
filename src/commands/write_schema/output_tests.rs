//! Output formatting tests for write-schema command.

#[cfg(test)]
mod tests {
    use super::super::execute::WriteSchemaResult;
    use crate::schema::Dbms;
    use rstest::{fixture, rstest};
    use std::collections::BTreeMap;

    const MULTI_TABLE_OUTPUT: &str = "\
// ==> a.prisma <==
model A {}

// ==> b.prisma <==
model B {}";

    #[fixture]
    fn single_result() -> WriteSchemaResult {
        WriteSchemaResult {
            dbms: Dbms::Sqlite,
            files: BTreeMap::from([("a.prisma".to_string(), "model A {}\n".to_string())]),
        }
    }

    #[fixture]
    fn multi_result() -> WriteSchemaResult {
        WriteSchemaResult {
            dbms: Dbms::Sqlite,
            files: BTreeMap::from([
                ("b.prisma".to_string(), "model B {}\n".to_string()),
                ("a.prisma".to_string(), "model A {}\n".to_string()),
            ]),
        }
    }

    crate::output_table_test! {
        test_name: test_to_table_single,
        fixture: single_result,
        fixture_type: WriteSchemaResult,
        expected: "model A {}",
    }

    crate::output_table_test! {
        test_name: test_to_table_multi,
        fixture: multi_result,
        fixture_type: WriteSchemaResult,
        expected: MULTI_TABLE_OUTPUT,
    }

    crate::output_json_test! {
        test_name: test_format_json,
        fixture: multi_result,
        fixture_type: WriteSchemaResult,
        assertions: {
            "dbms": "sqlite",
        },
    }
}
