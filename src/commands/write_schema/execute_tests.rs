//! Execute tests for write-schema command.

#[cfg(test)]
mod tests {
    use super::super::WriteSchemaCmd;
    use crate::commands::Execute;
    use crate::config::{ConfigFile, SchemaConfig};
    use crate::schema::Dbms;
    use crate::test_utils::{create_temp_json_file, INVALID_SCHEMA_JSON, USER_SCHEMA_JSON};
    use rstest::{fixture, rstest};
    use tempfile::NamedTempFile;

    #[fixture]
    fn user_schema() -> NamedTempFile {
        create_temp_json_file(USER_SCHEMA_JSON)
    }

    fn cmd(file: &NamedTempFile, dbms: Option<Dbms>, only: Option<&str>) -> WriteSchemaCmd {
        WriteSchemaCmd {
            input: file.path().to_path_buf(),
            dbms,
            file: only.map(str::to_string),
        }
    }

    #[rstest]
    fn test_writes_model_and_main_file(user_schema: NamedTempFile) {
        let result = cmd(&user_schema, None, None)
            .execute(&ConfigFile::default())
            .unwrap();
        assert_eq!(result.dbms, Dbms::Postgres);
        assert_eq!(
            result.files.keys().collect::<Vec<_>>(),
            vec!["main.prisma", "user.prisma"]
        );
        let user = &result.files["user.prisma"];
        assert!(user.contains("model User {"));
        assert!(user.contains("id String @id @db.Uuid"));
        assert!(user.contains("@@unique([email])"));
    }

    #[rstest]
    fn test_dbms_falls_back_to_config(user_schema: NamedTempFile) {
        let config = ConfigFile {
            schema: SchemaConfig {
                dbms: Dbms::Sqlite,
                author: "acme".to_string(),
            },
            ..Default::default()
        };
        let result = cmd(&user_schema, None, Some("user.prisma"))
            .execute(&config)
            .unwrap();
        assert_eq!(result.dbms, Dbms::Sqlite);
        let user = &result.files["user.prisma"];
        assert!(!user.contains("@db."));
        assert!(user.contains("/// @author acme"));
    }

    #[rstest]
    fn test_flag_overrides_config(user_schema: NamedTempFile) {
        let config = ConfigFile {
            schema: SchemaConfig {
                dbms: Dbms::Sqlite,
                ..Default::default()
            },
            ..Default::default()
        };
        let result = cmd(&user_schema, Some(Dbms::Postgres), Some("main.prisma"))
            .execute(&config)
            .unwrap();
        assert_eq!(result.files.len(), 1);
        assert_eq!(result.files["main.prisma"], Dbms::Postgres.main_prisma());
    }

    #[rstest]
    fn test_unknown_file_is_error(user_schema: NamedTempFile) {
        let err = cmd(&user_schema, None, Some("order.prisma"))
            .execute(&ConfigFile::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "No schema file named 'order.prisma'. Written files: main.prisma, user.prisma"
        );
    }

    #[rstest]
    fn test_invalid_schema_refused() {
        let file = create_temp_json_file(INVALID_SCHEMA_JSON);
        let err = cmd(&file, None, None)
            .execute(&ConfigFile::default())
            .unwrap_err();
        assert!(err.to_string().starts_with("Schema IR has 2 validation error(s)"));
    }
}
