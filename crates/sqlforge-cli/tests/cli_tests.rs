//! End-to-end tests of the `sqlforge` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const BOOKSTORE: &str = r#"{
    "name": "bookstore",
    "entities": [
        {
            "name": "author",
            "fields": [
                { "name": "id", "type": "INTEGER", "primaryKey": true, "autoIncrement": true },
                { "name": "name", "size": 128, "required": true }
            ]
        },
        {
            "name": "book",
            "fields": [
                { "name": "id", "type": "INTEGER", "primaryKey": true, "autoIncrement": true },
                { "name": "order", "type": "INTEGER" },
                { "name": "author_id", "type": "INTEGER", "required": true }
            ],
            "relations": [
                { "target": "author", "references": [ { "local": "author_id", "foreign": "id" } ] }
            ]
        }
    ]
}"#;

fn cmd() -> Command {
    Command::cargo_bin("sqlforge").unwrap()
}

fn write_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn help_lists_flags() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--platform"))
        .stdout(predicate::str::contains("--no-quote"))
        .stdout(predicate::str::contains("--drop"))
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("[default: mysql]"));
}

#[test]
fn missing_schema_argument_is_a_usage_error() {
    cmd().assert().failure().code(2);
}

#[test]
fn mysql_is_the_default_platform() {
    let schema = write_file(BOOKSTORE);

    cmd()
        .arg(schema.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("SET FOREIGN_KEY_CHECKS = 0;"))
        .stdout(predicate::str::contains("CREATE TABLE book ("))
        .stdout(predicate::str::contains("    id INTEGER NOT NULL AUTO_INCREMENT,"))
        .stdout(predicate::str::contains(
            "CONSTRAINT book_fk_82ae3e FOREIGN KEY (author_id) REFERENCES author (id)",
        ))
        .stdout(predicate::str::contains(") ENGINE=InnoDB;"));
}

#[test]
fn postgresql_with_drop() {
    let schema = write_file(BOOKSTORE);

    cmd()
        .args(["--platform", "pgsql", "--drop"])
        .arg(schema.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("BEGIN;\n\nDROP TABLE IF EXISTS book CASCADE;"))
        .stdout(predicate::str::contains("id SERIAL NOT NULL"))
        .stdout(predicate::str::contains("ALTER TABLE book ADD CONSTRAINT book_fk_82ae3e"))
        .stdout(predicate::str::ends_with("COMMIT;\n"));
}

#[test]
fn quote_flag_quotes_identifiers() {
    let schema = write_file(BOOKSTORE);

    cmd()
        .args(["--platform", "sqlite", "--quote"])
        .arg(schema.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE TABLE \"book\" ("))
        .stdout(predicate::str::contains("\"order\" INTEGER"));
}

#[test]
fn no_quote_wins_over_config_file() {
    let schema = write_file(BOOKSTORE);
    let config = write_file(r#"{ "identifier_quoting": true, "mysql_engine": "MyISAM" }"#);

    cmd()
        .arg("--config")
        .arg(config.path())
        .arg("--no-quote")
        .arg(schema.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE TABLE book ("))
        .stdout(predicate::str::contains(") ENGINE=MyISAM;"));
}

#[test]
fn config_file_enables_drop() {
    let schema = write_file(BOOKSTORE);
    let config = write_file(r#"{ "drop_tables": true }"#);

    cmd()
        .arg("--config")
        .arg(config.path())
        .arg(schema.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("DROP TABLE IF EXISTS book;"));
}

#[test]
fn unknown_platform_fails() {
    let schema = write_file(BOOKSTORE);

    cmd()
        .args(["--platform", "oracle"])
        .arg(schema.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unsupported feature: platform `oracle`"));
}

#[test]
fn missing_schema_file_fails() {
    cmd()
        .arg("does/not/exist.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading schema `does/not/exist.json`"));
}

#[test]
fn malformed_schema_reports_path() {
    let schema = write_file(r#"{ "name": "shop", "entities": [ { "name": "Book", "fields": [ { "name": "id", "type": "JSONB" } ] } ] }"#);

    cmd()
        .arg(schema.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading schema"))
        .stderr(predicate::str::contains("$.entities[0].fields[0].type"))
        .stderr(predicate::str::contains("unsupported field type `JSONB`"));
}

#[test]
fn unresolved_relation_fails_finalization() {
    let schema = write_file(
        r#"{
            "name": "shop",
            "entities": [ {
                "name": "Book",
                "fields": [ { "name": "publisher_id", "type": "INTEGER" } ],
                "relations": [ { "target": "Publisher", "references": [ { "local": "publisher_id", "foreign": "id" } ] } ]
            } ]
        }"#,
    );

    cmd()
        .arg(schema.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("finalizing database `shop`"))
        .stderr(predicate::str::contains("target entity `Publisher`"));
}
