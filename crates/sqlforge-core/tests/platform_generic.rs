use sqlforge_core::platform::{Generic, NativeIdMethod};
use sqlforge_core::schema::*;
use sqlforge_core::Platform;

#[test]
fn auto_increment_primary_key() {
    let field = Field::new("id", SqlType::Integer)
        .primary_key(true)
        .auto_increment(true);

    assert_eq!(Generic::new().field_ddl(&field), "id INTEGER NOT NULL IDENTITY");
}

#[test]
fn quoted_identifiers() {
    let mut platform = Generic::new();
    platform.set_identifier_quoting(true);

    let field = Field::new("order", SqlType::Integer).required(true);
    assert_eq!(platform.field_ddl(&field), "\"order\" INTEGER NOT NULL");
    assert_eq!(platform.quote_identifier("shop.book"), "\"shop\".\"book\"");

    platform.set_identifier_quoting(false);
    assert_eq!(platform.quote_identifier("shop.book"), "shop.book");
}

#[test]
fn text_default_is_quoted_and_escaped() {
    let field = Field::new("author", SqlType::Varchar)
        .size(100)
        .required(true)
        .default_value("O'Brien");

    assert_eq!(
        Generic::new().field_ddl(&field),
        "author VARCHAR(100) DEFAULT 'O''Brien' NOT NULL"
    );
}

#[test]
fn sizes_and_scales() {
    let platform = Generic::new();

    let varchar = Field::new("title", SqlType::Varchar);
    assert_eq!(platform.field_type_ddl(&varchar), "VARCHAR(255)");

    let decimal = Field::new("price", SqlType::Decimal).size(10).scale(2);
    assert_eq!(platform.field_type_ddl(&decimal), "DECIMAL(10,2)");

    let integer = Field::new("count", SqlType::Integer);
    assert_eq!(platform.field_type_ddl(&integer), "INTEGER");

    let flag = Field::new("flag", SqlType::BooleanChar);
    assert_eq!(platform.field_type_ddl(&flag), "CHAR(1)");
}

#[test]
fn sql_type_override_wins() {
    let field = Field::new("payload", SqlType::LongVarchar);
    let field = Field {
        sql_type: Some("JSON".into()),
        ..field
    };

    assert_eq!(Generic::new().field_ddl(&field), "payload JSON");
}

#[test]
fn boolean_and_enum_defaults() {
    let platform = Generic::new();

    let flag = Field::new("active", SqlType::Boolean).default_value("yes");
    assert_eq!(platform.field_ddl(&flag), "active BOOLEAN DEFAULT 1");

    let off = Field::new("archived", SqlType::BooleanInt).default_value("false");
    assert_eq!(platform.field_ddl(&off), "archived INTEGER DEFAULT 0");

    let status = Field::new("status", SqlType::Enum)
        .value_set(["draft", "published"])
        .default_value("published");
    assert_eq!(platform.field_ddl(&status), "status TINYINT DEFAULT 1");
}

#[test]
fn expression_default_is_raw() {
    let field = Field::new("created_at", SqlType::Timestamp).default_expr("CURRENT_TIMESTAMP");

    assert_eq!(
        Generic::new().field_ddl(&field),
        "created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP"
    );
}

#[test]
fn primary_key_ddl() {
    let mut entity = Entity::new("OrderLine");
    entity
        .add_field(Field::new("order_id", SqlType::Integer).primary_key(true))
        .unwrap();
    entity
        .add_field(Field::new("line_no", SqlType::Integer).primary_key(true))
        .unwrap();
    entity
        .add_field(Field::new("note", SqlType::Varchar))
        .unwrap();

    assert_eq!(
        Generic::new().primary_key_ddl(&entity),
        "PRIMARY KEY (order_id, line_no)"
    );
    assert_eq!(Generic::new().primary_key_ddl(&Entity::new("Empty")), "");
}

#[test]
fn ansi_capabilities() {
    let platform = Generic::new();

    assert_eq!(platform.database_type(), "sql");
    assert_eq!(platform.native_id_method(), NativeIdMethod::Identity);
    assert_eq!(platform.max_field_name_length(), 64);
    assert_eq!(platform.boolean_string(true), "1");
    assert_eq!(platform.quote("it's"), "'it''s'");
    assert!(platform.inline_foreign_keys());
    assert!(!platform.supports_schemas());
    assert_eq!(platform.field_list_ddl(&["a", "b"], ", "), "a, b");
}
