use sqlforge_core::schema::*;

fn make_pk(name: &str) -> Field {
    Field::new(name, SqlType::Integer)
        .primary_key(true)
        .auto_increment(true)
}

fn make_entity(db: &mut Database, name: &str, fields: Vec<Field>) -> EntityId {
    let mut entity = Entity::new(name);
    for field in fields {
        entity.add_field(field).unwrap();
    }
    db.add_entity(entity).unwrap()
}

/// `Profile.user_id -> Account.id`
fn make_profile_db(target_schema: Option<&str>) -> (Database, RelationId) {
    let mut db = Database::new("bank");
    let account = make_entity(&mut db, "Account", vec![make_pk("id")]);
    db.entity_mut(account).schema = target_schema.map(String::from);

    let profile = make_entity(
        &mut db,
        "Profile",
        vec![make_pk("id"), Field::new("user_id", SqlType::Integer)],
    );
    let relation = db
        .entity_mut(profile)
        .add_relation(Relation::new("Account").reference(("user_id", "id")));

    (db, relation)
}

#[test]
fn generated_name_is_stable_across_reads() {
    let (db, id) = make_profile_db(None);
    let relation = db.relation(id);

    let first = relation.name(&db).into_owned();
    let second = relation.name(&db).into_owned();

    assert_eq!(first, "profile_fk_6f4f03");
    assert_eq!(first, second);
    assert!(relation.is_auto_named());
    assert!(!relation.has_name());
}

#[test]
fn identical_inputs_give_identical_names() {
    let (db_a, a) = make_profile_db(None);
    let (db_b, b) = make_profile_db(None);

    assert_eq!(db_a.relation(a).name(&db_a), db_b.relation(b).name(&db_b));
}

#[test]
fn qualified_target_table_is_hashed() {
    let (db, id) = make_profile_db(Some("shop"));
    assert_eq!(db.relation(id).name(&db), "profile_fk_ec1011");
}

#[test]
fn unresolved_target_is_left_out_of_the_hash() {
    let mut db = Database::new("bank");
    let profile = make_entity(
        &mut db,
        "Profile",
        vec![make_pk("id"), Field::new("user_id", SqlType::Integer)],
    );
    let id = db
        .entity_mut(profile)
        .add_relation(Relation::new("Account").reference(("user_id", "id")));

    assert_eq!(db.relation(id).name(&db), "profile_fk_9afd8d");
}

#[test]
fn name_read_before_target_exists_changes_until_finalized() {
    let mut db = Database::new("bank");
    let profile = make_entity(
        &mut db,
        "Profile",
        vec![make_pk("id"), Field::new("user_id", SqlType::Integer)],
    );
    let id = db
        .entity_mut(profile)
        .add_relation(Relation::new("Account").reference(("user_id", "id")));

    assert_eq!(db.relation(id).name(&db), "profile_fk_9afd8d");

    make_entity(&mut db, "Account", vec![make_pk("id")]);
    assert_eq!(db.relation(id).name(&db), "profile_fk_6f4f03");

    db.finalize_definition(&sqlforge_core::platform::Generic::new())
        .unwrap();
    assert_eq!(db.relation(id).stored_name(), Some("profile_fk_6f4f03"));
}

#[test]
fn unattached_relation_has_no_owner_prefix() {
    let (db, _) = make_profile_db(None);
    let relation = Relation::new("Account").reference(("user_id", "id"));

    assert_eq!(relation.name(&db), "fk_6f4f03");
}

#[test]
fn composite_references_are_comma_joined() {
    let mut db = Database::new("bank");
    make_entity(
        &mut db,
        "Account",
        vec![
            Field::new("x", SqlType::Integer).primary_key(true),
            Field::new("y", SqlType::Integer).primary_key(true),
        ],
    );
    let profile = make_entity(
        &mut db,
        "Profile",
        vec![
            Field::new("a", SqlType::Integer),
            Field::new("b", SqlType::Integer),
        ],
    );
    let id = db.entity_mut(profile).add_relation(
        Relation::new("Account")
            .reference(("a", "x"))
            .reference(("b", "y")),
    );

    assert_eq!(db.relation(id).name(&db), "profile_fk_c7b46a");
}

#[test]
fn explicit_name_wins_until_cleared() {
    let (db, id) = make_profile_db(None);
    let mut relation = db.relation(id).clone();

    relation.set_name("profile_owner");
    assert!(relation.has_name());
    assert_eq!(relation.name(&db), "profile_owner");
    assert_eq!(relation.field(), Some("profile_owner"));

    relation.set_name("");
    assert!(!relation.has_name());
    assert_eq!(relation.name(&db), "profile_fk_6f4f03");
}

#[test]
fn finalization_fixes_generated_name() {
    let (mut db, id) = make_profile_db(None);
    assert_eq!(db.relation(id).stored_name(), None);

    db.finalize_definition(&sqlforge_core::platform::Generic::new())
        .unwrap();

    assert_eq!(db.relation(id).stored_name(), Some("profile_fk_6f4f03"));
    assert!(db.relation(id).is_auto_named());
}

#[test]
fn changing_references_resets_a_fixed_name() {
    let (mut db, id) = make_profile_db(None);
    db.finalize_definition(&sqlforge_core::platform::Generic::new())
        .unwrap();

    let mut relation = db.relation(id).clone();
    relation.clear_references();
    relation.add_reference(("user_id", "id"));

    assert_eq!(relation.stored_name(), None);
    assert_eq!(relation.name(&db), "profile_fk_6f4f03");
}
