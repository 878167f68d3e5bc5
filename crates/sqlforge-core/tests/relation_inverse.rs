use sqlforge_core::platform::Generic;
use sqlforge_core::schema::*;

fn make_entity(db: &mut Database, name: &str, fields: Vec<Field>) -> EntityId {
    let mut entity = Entity::new(name);
    for field in fields {
        entity.add_field(field).unwrap();
    }
    db.add_entity(entity).unwrap()
}

/// `User` with a `UserFriend` junction whose two relations both target
/// `User.id`.
fn make_friends_db() -> (Database, EntityId, RelationId, RelationId) {
    let mut db = Database::new("social");
    let user = make_entity(
        &mut db,
        "User",
        vec![
            Field::new("id", SqlType::Integer)
                .primary_key(true)
                .auto_increment(true),
            Field::new("name", SqlType::Varchar).size(100),
        ],
    );

    let junction = make_entity(
        &mut db,
        "UserFriend",
        vec![
            Field::new("user_id", SqlType::Integer).primary_key(true),
            Field::new("friend_id", SqlType::Integer).primary_key(true),
        ],
    );
    db.entity_mut(junction).is_cross_ref = true;

    let who = db
        .entity_mut(junction)
        .add_relation(Relation::new("User").named("who").reference(("user_id", "id")));
    let friend = db.entity_mut(junction).add_relation(
        Relation::new("User")
            .named("friend")
            .reference(("friend_id", "id")),
    );

    (db, user, who, friend)
}

/// `Person.passport_number -> Passport.number` and
/// `Passport.number -> Person.passport_number`.
fn make_passport_db(person_first: bool) -> (Database, RelationId, RelationId) {
    let mut db = Database::new("registry");

    let person_fields = || {
        vec![
            Field::new("id", SqlType::Integer).primary_key(true),
            Field::new("passport_number", SqlType::Varchar).size(20),
        ]
    };
    let passport_fields = || vec![Field::new("number", SqlType::Varchar).size(20).primary_key(true)];

    let (person, passport) = if person_first {
        let person = make_entity(&mut db, "Person", person_fields());
        let passport = make_entity(&mut db, "Passport", passport_fields());
        (person, passport)
    } else {
        let passport = make_entity(&mut db, "Passport", passport_fields());
        let person = make_entity(&mut db, "Person", person_fields());
        (person, passport)
    };

    let (a, b) = if person_first {
        let a = db
            .entity_mut(person)
            .add_relation(Relation::new("Passport").reference(("passport_number", "number")));
        let b = db
            .entity_mut(passport)
            .add_relation(Relation::new("Person").reference(("number", "passport_number")));
        (a, b)
    } else {
        let b = db
            .entity_mut(passport)
            .add_relation(Relation::new("Person").reference(("number", "passport_number")));
        let a = db
            .entity_mut(person)
            .add_relation(Relation::new("Passport").reference(("passport_number", "number")));
        (a, b)
    };

    (db, a, b)
}

#[test]
fn junction_relations_are_not_inverses() {
    let (db, _, who, friend) = make_friends_db();

    assert!(db.relation(who).inverse_fk(&db).is_none());
    assert!(db.relation(friend).inverse_fk(&db).is_none());
    assert!(db.relation(who).is_foreign_primary_key(&db));
    assert!(db.relation(friend).is_foreign_primary_key(&db));
}

#[test]
fn junction_relations_see_each_other_as_other_fks() {
    let (db, _, who, friend) = make_friends_db();

    let others: Vec<_> = db.relation(who).other_fks(&db).iter().map(|r| r.id).collect();
    assert_eq!(others, [friend]);
}

#[test]
fn cross_relations_are_reported_on_the_target() {
    let (db, user, who, friend) = make_friends_db();

    let cross = db.entity(user).cross_relations(&db);
    assert_eq!(cross.len(), 2);

    assert_eq!(cross[0].incoming.id, who);
    assert_eq!(cross[0].outgoing.len(), 1);
    assert_eq!(cross[0].outgoing[0].id, friend);

    assert_eq!(cross[1].incoming.id, friend);
    assert_eq!(cross[1].outgoing[0].id, who);
}

#[test]
fn inverse_found_in_either_declaration_order() {
    for person_first in [true, false] {
        let (db, a, b) = make_passport_db(person_first);

        let inverse_of_a = db.relation(a).inverse_fk(&db).map(|r| r.id);
        let inverse_of_b = db.relation(b).inverse_fk(&db).map(|r| r.id);

        assert_eq!(inverse_of_a, Some(b), "person_first = {person_first}");
        assert_eq!(inverse_of_b, Some(a), "person_first = {person_first}");
    }
}

#[test]
fn inverse_match_ignores_reference_order() {
    let mut db = Database::new("shop");
    let fields = || {
        vec![
            Field::new("a", SqlType::Integer),
            Field::new("b", SqlType::Integer),
            Field::new("x", SqlType::Integer),
            Field::new("y", SqlType::Integer),
        ]
    };
    let left = make_entity(&mut db, "Left", fields());
    let right = make_entity(&mut db, "Right", fields());

    let forward = db.entity_mut(left).add_relation(
        Relation::new("Right")
            .reference(("a", "x"))
            .reference(("b", "y")),
    );
    let backward = db.entity_mut(right).add_relation(
        Relation::new("Left")
            .reference(("y", "b"))
            .reference(("x", "a")),
    );

    assert_eq!(db.relation(forward).inverse_fk(&db).map(|r| r.id), Some(backward));
}

#[test]
fn self_reference_is_not_its_own_inverse() {
    let mut db = Database::new("org");
    let employee = make_entity(
        &mut db,
        "Employee",
        vec![
            Field::new("id", SqlType::Integer).primary_key(true),
            Field::new("manager_id", SqlType::Integer),
        ],
    );
    let manager = db
        .entity_mut(employee)
        .add_relation(Relation::new("Employee").reference(("manager_id", "id")));

    assert!(db.relation(manager).inverse_fk(&db).is_none());
    assert_eq!(db.relation(manager).multiplicity(&db), Multiplicity::ManyToOne);
}

#[test]
fn inverse_pair_is_one_to_one() {
    let (db, a, b) = make_passport_db(true);

    assert_eq!(db.relation(a).multiplicity(&db), Multiplicity::OneToOne);
    assert_eq!(db.relation(b).multiplicity(&db), Multiplicity::OneToOne);
}

#[test]
fn finalization_adds_unique_index_for_inverse_pair() {
    let (mut db, a, _) = make_passport_db(true);
    let person = a.entity;

    db.finalize_definition(&Generic::new()).unwrap();
    db.finalize_definition(&Generic::new()).unwrap();

    let indices = db.entity(person).indices();
    assert_eq!(indices.len(), 1);
    assert!(indices[0].unique);
    assert_eq!(indices[0].field_names().collect::<Vec<_>>(), ["passport_number"]);

    // `Passport.number` is already its primary key.
    let passport = db.entity_by_name("Passport").unwrap();
    assert!(passport.indices().is_empty());
}
