//! Builds and renders the DDL script of a finalized database.

use crate::{
    stmt::{DropTable, ForeignKeyDef},
    Config, Serializer, Statement,
};

use sqlforge_core::{
    schema::{Database, Relation},
    Platform, Result,
};
use tracing::{debug, warn};

/// The statements creating every table of `db`.
///
/// Tables come in declaration order, each followed by its indices. Dropped
/// tables (see [`Config::drop_tables`]) come first, in reverse order. Foreign
/// keys are declared inside `CREATE TABLE` or added at the end, as the
/// platform prefers. Entities and relations marked `skipSql` are left out,
/// and so are relations targeting such entities.
pub fn statements(db: &Database, platform: &dyn Platform, config: &Config) -> Result<Vec<Statement>> {
    if !db.is_finalized() {
        warn!(database = %db.name, "generating DDL for a database that was not finalized");
    }

    let entities: Vec<_> = db.entities().filter(|entity| !entity.skip_sql).collect();
    let mut stmts: Vec<Statement> = vec![];

    if config.drop_tables {
        for entity in entities.iter().rev() {
            stmts.push(
                DropTable {
                    table: entity.id,
                    if_exists: true,
                    cascade: platform.supports_drop_cascade(),
                }
                .into(),
            );
        }
    }

    let mut deferred = vec![];
    for entity in &entities {
        let mut inline = vec![];
        for relation in entity.relations() {
            if !emits_foreign_key(db, relation)? {
                continue;
            }

            let foreign_key = ForeignKeyDef::from_relation(db, relation)?;
            if platform.inline_foreign_keys() {
                inline.push(foreign_key);
            } else {
                deferred.push(foreign_key);
            }
        }

        stmts.push(Statement::create_table(entity.id, inline));
        for position in 0..entity.indices().len() {
            stmts.push(Statement::create_index(entity.id, position));
        }
    }

    stmts.extend(deferred.into_iter().map(Statement::add_foreign_key));

    debug!(
        database = %db.name,
        platform = platform.database_type(),
        statements = stmts.len(),
        "built DDL statements"
    );

    Ok(stmts)
}

fn emits_foreign_key(db: &Database, relation: &Relation) -> Result<bool> {
    Ok(!relation.skip_sql && !relation.target(db)?.skip_sql)
}

/// Serializes `statements`, one per paragraph, between the platform's
/// begin and end fragments.
pub fn render(db: &Database, platform: &dyn Platform, statements: &[Statement]) -> String {
    let serializer = Serializer::new(db, platform);

    let mut parts = vec![];

    let begin = platform.begin_ddl();
    if !begin.is_empty() {
        parts.push(begin);
    }

    parts.extend(statements.iter().map(|stmt| serializer.serialize(stmt)));

    let end = platform.end_ddl();
    if !end.is_empty() {
        parts.push(end);
    }

    let mut script = parts.join("\n\n");
    script.push('\n');
    script
}

/// [`statements`] followed by [`render`].
pub fn generate(db: &Database, platform: &dyn Platform, config: &Config) -> Result<String> {
    let stmts = statements(db, platform, config)?;
    Ok(render(db, platform, &stmts))
}
