use super::Database;
use crate::{Platform, Result};

use tracing::{debug, trace};

impl Database {
    /// Resolves the whole graph for `platform`.
    ///
    /// Binds every relation to its target entity, lets the platform
    /// normalize each entity, and fixes generated relation and index names.
    /// Fails on the first relation that cannot be resolved. Calling this
    /// again on a finalized database changes nothing.
    pub fn finalize_definition(&mut self, platform: &dyn Platform) -> Result<()> {
        debug!(
            database = %self.name,
            platform = platform.database_type(),
            entities = self.entities().len(),
            "finalizing schema"
        );

        self.bind_relations()
            .map_err(|err| err.context(crate::err!("finalizing database `{}`", self.name)))?;

        platform.finalize_definition(self)?;

        self.fix_names();
        self.set_finalized();

        Ok(())
    }

    fn bind_relations(&mut self) -> Result<()> {
        // Entities are mutated once every relation has been checked, so the
        // graph is never left half bound.
        let mut bindings = vec![];
        for relation in self.relations() {
            bindings.push((relation.id, relation.verify(self)?));
        }

        for (id, target) in bindings {
            let entity = &mut self.entities_mut()[id.entity.0];
            trace!(
                entity = %entity.name,
                relation = id.index,
                target = target.0,
                "binding relation target"
            );
            entity.relations_mut()[id.index].bind_target(target);
        }

        Ok(())
    }

    fn fix_names(&mut self) {
        let mut relation_names = vec![];
        for relation in self.relations() {
            if relation.stored_name().is_none() {
                relation_names.push((relation.id, relation.auto_name(self)));
            }
        }

        let mut index_names = vec![];
        for entity in self.entities() {
            let table = entity.table_name();
            for (position, index) in entity.indices().iter().enumerate() {
                if index.name.is_none() {
                    index_names.push((entity.id, position, index.auto_name(&table)));
                }
            }
        }

        for (id, name) in relation_names {
            debug!(relation = %name, "generated relation name");
            self.entities_mut()[id.entity.0].relations_mut()[id.index].fix_name(name);
        }

        for (entity, position, name) in index_names {
            debug!(index = %name, "generated index name");
            self.entities_mut()[entity.0].indices_mut()[position].name = Some(name);
        }
    }
}
