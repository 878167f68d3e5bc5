use super::{Comma, Formatter, Ident, ToSql};

use crate::stmt;

/// Columns, primary key, and inline foreign keys of a `CREATE TABLE`.
struct Definitions<'a>(&'a stmt::CreateTable);

impl ToSql for Definitions<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let platform = f.serializer.platform;
        let entity = f.serializer.entity(self.0.table);

        let mut definitions: Vec<String> = entity
            .fields()
            .iter()
            .map(|field| platform.field_ddl(field))
            .collect();

        let pk = platform.primary_key_ddl(entity);
        if !pk.is_empty() {
            definitions.push(pk);
        }

        let mut s = "\n    ";
        for definition in definitions {
            fmt!(f, s definition);
            s = ",\n    ";
        }

        for foreign_key in &self.0.foreign_keys {
            fmt!(f, s foreign_key);
            s = ",\n    ";
        }

        fmt!(f, "\n");
    }
}

impl ToSql for &stmt::CreateTable {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let entity = f.serializer.entity(self.table);
        let name = f.serializer.table_name(self.table);
        let definitions = Definitions(self);

        let options = f.serializer.platform.table_options(entity);
        let options = (!options.is_empty()).then(|| (" ", options));

        fmt!(
            f, "CREATE TABLE " (&name) " (" definitions ")" options
        );
    }
}

impl ToSql for &stmt::CreateIndex {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let entity = f.serializer.entity(self.on);
        let index = &entity.indices()[self.index];
        let index_name = Ident(index.name(&entity.table_name()));
        let table_name = f.serializer.table_name(self.on);
        let unique = if index.unique { "UNIQUE " } else { "" };

        let sized = f.serializer.platform.supports_index_size();
        let columns = Comma(index.fields.iter().map(|field| {
            let size = field.size.filter(|_| sized).map(|size| format!("({size})"));
            (Ident(&field.name), size)
        }));

        fmt!(
            f, "CREATE " unique "INDEX " index_name " ON " (&table_name) " (" columns ")"
        );
    }
}

impl ToSql for &stmt::DropTable {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let name = f.serializer.table_name(self.table);
        let if_exists = if self.if_exists { "IF EXISTS " } else { "" };
        let cascade = if self.cascade { " CASCADE" } else { "" };

        fmt!(f, "DROP TABLE " if_exists (&name) cascade);
    }
}

impl ToSql for &stmt::AddForeignKey {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let table_name = f.serializer.table_name(self.foreign_key.table);
        let foreign_key = &self.foreign_key;

        fmt!(f, "ALTER TABLE " (&table_name) " ADD " foreign_key);
    }
}

impl ToSql for &stmt::Statement {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            stmt::Statement::AddForeignKey(stmt) => stmt.to_sql(f),
            stmt::Statement::CreateIndex(stmt) => stmt.to_sql(f),
            stmt::Statement::CreateTable(stmt) => stmt.to_sql(f),
            stmt::Statement::DropTable(stmt) => stmt.to_sql(f),
        }
    }
}
