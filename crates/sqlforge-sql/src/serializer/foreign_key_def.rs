use super::{Comma, Formatter, Ident, ToSql};

use crate::stmt;

impl ToSql for &stmt::ForeignKeyDef {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let name = Ident(&self.name);
        let columns = Comma(self.columns.iter().map(Ident));
        let references = f.serializer.table_name(self.references);
        let referenced_columns = Comma(self.referenced_columns.iter().map(Ident));

        let on_update = (!self.on_update.is_none()).then(|| (" ON UPDATE ", self.on_update.as_sql()));
        let on_delete = (!self.on_delete.is_none()).then(|| (" ON DELETE ", self.on_delete.as_sql()));

        fmt!(
            f, "CONSTRAINT " name " FOREIGN KEY (" columns ") REFERENCES " (&references) " (" referenced_columns ")" on_update on_delete
        );
    }
}
