use super::{Formatter, ToSql};

/// A single identifier part, quoted when the platform asks for it.
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let quoted = f.serializer.platform.quote_identifier(self.0.as_ref());
        f.dst.push_str(&quoted);
    }
}
