mod database;
pub use database::Database;

mod entity;
pub use entity::{CrossRelation, Entity, EntityId, IdMethod};

mod field;
pub use field::{Field, FieldDefault};

mod finalize;

mod index;
pub use index::{Index, IndexField};

pub(crate) mod name;

mod relation;
pub use relation::{Multiplicity, Reference, ReferentialAction, Relation, RelationId};

mod ty;
pub use ty::SqlType;

mod vendor;
pub use vendor::{Vendor, VendorInfos};
