use std::fmt;

/// The closed vocabulary of abstract column types a schema may declare.
///
/// Platforms map each type onto a concrete SQL type through
/// [`Platform::domain_for_type`](crate::Platform::domain_for_type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    Bit,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Float,
    Real,
    Double,
    Numeric,
    Decimal,
    Char,
    Varchar,
    LongVarchar,
    Clob,
    Date,
    Time,
    Timestamp,
    Binary,
    Varbinary,
    LongVarbinary,
    Blob,
    Boolean,
    BooleanInt,
    BooleanChar,
    Enum,
    Object,
    Array,
}

impl SqlType {
    pub const ALL: &'static [SqlType] = &[
        SqlType::Bit,
        SqlType::TinyInt,
        SqlType::SmallInt,
        SqlType::Integer,
        SqlType::BigInt,
        SqlType::Float,
        SqlType::Real,
        SqlType::Double,
        SqlType::Numeric,
        SqlType::Decimal,
        SqlType::Char,
        SqlType::Varchar,
        SqlType::LongVarchar,
        SqlType::Clob,
        SqlType::Date,
        SqlType::Time,
        SqlType::Timestamp,
        SqlType::Binary,
        SqlType::Varbinary,
        SqlType::LongVarbinary,
        SqlType::Blob,
        SqlType::Boolean,
        SqlType::BooleanInt,
        SqlType::BooleanChar,
        SqlType::Enum,
        SqlType::Object,
        SqlType::Array,
    ];

    /// The upper-case name used in schema documents.
    pub fn as_str(self) -> &'static str {
        match self {
            SqlType::Bit => "BIT",
            SqlType::TinyInt => "TINYINT",
            SqlType::SmallInt => "SMALLINT",
            SqlType::Integer => "INTEGER",
            SqlType::BigInt => "BIGINT",
            SqlType::Float => "FLOAT",
            SqlType::Real => "REAL",
            SqlType::Double => "DOUBLE",
            SqlType::Numeric => "NUMERIC",
            SqlType::Decimal => "DECIMAL",
            SqlType::Char => "CHAR",
            SqlType::Varchar => "VARCHAR",
            SqlType::LongVarchar => "LONGVARCHAR",
            SqlType::Clob => "CLOB",
            SqlType::Date => "DATE",
            SqlType::Time => "TIME",
            SqlType::Timestamp => "TIMESTAMP",
            SqlType::Binary => "BINARY",
            SqlType::Varbinary => "VARBINARY",
            SqlType::LongVarbinary => "LONGVARBINARY",
            SqlType::Blob => "BLOB",
            SqlType::Boolean => "BOOLEAN",
            SqlType::BooleanInt => "BOOLEANINT",
            SqlType::BooleanChar => "BOOLEANCHAR",
            SqlType::Enum => "ENUM",
            SqlType::Object => "OBJECT",
            SqlType::Array => "ARRAY",
        }
    }

    /// Case-insensitive lookup by schema name.
    pub fn from_name(name: &str) -> Option<SqlType> {
        SqlType::ALL
            .iter()
            .copied()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(name))
    }

    /// Types whose literal values are written quoted. Temporal types count
    /// as text here.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            SqlType::Char
                | SqlType::Varchar
                | SqlType::LongVarchar
                | SqlType::Clob
                | SqlType::Date
                | SqlType::Time
                | SqlType::Timestamp
        )
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            SqlType::TinyInt
                | SqlType::SmallInt
                | SqlType::Integer
                | SqlType::BigInt
                | SqlType::Float
                | SqlType::Real
                | SqlType::Double
                | SqlType::Numeric
                | SqlType::Decimal
        )
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            SqlType::TinyInt | SqlType::SmallInt | SqlType::Integer | SqlType::BigInt
        )
    }

    pub fn is_temporal(self) -> bool {
        matches!(self, SqlType::Date | SqlType::Time | SqlType::Timestamp)
    }

    pub fn is_lob(self) -> bool {
        matches!(
            self,
            SqlType::LongVarchar | SqlType::Clob | SqlType::LongVarbinary | SqlType::Blob
        )
    }

    pub fn is_boolean(self) -> bool {
        matches!(
            self,
            SqlType::Boolean | SqlType::BooleanInt | SqlType::BooleanChar
        )
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
