mod config;
pub use config::Config;

pub mod ddl;

pub mod platform;
pub use platform::{platform, Mysql, Postgresql, Sqlite};

pub mod serializer;
pub use serializer::Serializer;

pub mod stmt;
pub use stmt::Statement;
