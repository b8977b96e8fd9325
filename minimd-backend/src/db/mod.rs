pub mod sqlite;
pub mod stamp;
pub mod tables;

pub use sqlite::Database;
pub use stamp::Stamper;
