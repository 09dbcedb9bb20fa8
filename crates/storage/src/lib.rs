pub mod error;
pub mod keys;
pub mod memory;
pub mod schema;
pub mod sqlite;
pub mod store;
pub mod traits;

pub use error::StorageError;
pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;
pub use store::Store;
pub use traits::*;
