#[allow(dead_code)] // Backend for tests and embedding hosts; the daemon runs on sqlite.
mod memory;
mod sqlite;

pub use memory::MemoryStateStore;
pub use sqlite::SqliteStateStore;
