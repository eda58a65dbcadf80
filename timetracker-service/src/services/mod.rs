pub mod database;
pub mod identity;
pub mod memory;
pub mod metrics;
pub mod store;

pub use database::MongoStore;
pub use identity::{Clock, IdGenerator, SystemClock, UuidGenerator};
pub use memory::MemoryStore;
pub use metrics::{get_metrics, init_metrics};
pub use store::Store;
