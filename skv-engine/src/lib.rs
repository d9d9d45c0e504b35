
pub mod clock;
pub mod engine;
pub mod expiry;
pub mod memory;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::Backend;
pub use expiry::is_stale;
pub use memory::MemoryBackend;
pub use store::{RecordStore, Storage};
