pub mod clock;
pub mod memory;
pub mod purger;
pub mod redis;

pub use clock::{Clock, ManualClock, SystemClock};
pub use memory::MemoryCache;
pub use purger::CachePurger;
pub use redis::RedisCache;
