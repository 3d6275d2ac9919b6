pub mod address_cache;
pub mod upstream_resolver;

pub use address_cache::{AddressCache, CACHE_TTL};
pub use upstream_resolver::{UpstreamAnswer, UpstreamResolver};
