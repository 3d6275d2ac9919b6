pub mod cache;
pub mod forwarding;
pub mod listener;
pub mod server;
pub mod transport;
pub mod upstream;

pub use cache::{MemoryCache, RedisCache};
pub use listener::DnsListener;
pub use server::DnsServerHandler;
pub use upstream::UdpForwarder;
