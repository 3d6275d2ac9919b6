pub mod builders;
pub mod dns_server_mock;

#[allow(unused_imports)]
pub use builders::{build_query, build_query_for, first_a, resolver_stack, single_zone, TestServer};
#[allow(unused_imports)]
pub use dns_server_mock::{MockDnsServer, MockReply};
