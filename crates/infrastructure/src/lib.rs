//! Splitzone DNS Infrastructure Layer
pub mod dns;
