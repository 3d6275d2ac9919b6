pub mod dns;

pub use dns::{AnswerSource, DropReason, HandleDnsQueryUseCase, QueryOutcome};
