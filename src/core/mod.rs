pub mod collect;
pub mod matcher;
pub mod retry;
pub mod submit;
pub mod synth;
pub mod validate;

pub use collect::{CollectSummary, Collected, collect};
pub use matcher::{MatchResult, Matcher, match_title};
pub use retry::RetryPolicy;
pub use submit::{BatchSubmitter, GroupOutcome, GroupStatus, Prepared, SubmissionReport};
pub use synth::synthesize;
pub use validate::{validate, validate_row};
