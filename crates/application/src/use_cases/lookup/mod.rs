mod outcome;
mod resolve_record;
mod reverse_lookup;

pub use outcome::LookupOutcome;
pub use resolve_record::{LookupRequest, ResolveRecordUseCase};
pub use reverse_lookup::ReverseLookupUseCase;
