pub mod lookup;

pub use lookup::{LookupOutcome, LookupRequest, ResolveRecordUseCase, ReverseLookupUseCase};
