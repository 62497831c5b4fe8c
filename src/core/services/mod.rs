pub mod traits;

pub use traits::{PicklistSource, RateLookup, RecordSource, SolutionLookup};
