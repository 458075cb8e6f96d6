pub mod records;

pub use records::{AllocationRecord, OhlcvRecord, SentimentRecord};
