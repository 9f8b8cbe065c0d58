pub mod link;
pub mod report;

pub use link::DetailLink;
pub use report::{ItemOutcome, LinkCollection, PageOutcome, PageResult, RunReport};
