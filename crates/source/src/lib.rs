pub mod client;
pub mod protocol;

pub use client::FeedClient;
pub use protocol::{parse_row, SourceEvent, Subscribe};
