//! Data model for engine results and loader output.

mod node;
mod record;

pub use node::ResultNode;
pub use record::{OutputFormat, Record, RecordMetadata};
