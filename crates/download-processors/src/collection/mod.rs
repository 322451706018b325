mod types;
pub use types::*;

mod processor;
pub use processor::*;
