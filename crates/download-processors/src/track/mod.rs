mod traits;
pub use traits::*;

mod types;
pub use types::*;

mod ranker;
pub use ranker::*;

mod processor;
pub use processor::*;
