mod traits;
pub use traits::*;

mod types;
pub use types::*;

mod url;
pub use url::*;

mod paginator;
pub use paginator::*;

#[cfg(test)]
mod types_tests;

#[cfg(test)]
mod url_tests;
