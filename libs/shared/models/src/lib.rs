pub mod auth;
pub mod error;
pub mod records;

pub use auth::*;
pub use error::*;
pub use records::*;
