pub mod error;
pub mod header;
pub mod layout;
pub mod shape;

pub use error::*;
pub use header::*;
pub use layout::*;
pub use shape::*;
