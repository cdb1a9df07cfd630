pub mod error;
pub mod ladder;
pub mod parse;
pub mod sector;
pub mod traits;
pub mod types;

pub use error::*;
pub use ladder::*;
pub use sector::*;
pub use traits::*;
pub use types::*;
