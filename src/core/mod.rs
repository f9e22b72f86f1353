pub mod failure;
pub mod greeting;
pub mod output;
pub mod script;

pub use crate::utils::error::Result;
