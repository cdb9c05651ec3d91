//! Normalized token and identity models handed back to the embedding framework.

pub mod identity;
pub mod token;

pub use identity::*;
pub use token::*;
