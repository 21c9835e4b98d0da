//! Output generators for merged documentation trees.

pub mod markdown;

#[cfg(feature = "json")]
pub mod json;
