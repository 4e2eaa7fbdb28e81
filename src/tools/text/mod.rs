//! Text and data utilities.

pub mod case;
pub mod codes;
pub mod diff;
pub mod email;
pub mod hash;
pub mod json;
pub mod markdown;
pub mod minify;
pub mod password;
pub mod slug;
pub mod words;
