pub mod duration;
pub mod parse;
