mod map;
pub use map::*;
mod typed;
pub use typed::TypedHeader;
