mod canonical;
pub use canonical::*;
mod names;
pub use names::*;
