pub mod axis;
mod document;
pub mod hierarchy;
pub mod io;
pub mod joint;
pub mod motion;
pub mod names;
mod summary;
pub mod transform;

pub use document::*;
pub use summary::*;
