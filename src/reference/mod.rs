pub mod catalog;
pub mod sites;

pub use catalog::*;
pub use sites::*;
