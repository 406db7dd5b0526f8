pub mod cinema;

pub use cinema::*;
