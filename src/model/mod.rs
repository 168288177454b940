//! Model module - loading a pre-trained forest and scoring cleaned output

pub mod forest;
pub mod scoring;

pub use forest::*;
pub use scoring::*;
