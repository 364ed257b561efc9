pub mod render;
pub mod resolve;

pub use resolve::resolve;
