//! Downsampling and encoding algorithm implementations.

mod block_average;
mod difference;

pub use block_average::BlockAverager;
pub use difference::encode;
