// Embedding entry points.

pub mod simple;

pub use simple::init_tracing;
