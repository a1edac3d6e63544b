// Data source abstraction: JSON over HTTP GET, plus decorators.

pub mod counting_source;
pub mod http_source;
pub mod traits;
