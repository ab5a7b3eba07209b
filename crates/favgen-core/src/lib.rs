pub mod config;
pub mod logging;

// Generation pipeline: options -> request -> transport -> response -> package
pub mod generator;
pub mod options;
pub mod package;
pub mod request;
pub mod response;
pub mod transport;

pub use generator::{FaviconGenerator, GenerateError, GeneratorConfig};
pub use options::{GenerationOptions, ValidationError};
pub use package::{FetchError, PackageFetcher};
pub use request::FaviconRequest;
pub use response::{FaviconResult, ResponseError};
