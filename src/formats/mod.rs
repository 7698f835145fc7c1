//! Format implementations
//!
//!     - yaml: the authoring format for grammars (parse and serialize)
//!     - json: the format editors load (serialize and parse)

pub mod json;
pub mod yaml;

pub use json::JsonFormat;
pub use yaml::YamlFormat;
