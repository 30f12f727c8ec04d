mod params;
mod parser;

pub use params::ParameterMap;
pub use parser::QueryStringParser;
