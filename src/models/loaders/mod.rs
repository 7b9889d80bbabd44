pub mod toml_loader;

pub use toml_loader::{load_query_file, parse_query_file, QueryFile};
