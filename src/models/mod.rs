pub mod loaders;
pub mod outcome;
pub mod query;

pub use loaders::{load_query_file, parse_query_file, QueryFile};
pub use outcome::Outcome;
pub use query::{BatchRequest, BatchResult, QuerySpec};
