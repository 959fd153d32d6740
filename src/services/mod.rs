pub mod fact_fetcher;
pub mod input_normalizer;
pub mod result_writer;

pub use fact_fetcher::FactFetcher;
pub use input_normalizer::{condense, expand, normalize, InputNormalizer, ParsedInput};
pub use result_writer::ResultWriter;
