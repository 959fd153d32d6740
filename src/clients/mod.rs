pub mod fact_source;
pub mod numbers_client;

pub use fact_source::FactSource;
pub use numbers_client::NumbersClient;
