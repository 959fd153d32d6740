pub mod fact_record;
pub mod token;

pub use fact_record::FactRecord;
pub use token::NormalizedToken;
