pub mod fact_flow;
pub mod number_ctx;

pub use fact_flow::{FactFlow, FlowResult};
pub use number_ctx::NumberCtx;
