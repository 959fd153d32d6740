pub mod cancel;
pub mod http_executor;

pub use cancel::CancelToken;
pub use http_executor::{HttpExecutor, HttpResponse};
