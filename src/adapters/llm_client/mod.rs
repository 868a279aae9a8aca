pub mod http;
pub mod retrying;

pub use self::http::HttpLlmClient;
pub use self::retrying::{RetryPolicy, RetryingLlmClient};
