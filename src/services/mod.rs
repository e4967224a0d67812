pub mod mailer;
pub mod result_extractor;
pub mod search_client;

pub use mailer::*;
pub use result_extractor::*;
pub use search_client::*;
