pub mod cache;
pub mod checker;
pub mod crawler;
pub mod error;
pub mod http;
pub mod links;
mod queue;
pub mod result;

pub use cache::LinkCache;
pub use checker::{CheckRun, Checker, ResultStream};
pub use crawler::{Crawler, LinkStream, ProgressCallback};
pub use error::ScanError;
pub use http::build_client;
pub use links::{LinkKind, PageLinks, classify_href, extract_links};
pub use result::{CheckOutcome, CheckResult, ExternalLink};
