use crate::error::Result;
use reqwest::Client;

pub const USER_AGENT: &str = concat!("linkrot/", env!("CARGO_PKG_VERSION"));

/// HTTP client shared by the crawl and the link checks.
///
/// No request timeout is configured: a server that never answers keeps its
/// task waiting. Redirects follow reqwest's default policy.
pub fn build_client() -> Result<Client> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .pool_max_idle_per_host(50)
        .tcp_keepalive(std::time::Duration::from_secs(60))
        .build()?;
    Ok(client)
}
