use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes prepared requests. Wrap or replace it to change transport
/// behaviour (timeouts, headers, recording) without touching the API client.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
