use std::future::Future;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Minimal async HTTP surface the API clients are written against.
///
/// Implementations own base-URL resolution; `path` is always
/// server-relative. Keeping this trait small is what lets tests swap in an
/// in-memory fake instead of a wire mock.
pub trait HttpClient: Send + Sync {
    fn get(&self, path: &str) -> impl Future<Output = Result<Vec<u8>, Error>> + Send;

    fn post(
        &self,
        path: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> impl Future<Output = Result<Vec<u8>, Error>> + Send;
}

/// [`HttpClient`] backed by `reqwest`, pointed at a single backend.
#[derive(Clone)]
pub struct RestClient {
    base: String,
    client: reqwest::Client,
}

impl RestClient {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }
}

impl HttpClient for RestClient {
    async fn get(&self, path: &str) -> Result<Vec<u8>, Error> {
        let response = self.client.get(self.url(path)).send().await?;
        let bytes = response.error_for_status()?.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn post(&self, path: &str, body: Vec<u8>, content_type: &str) -> Result<Vec<u8>, Error> {
        let response = self
            .client
            .post(self.url(path))
            .header("content-type", content_type)
            .body(body)
            .send()
            .await?;
        let bytes = response.error_for_status()?.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = RestClient::new("http://localhost:8000/");
        assert_eq!(client.url("/projects"), "http://localhost:8000/projects");
    }
}
