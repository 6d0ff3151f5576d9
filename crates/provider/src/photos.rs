use async_trait::async_trait;
use guessr_core::sources::{ImageSource, SourceError};

use crate::ProviderError;

/// Downloads player photos over plain HTTP GET.
pub struct HttpImageSource {
    client: reqwest::Client,
}

impl HttpImageSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::HttpStatus(status.as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl ImageSource for HttpImageSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        Ok(self.download(url).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;

    use super::*;

    async fn spawn_photo_server() -> String {
        let app = Router::new()
            .route("/ok.png", get(|| async { vec![0x89u8, b'P', b'N', b'G'] }))
            .route("/gone.png", get(|| async { StatusCode::NOT_FOUND }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn source() -> HttpImageSource {
        HttpImageSource::new(crate::build_client(Duration::from_secs(5)).unwrap())
    }

    #[tokio::test]
    async fn returns_body_bytes() {
        let base = spawn_photo_server().await;
        let bytes = source().fetch(&format!("{base}/ok.png")).await.unwrap();
        assert_eq!(bytes, vec![0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn not_found_is_a_status_error() {
        let base = spawn_photo_server().await;
        let err = source().fetch(&format!("{base}/gone.png")).await.unwrap_err();
        assert!(matches!(err, SourceError::HttpStatus(404)));
    }

    #[tokio::test]
    async fn invalid_url_is_a_request_error() {
        let err = source().fetch("not a url").await.unwrap_err();
        assert!(matches!(err, SourceError::Request(_)));
    }
}
