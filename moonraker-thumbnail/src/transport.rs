//! Blocking HTTP transport used by the locate and download steps

use std::io::Read;

use url::Url;

#[cfg(feature = "http")]
use crate::models::MoonrakerConfig;

/// Status code Moonraker answers with when a request succeeded
pub const HTTP_OK: u16 = 200;

/// Error type for transport operations
#[derive(Debug, Clone, PartialEq)]
pub enum TransportError {
    ClientError(String),
    RequestError(String),
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::ClientError(msg) => write!(f, "Client build failed: {}", msg),
            TransportError::RequestError(msg) => write!(f, "Request failed: {}", msg),
        }
    }
}

impl std::error::Error for TransportError {}

/// Status code plus the not yet consumed response body
pub struct TransportResponse {
    status: u16,
    body: Box<dyn Read + Send>,
}

impl TransportResponse {
    pub fn new(status: u16, body: Box<dyn Read + Send>) -> Self {
        Self { status, body }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status == HTTP_OK
    }

    /// Reads the remaining body as (lossy) UTF-8 text
    pub fn text(mut self) -> std::io::Result<String> {
        let mut bytes = Vec::new();
        self.body.read_to_end(&mut bytes)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn into_body(self) -> Box<dyn Read + Send> {
        self.body
    }
}

impl std::fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Capability to perform a blocking GET request.
///
/// Connection problems are returned as `TransportError`, never raised.
pub trait Transport {
    fn get(&self, url: &Url) -> Result<TransportResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &Url) -> Result<TransportResponse, TransportError> {
        (**self).get(url)
    }
}

/// `reqwest` blocking client configured from `MoonrakerConfig`
#[cfg(feature = "http")]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl ReqwestTransport {
    pub fn new(config: &MoonrakerConfig) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(concat!("MoonrakerThumbnail/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::ClientError(e.to_string()))?;

        Ok(Self { client })
    }
}

#[cfg(feature = "http")]
impl Transport for ReqwestTransport {
    fn get(&self, url: &Url) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .map_err(|e| TransportError::RequestError(e.to_string()))?;

        let status = response.status().as_u16();
        Ok(TransportResponse::new(status, Box::new(response)))
    }
}

#[cfg(all(test, feature = "http"))]
mod tests {
    use super::*;

    #[test]
    fn test_reqwest_transport_reads_status_and_body() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/server/files/gcodes/.thumbs/cube-32x32.png")
            .with_status(200)
            .with_body(vec![1u8, 2, 3, 4])
            .create();

        let transport = ReqwestTransport::new(&MoonrakerConfig::default()).unwrap();
        let url = Url::parse(&format!(
            "{}/server/files/gcodes/.thumbs/cube-32x32.png",
            server.url()
        ))
        .unwrap();

        let response = transport.get(&url).unwrap();
        assert!(response.is_success());

        let mut body = Vec::new();
        response.into_body().read_to_end(&mut body).unwrap();
        assert_eq!(body, vec![1, 2, 3, 4]);
        mock.assert();
    }

    #[test]
    fn test_reqwest_transport_passes_error_status_through() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/server/files/thumbnails")
            .with_status(404)
            .with_body("not found")
            .create();

        let transport = ReqwestTransport::new(&MoonrakerConfig::default()).unwrap();
        let url = Url::parse(&format!("{}/server/files/thumbnails", server.url())).unwrap();

        let response = transport.get(&url).unwrap();
        assert_eq!(response.status(), 404);
        assert!(!response.is_success());
        assert_eq!(response.text().unwrap(), "not found");
    }

    #[test]
    fn test_reqwest_transport_connection_refused_is_an_error() {
        let transport = ReqwestTransport::new(&MoonrakerConfig::default()).unwrap();
        // Port 1 is reserved and nothing listens there on test machines
        let url = Url::parse("http://127.0.0.1:1/server/files/thumbnails").unwrap();

        let result = transport.get(&url);
        assert!(matches!(result, Err(TransportError::RequestError(_))));
    }
}
