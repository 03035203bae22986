use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::Cursor;

use url::Url;

use crate::transport::{Transport, TransportError, TransportResponse};

/// In-memory transport that replays queued responses and records every
/// requested URL.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: RefCell<VecDeque<Result<(u16, Vec<u8>), TransportError>>>,
    requests: RefCell<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Ok((status, body.into())));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Err(TransportError::RequestError(message.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, url: &Url) -> Result<TransportResponse, TransportError> {
        self.requests.borrow_mut().push(url.to_string());
        let (status, body) = self
            .responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::RequestError("no scripted response".into())))?;
        Ok(TransportResponse::new(status, Box::new(Cursor::new(body))))
    }
}

/// Metadata body in the shape Moonraker returns
pub fn thumbnails_body(candidates: &[(u32, u32, u32, &str)]) -> String {
    let result: Vec<serde_json::Value> = candidates
        .iter()
        .map(|(width, height, size, path)| {
            serde_json::json!({
                "width": width,
                "height": height,
                "size": size,
                "thumbnail_path": path,
            })
        })
        .collect();
    serde_json::json!({ "result": result }).to_string()
}
