use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::sync::Mutex;

use crate::{
    error::{Error, Result},
    options::FetchOptions,
    request::RequestContext,
    transport::Transport,
};

/// Records every dispatch and answers with a canned asset named after the
/// last path segment, or with a fixed api error.
#[derive(Default)]
pub(crate) struct RecordingTransport {
    sent: Mutex<Vec<(RequestContext, FetchOptions)>>,
    failure: Option<(String, i64)>,
}

impl RecordingTransport {
    pub(crate) fn failing(message: &str, error_code: i64) -> Self {
        Self {
            sent: Mutex::default(),
            failure: Some((message.to_string(), error_code)),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub(crate) fn last(&self) -> Option<(RequestContext, FetchOptions)> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, ctx: &RequestContext, options: &FetchOptions) -> Result<Value> {
        self.sent
            .lock()
            .unwrap()
            .push((ctx.clone(), options.clone()));

        if let Some((message, code)) = &self.failure {
            return Err(Error::Api {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: message.clone(),
                error_code: Some(*code),
            });
        }

        let uid = ctx.request.url.rsplit('/').next().unwrap_or_default();
        Ok(json!({
            "asset": {
                "uid": uid,
                "title": format!("{uid}.png"),
                "content_type": "image/png",
                "file_size": 1024
            }
        }))
    }
}
