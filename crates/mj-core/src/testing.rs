use crate::credentials::Credentials;
use crate::error::GatewayError;
use crate::gateway::{Gateway, GatewayResponse};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
    pub api_key: String,
}

/// Scripted gateway: answers calls in order from a queue of statuses and
/// records every call it receives.
#[derive(Default)]
pub struct FakeGateway {
    replies: Mutex<VecDeque<Result<StatusCode, String>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeGateway {
    pub fn replying(statuses: &[u16]) -> Self {
        let replies = statuses
            .iter()
            .map(|code| Ok(StatusCode::from_u16(*code).unwrap()))
            .collect();
        Self {
            replies: Mutex::new(replies),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from([Err(message.to_string())])),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Gateway for FakeGateway {
    async fn call(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        credentials: &Credentials,
    ) -> Result<GatewayResponse, GatewayError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            url: url.to_string(),
            body: body.cloned(),
            api_key: credentials.api_key().to_string(),
        });
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted gateway call");
        match reply {
            Ok(status) => Ok(GatewayResponse {
                status,
                body: String::new(),
            }),
            Err(message) => Err(GatewayError::Unavailable { message }),
        }
    }
}
