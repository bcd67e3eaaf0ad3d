use domain::ChatMessage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct RagQueryRequest {
    pub query: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NonRagQueryRequest {
    pub messages: Option<Vec<ChatMessage>>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// `{"status":"success","data":[...]}`
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub status: Status,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: Status::Success,
            data,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub status: Status,
    pub answer: String,
}

impl AnswerResponse {
    pub fn success(answer: String) -> Self {
        Self {
            status: Status::Success,
            answer,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: Status,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
        }
    }
}
