use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
    pub message: &'static str,
}

impl Health {
    pub fn healthy() -> Self {
        Self { status: "healthy", message: "API is running" }
    }
}

/// Plain acknowledgement body, e.g. `{"message": "brand deleted"}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Body of `GET /`.
#[derive(Serialize, Debug)]
pub struct Welcome {
    pub message: &'static str,
    pub version: &'static str,
    pub documentation: &'static str,
}
