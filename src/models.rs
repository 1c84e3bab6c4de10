use serde::Serialize;
use std::fmt;
use uuid::Uuid;

pub const GREETING: &str = "하이";

/// Per-request identifier used to group log lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId(String);

impl CorrelationId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One task of a request's fan-out.
#[derive(Debug, Clone)]
pub struct UnitOfWork {
    pub tx_id: CorrelationId,
    pub ordinal: usize,
}

#[derive(Debug, Serialize)]
pub struct ClientsResponse {
    pub data: Vec<String>,
}

impl ClientsResponse {
    pub fn greeting(count: u64) -> Self {
        Self {
            data: vec![GREETING.to_string(), format!("{} {}", GREETING, count)],
        }
    }
}
