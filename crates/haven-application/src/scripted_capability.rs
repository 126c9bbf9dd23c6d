//! A configured capability that replays canned responses.
//!
//! Used by tests and by the CLI's offline demo to drive the services
//! through their success and failure paths without network access.

use async_trait::async_trait;
use haven_core::capability::{AiCapability, CapabilityError, CapabilityRequest};
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::Mutex;

type Scripted = (Duration, Result<String, CapabilityError>);

/// Replays queued responses in order, then repeats the fallback.
pub struct ScriptedCapability {
    queue: Mutex<VecDeque<Scripted>>,
    fallback: Result<String, CapabilityError>,
    requests: Mutex<Vec<CapabilityRequest>>,
}

impl ScriptedCapability {
    /// Answers every request with `response`.
    pub fn always(response: Result<String, CapabilityError>) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback: response,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answers every request with a transport failure.
    pub fn failing() -> Self {
        Self::always(Err(CapabilityError::Transport("connection reset".to_string())))
    }

    /// Queues a response delivered after `delay`.
    pub fn then_after(mut self, delay: Duration, response: Result<String, CapabilityError>) -> Self {
        self.queue.get_mut().push_back((delay, response));
        self
    }

    /// Queues an immediate response.
    pub fn then(self, response: Result<String, CapabilityError>) -> Self {
        self.then_after(Duration::ZERO, response)
    }

    /// Every request received so far, in arrival order.
    pub async fn requests(&self) -> Vec<CapabilityRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl AiCapability for ScriptedCapability {
    fn is_configured(&self) -> bool {
        true
    }

    async fn generate(&self, request: CapabilityRequest) -> Result<String, CapabilityError> {
        self.requests.lock().await.push(request);
        let next = self.queue.lock().await.pop_front();
        match next {
            Some((delay, response)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                response
            }
            None => self.fallback.clone(),
        }
    }
}
