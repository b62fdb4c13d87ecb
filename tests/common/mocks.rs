use async_trait::async_trait;
use chat_relay::{Error, Result, llm::CompletionClient};
use std::sync::{Arc, Mutex};

/// Mock completion client for testing. Records every call so tests can
/// assert whether (and with what) the upstream was contacted.
pub struct MockCompletionClient {
    pub responses: Arc<Mutex<Vec<String>>>,
    pub requests: Arc<Mutex<Vec<(String, String)>>>,
    pub error: Option<String>,
    pub panic_on_call: bool,
}

impl MockCompletionClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            error: None,
            panic_on_call: false,
        }
    }

    pub fn with_responses(self, responses: Vec<&str>) -> Self {
        *self.responses.lock().unwrap() = responses.into_iter().map(str::to_string).collect();
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn panicking(mut self) -> Self {
        self.panic_on_call = true;
        self
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn get_requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, api_key: &str, message: &str) -> Result<String> {
        self.requests
            .lock()
            .unwrap()
            .push((api_key.to_string(), message.to_string()));

        if self.panic_on_call {
            panic!("mock completion client configured to panic");
        }

        if let Some(ref error) = self.error {
            return Err(Error::upstream(error.clone()));
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(Error::upstream("No more mock responses available"));
        }

        Ok(responses.remove(0))
    }
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::new()
    }
}
