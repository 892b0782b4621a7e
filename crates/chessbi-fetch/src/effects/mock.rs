//! Scripted [`HttpClient`] for tests.
//!
//! Replies are queued per URL and handed out in order. A request for a URL
//! with an empty queue fails with [`RequestError::Transport`].

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::data::HttpResponse;
use crate::effects::http::{HttpClient, RequestError};

/// A request observed by [`ScriptedClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url:     String,
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Default)]
pub struct ScriptedClient {
    replies:  Mutex<HashMap<String, VecDeque<Result<HttpResponse, RequestError>>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedClient {
    pub fn new() -> Self { Self::default() }

    /// Queue `reply` for the next unanswered request to `url`.
    pub fn push(&self, url: impl Into<String>, reply: Result<HttpResponse, RequestError>) {
        self.replies
            .lock()
            .unwrap()
            .entry(url.into())
            .or_default()
            .push_back(reply);
    }

    /// Queue `count` copies of `reply` for `url`.
    pub fn push_repeated(
        &self,
        url: impl Into<String>,
        reply: Result<HttpResponse, RequestError>,
        count: usize,
    ) {
        let url = url.into();
        for _ in 0..count {
            self.push(url.clone(), reply.clone());
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> { self.requests.lock().unwrap().clone() }

    /// Number of requests made to `url` so far.
    pub fn attempts(&self, url: &str) -> usize {
        self.requests.lock().unwrap().iter().filter(|r| r.url == url).count()
    }

    /// Replies still queued for `url`.
    pub fn remaining(&self, url: &str) -> usize {
        self.replies.lock().unwrap().get(url).map_or(0, VecDeque::len)
    }
}

impl HttpClient for ScriptedClient {
    async fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, RequestError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url:     url.to_string(),
            headers: headers.to_vec(),
        });

        let reply = self.replies.lock().unwrap().get_mut(url).and_then(VecDeque::pop_front);
        reply.unwrap_or_else(|| Err(RequestError::Transport(format!("no scripted reply for {url}"))))
    }
}
