#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use common::{RemovalControl, ScoreSnapshot, parse_remaining, parse_snapshot};
use reqwest::StatusCode;
use terminal::api::ContestApi;
use terminal::error::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub enum Reply {
    Ok(String),
    Fail,
    Delayed(Duration, String),
}

/// Replies handed out in order; once drained the fallback repeats forever.
pub struct Script {
    replies: Mutex<VecDeque<Reply>>,
    fallback: Reply,
    calls: AtomicUsize,
}

impl Script {
    pub fn new(replies: Vec<Reply>, fallback: Reply) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn always(body: &str) -> Self {
        Self::new(Vec::new(), Reply::Ok(body.to_string()))
    }

    pub fn failing() -> Self {
        Self::new(Vec::new(), Reply::Fail)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn serve(&self, endpoint: &str) -> ClientResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        match reply {
            Reply::Ok(body) => Ok(body),
            Reply::Fail => Err(ClientError::Status {
                endpoint: endpoint.to_string(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
            }),
            Reply::Delayed(delay, body) => {
                tokio::time::sleep(delay).await;
                Ok(body)
            }
        }
    }
}

pub struct MockApi {
    pub auth: Script,
    pub scores: Script,
    pub time: Script,
    pub validity: Script,
    pub removals: Mutex<Vec<RemovalControl>>,
    pub submissions: Mutex<Vec<String>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            auth: Script::always("0"),
            scores: Script::always("{}"),
            time: Script::always("600"),
            validity: Script::always("0"),
            removals: Mutex::new(Vec::new()),
            submissions: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ContestApi for MockApi {
    async fn auth(&self) -> ClientResult<String> {
        self.auth.serve("/auth").await
    }

    async fn scores(&self) -> ClientResult<ScoreSnapshot> {
        let body = self.scores.serve("/get_scores").await?;
        Ok(parse_snapshot(&body)?)
    }

    async fn remaining_time(&self) -> ClientResult<i64> {
        let body = self.time.serve("/get_time").await?;
        parse_remaining(&body).map_err(|source| ClientError::RemainingTime { body, source })
    }

    async fn validity(&self) -> ClientResult<String> {
        self.validity.serve("/get_valid_username").await
    }

    async fn remove_user(&self, control: &RemovalControl) -> ClientResult<()> {
        self.removals.lock().unwrap().push(control.clone());
        Ok(())
    }

    async fn submit(&self, code: &str) -> ClientResult<()> {
        self.submissions.lock().unwrap().push(code.to_string());
        Ok(())
    }
}

pub const SCENARIO: &str = r#"{
    "alice": {"score": 10, "solved": 2, "problem_scores": [{"score": 5}, {"score": 5}], "diamonds": [], "golds": [0]},
    "bob": {"score": 8, "solved": 1, "problem_scores": [{"score": 8}, {"score": 0}], "diamonds": [1], "golds": []}
}"#;

pub fn single_user(name: &str) -> String {
    format!(r#"{{"{name}": {{"score": 1, "solved": 1, "problem_scores": [{{"score": 1}}]}}}}"#)
}
