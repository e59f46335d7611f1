//! HTTP client for the external one-shot scheduler service.
//!
//! The service runs a named schedule once at an absolute wall-clock instant
//! and POSTs the payload to the callback URL. Names are deterministic per
//! entity, which makes both operations idempotent at this layer: create that
//! conflicts falls back to an in-place update, delete of an unknown name is
//! success.

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use reqwest::StatusCode;

use crate::kernel::{BaseScheduler, ReminderJob};

pub struct SchedulerClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    callback_url: String,
}

impl SchedulerClient {
    pub fn new(base_url: &str, token: Option<&str>, callback_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
            callback_url: callback_url.to_string(),
        }
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    fn schedule_body(
        &self,
        name: &str,
        run_at: DateTime<FixedOffset>,
        payload: &ReminderJob,
    ) -> serde_json::Value {
        serde_json::json!({
            "name": name,
            "run_at": run_at.to_rfc3339(),
            "callback_url": self.callback_url,
            "payload": payload,
        })
    }
}

#[async_trait]
impl BaseScheduler for SchedulerClient {
    async fn upsert(
        &self,
        name: &str,
        run_at: DateTime<FixedOffset>,
        payload: &ReminderJob,
    ) -> Result<()> {
        let body = self.schedule_body(name, run_at, payload);

        let resp = self
            .authorize(self.client.post(format!("{}/schedules", self.base_url)))
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        // Conflict on create means the schedule exists: update in place.
        if status == StatusCode::CONFLICT {
            let resp = self
                .authorize(
                    self.client
                        .put(format!("{}/schedules/{}", self.base_url, name)),
                )
                .json(&body)
                .send()
                .await?;
            let status = resp.status();
            if status.is_success() {
                return Ok(());
            }
            let message = resp.text().await.unwrap_or_default();
            return Err(anyhow!("scheduler update failed ({status}): {message}"));
        }

        let message = resp.text().await.unwrap_or_default();
        Err(anyhow!("scheduler create failed ({status}): {message}"))
    }

    async fn delete(&self, name: &str) -> Result<()> {
        let resp = self
            .authorize(
                self.client
                    .delete(format!("{}/schedules/{}", self.base_url, name)),
            )
            .send()
            .await?;

        let status = resp.status();
        // Already gone is the desired end state.
        if status.is_success() || status == StatusCode::NOT_FOUND {
            return Ok(());
        }

        let message = resp.text().await.unwrap_or_default();
        Err(anyhow!("scheduler delete failed ({status}): {message}"))
    }
}
