/**
 * Pusher Relay Client
 *
 * Publishes new posts through the Pusher HTTP events API (also spoken by
 * self-hosted relays such as soketi).
 *
 * # Request
 *
 * ```http
 * POST /apps/{app_id}/events?auth_key=..&auth_timestamp=..&auth_version=1.0&body_md5=..&auth_signature=..
 * Content-Type: application/json
 *
 * {"name":"new-post","channels":["live-blog-stream"],"data":"{\"id\":1,\"content\":\"hello\"}"}
 * ```
 *
 * `data` is the post serialized to a JSON string. The signature is the hex
 * HMAC-SHA256, keyed with the app secret, of
 * `"POST\n" + path + "\n" + query`, where `query` holds every other
 * parameter sorted by key.
 */

use std::collections::BTreeMap;

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::Serialize;
use sha2::Sha256;

use crate::backend::error::BroadcastError;
use crate::backend::realtime::broadcast::Broadcaster;
use crate::shared::{Post, PusherConfig};

type HmacSha256 = Hmac<Sha256>;

const AUTH_VERSION: &str = "1.0";

#[derive(Debug, Serialize)]
struct TriggerBody<'a> {
    name: &'a str,
    channels: [&'a str; 1],
    data: String,
}

/// `Broadcaster` backed by a Pusher-compatible relay
#[derive(Debug, Clone)]
pub struct PusherBroadcaster {
    config: PusherConfig,
    client: Client,
}

impl PusherBroadcaster {
    pub fn new(config: PusherConfig) -> Result<Self, BroadcastError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: PusherConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn events_path(&self) -> String {
        format!("/apps/{}/events", self.config.app_id)
    }

    /// Query parameters for one signed request, signature included
    fn signed_query(
        &self,
        path: &str,
        body: &str,
        timestamp: i64,
    ) -> Result<BTreeMap<&'static str, String>, BroadcastError> {
        let mut params = BTreeMap::new();
        params.insert("auth_key", self.config.key.clone());
        params.insert("auth_timestamp", timestamp.to_string());
        params.insert("auth_version", AUTH_VERSION.to_string());
        params.insert("body_md5", format!("{:x}", md5::compute(body.as_bytes())));

        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        let signature = sign(&self.config.secret, &format!("POST\n{}\n{}", path, query))?;
        params.insert("auth_signature", signature);

        Ok(params)
    }
}

/// Hex-encoded HMAC-SHA256 of `payload` keyed with `secret`
pub fn sign(secret: &str, payload: &str) -> Result<String, BroadcastError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| BroadcastError::Signing(e.to_string()))?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[async_trait]
impl Broadcaster for PusherBroadcaster {
    async fn publish(&self, channel: &str, event: &str, post: &Post) -> Result<(), BroadcastError> {
        let body = serde_json::to_string(&TriggerBody {
            name: event,
            channels: [channel],
            data: serde_json::to_string(post)?,
        })?;

        let path = self.events_path();
        let query = self.signed_query(&path, &body, chrono::Utc::now().timestamp())?;
        let url = format!("{}{}", self.config.base_url(), path);

        let response = self
            .client
            .post(&url)
            .query(&query)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BroadcastError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!("[Realtime] Post {} published to {} as {}", post.id, channel, event);
        Ok(())
    }
}
