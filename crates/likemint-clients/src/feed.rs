//! Reaction feed client
//!
//! Notifications for a target arrive newest first, paginated by an opaque
//! cursor. Each notification groups the reactors that acted at one
//! timestamp. Only `like` notifications are counted downstream; other
//! kinds are passed through as `ReactionKind::Other` or `Recast`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, instrument};

use likemint_core::traits::{ReactionFeed, RepoResult};
use likemint_core::{AccountId, DomainError, ReactionEvent, ReactionKind, ReactionPage, Reactor};

use crate::http::{error_message, join};

/// `GET {base}/v1/notifications?targetId=..&limit=..[&cursor=..]`
#[derive(Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageBody {
    #[serde(default)]
    notifications: Vec<NotificationBody>,
    #[serde(default)]
    next_cursor: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NotificationBody {
    #[serde(rename = "type")]
    kind: ReactionKind,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    reactors: Vec<ReactorBody>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReactorBody {
    id: AccountId,
    #[serde(default)]
    display_name: String,
}

impl From<PageBody> for ReactionPage {
    fn from(body: PageBody) -> Self {
        Self {
            events: body
                .notifications
                .into_iter()
                .map(|n| ReactionEvent {
                    kind: n.kind,
                    timestamp: n.timestamp.timestamp(),
                    reactors: n
                        .reactors
                        .into_iter()
                        .map(|r| Reactor::new(r.id, r.display_name))
                        .collect(),
                })
                .collect(),
            // An empty cursor string means the same as none
            next_cursor: body.next_cursor.filter(|c| !c.is_empty()),
        }
    }
}

impl FeedClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key,
        }
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let request = self.http.get(join(&self.base_url, path));
        match &self.api_key {
            Some(key) => request.header("x-api-key", key),
            None => request,
        }
    }
}

#[async_trait]
impl ReactionFeed for FeedClient {
    #[instrument(skip(self))]
    async fn fetch_page(
        &self,
        target_id: AccountId,
        cursor: Option<&str>,
        page_size: u32,
    ) -> RepoResult<ReactionPage> {
        let mut query = vec![
            ("targetId", target_id.to_string()),
            ("limit", page_size.to_string()),
        ];
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor.to_string()));
        }

        let response = self
            .get("v1/notifications")
            .query(&query)
            .send()
            .await
            .map_err(|e| DomainError::fetch(format!("reaction feed: {e}")))?;

        if !response.status().is_success() {
            return Err(DomainError::fetch(format!(
                "reaction feed: {}",
                error_message(response).await
            )));
        }

        let body: PageBody = response
            .json()
            .await
            .map_err(|e| DomainError::fetch(format!("reaction feed body: {e}")))?;
        let page = ReactionPage::from(body);
        debug!(events = page.events.len(), has_next = page.next_cursor.is_some(), "feed page");
        Ok(page)
    }

    #[instrument(skip(self))]
    async fn ready(&self) -> RepoResult<()> {
        let response = self
            .get("health")
            .send()
            .await
            .map_err(|e| DomainError::fetch(format!("reaction feed not ready: {e}")))?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(DomainError::fetch(format!(
                "reaction feed not ready: {}",
                response.status()
            )))
        }
    }
}
