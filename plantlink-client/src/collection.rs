use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::client::ApiClient;
use crate::resource::Resource;

/// In-memory view of one remote collection, with the uniform loading/error
/// contract shared by every list screen.
///
/// A failed fetch empties the view and records a display-ready message; a
/// failed delete leaves the view untouched and returns a transient alert.
/// Every fetch takes a cancellation token modeling navigation-away: a
/// cancelled fetch leaves the state untouched, so a slow response can never
/// overwrite newer state. Nothing is retried automatically; a manual retry
/// re-invokes the same fetch.
pub struct Collection<R: Resource> {
    client: ApiClient,
    items: Vec<R::Entity>,
    error: Option<String>,
    deleting: Option<R::Id>,
}

impl<R: Resource> Collection<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            items: Vec::new(),
            error: None,
            deleting: None,
        }
    }

    pub fn items(&self) -> &[R::Entity] {
        &self.items
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Id of the row with a delete in flight, so its control can be disabled
    /// or relabeled while the request runs.
    pub fn deleting(&self) -> Option<R::Id> {
        self.deleting
    }

    /// Replace the view with the full remote collection.
    pub async fn fetch_all(&mut self, cancel: &CancellationToken) {
        tokio::select! {
            _ = cancel.cancelled() => {}
            result = self.client.fetch_all::<R>() => match result {
                Ok(items) => {
                    self.items = items;
                    self.error = None;
                }
                Err(error) => {
                    warn!(resource = R::PATH, error = %error, "fetch failed");
                    self.items.clear();
                    self.error = Some(error.to_string());
                }
            }
        }
    }

    /// Replace the view with the single record matching `raw_id`, reusing
    /// the same rendering as the full list.
    ///
    /// An empty identifier issues no request and surfaces a prompt to enter
    /// one; so does an identifier that is not a positive integer.
    pub async fn fetch_by_id(&mut self, raw_id: &str, cancel: &CancellationToken) {
        let raw_id = raw_id.trim();
        if raw_id.is_empty() {
            self.error = Some(format!("Please enter a {} ID", R::NOUN));
            return;
        }
        let id: R::Id = match raw_id.parse::<u64>() {
            Ok(n) if n > 0 => n.into(),
            _ => {
                self.error = Some(format!(
                    "Please enter a valid {} ID (positive integer)",
                    R::NOUN
                ));
                return;
            }
        };

        tokio::select! {
            _ = cancel.cancelled() => {}
            result = self.client.fetch_one::<R>(id) => match result {
                Ok(entity) => {
                    self.items = vec![entity];
                    self.error = None;
                }
                Err(error) => {
                    warn!(resource = R::PATH, %id, error = %error, "fetch by id failed");
                    self.items.clear();
                    self.error = Some(error.to_string());
                }
            }
        }
    }

    /// Remove one row by identity. Interactive confirmation is the caller's
    /// concern; this assumes it was already given.
    ///
    /// On success exactly the matching element leaves the view; on failure
    /// the view is untouched and the returned alert is transient.
    pub async fn delete(&mut self, id: R::Id) -> Result<(), String> {
        self.deleting = Some(id);
        let result = self.client.delete::<R>(id).await;
        self.deleting = None;

        match result {
            Ok(()) => {
                self.items.retain(|item| R::id(item) != id);
                Ok(())
            }
            Err(error) => {
                warn!(resource = R::PATH, %id, error = %error, "delete failed");
                Err(format!("Failed to delete {}: {error}", R::NOUN))
            }
        }
    }
}
