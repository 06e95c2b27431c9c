use tokio::sync::watch;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::resource::{Assets, Devices, Signals};

/// Snapshot of the three collection sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntityCounts {
    pub devices: usize,
    pub assets: usize,
    pub signals: usize,
}

/// Shared observable source for the navigation counts.
///
/// Interested views subscribe to one service instead of each refetching the
/// three collections. A failed refresh leaves the previous snapshot in place
/// and reports the error to the caller.
pub struct SummaryService {
    client: ApiClient,
    tx: watch::Sender<EntityCounts>,
}

impl SummaryService {
    pub fn new(client: ApiClient) -> Self {
        let (tx, _) = watch::channel(EntityCounts::default());
        Self { client, tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<EntityCounts> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> EntityCounts {
        *self.tx.borrow()
    }

    /// Fetch the three collection sizes concurrently and publish a snapshot.
    pub async fn refresh(&self) -> Result<EntityCounts, ApiError> {
        let (devices, assets, signals) = tokio::join!(
            self.client.count::<Devices>(),
            self.client.count::<Assets>(),
            self.client.count::<Signals>(),
        );

        let counts = EntityCounts {
            devices: devices?,
            assets: assets?,
            signals: signals?,
        };
        self.tx.send_replace(counts);
        Ok(counts)
    }
}
