// Services shared with every component through the launch context
pub mod alerts;
pub mod clipboard;

use std::sync::Arc;

use client::data::{FileStore, KeyValueStore, LocalStorage, MemoryStore};
use client::notify::{Notifier, ToastDefaults};
use client::services::HttpClient;
use client::ui::ShortcutMap;

use crate::config::AppConfig;
use alerts::{alert_channel, AlertInbox, ChannelAlertBackend};

pub type Storage = LocalStorage<Box<dyn KeyValueStore>>;

#[derive(Clone)]
pub struct Services {
    pub http: HttpClient,
    pub notifier: Notifier<ChannelAlertBackend>,
    pub storage: Arc<Storage>,
    pub shortcuts: ShortcutMap,
}

impl Services {
    pub fn build(config: &AppConfig) -> anyhow::Result<(Self, AlertInbox)> {
        let http = HttpClient::from_settings(&config.client)?;
        let (backend, inbox) = alert_channel();
        let notifier = Notifier::new(Arc::new(backend), ToastDefaults::from_settings(&config.client)?);

        let store: Box<dyn KeyValueStore> = match FileStore::in_data_dir(&config.client.storage_namespace) {
            Ok(store) => {
                tracing::info!(path = %store.path().display(), "Using file-backed local storage");
                Box::new(store)
            }
            Err(e) => {
                tracing::warn!(error = %e, "No data directory; UI state will not persist");
                Box::new(MemoryStore::new())
            }
        };

        let services = Services {
            http,
            notifier,
            storage: Arc::new(LocalStorage::new(store)),
            shortcuts: config.shortcuts.to_map()?,
        };
        Ok((services, inbox))
    }
}
