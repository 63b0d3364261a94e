//! The single shared clipboard service.

use crate::paths::AppPaths;
use crate::settings::Settings;
use chrono::{DateTime, Utc};
use clipdeck_context::platform::PlatformProvider;
use clipdeck_context::{ActiveAppProvider, AppActivator, AppIconProvider, AppInfo};
use clipdeck_history::{
    AppAttributor, BackgroundWriter, ClipItem, HistoryPersistence, HistoryQuery, HistoryStore,
    JsonDocument,
};
use clipdeck_paste::{
    InputKeyChord, KeyChordSender, NoPanel, PanelControl, PasteCoordinator, PasteError,
    PasteMode, PasteOutcome, PasteTiming,
};
use clipdeck_watcher::platform::PlatformClipboard;
use clipdeck_watcher::{ClipboardSource, ClipboardWatcher, ClipboardWriter, WatcherHandle};
use std::sync::{Arc, Mutex, RwLock};

/// Platform adapters the service is wired with.
#[derive(Clone)]
pub struct Platform {
    pub clipboard: Arc<dyn ClipboardSource>,
    pub clipboard_writer: Arc<dyn ClipboardWriter>,
    pub apps: Arc<dyn ActiveAppProvider>,
    pub activator: Arc<dyn AppActivator>,
    pub icons: Arc<dyn AppIconProvider>,
    pub keys: Arc<dyn KeyChordSender>,
    pub panel: Arc<dyn PanelControl>,
}

impl Platform {
    /// Native clipboard, application and key-chord backends.
    pub fn native() -> Self {
        let clipboard = Arc::new(PlatformClipboard::new());
        let provider = Arc::new(PlatformProvider::new());
        Self {
            clipboard: clipboard.clone(),
            clipboard_writer: clipboard,
            apps: provider.clone(),
            activator: provider.clone(),
            icons: provider,
            keys: Arc::new(InputKeyChord::new()),
            panel: Arc::new(NoPanel),
        }
    }

    pub fn with_panel(mut self, panel: Arc<dyn PanelControl>) -> Self {
        self.panel = panel;
        self
    }
}

/// History, watcher and paste-back wired together.
///
/// Construct once at startup and share by reference. This is the surface a
/// presentation layer drives.
pub struct ClipService {
    paths: AppPaths,
    settings: RwLock<Settings>,
    store: Arc<HistoryStore>,
    watcher: Arc<ClipboardWatcher>,
    poller: WatcherHandle,
    paster: PasteCoordinator,
    apps: Arc<dyn ActiveAppProvider>,
    /// Application focused when the panel was last opened
    target: Mutex<Option<AppInfo>>,
}

impl ClipService {
    /// Open the history under `paths`, writing the document on a background
    /// thread.
    pub fn open(paths: AppPaths, settings: Settings, platform: Platform) -> Self {
        let document = Arc::new(JsonDocument::new(paths.history_file()));
        let persistence = Arc::new(BackgroundWriter::spawn(document));
        Self::with_persistence(paths, settings, platform, persistence)
    }

    pub fn with_persistence(
        paths: AppPaths,
        settings: Settings,
        platform: Platform,
        persistence: Arc<dyn HistoryPersistence>,
    ) -> Self {
        let settings = settings.normalized();
        let blobs = paths.blobs();
        let attributor = AppAttributor::new(
            Arc::clone(&platform.apps),
            Arc::clone(&platform.icons),
            blobs.clone(),
        );
        let store = Arc::new(HistoryStore::open(
            persistence,
            Arc::new(attributor),
            blobs,
            settings.max_items,
        ));
        let watcher = Arc::new(ClipboardWatcher::new(
            Arc::clone(&platform.clipboard),
            Arc::clone(&platform.apps),
            store.clone(),
            settings.ignored_app_ids.clone(),
        ));
        let paster = PasteCoordinator::new(
            store.clone(),
            watcher.clone(),
            platform.clipboard_writer,
            platform.activator,
            platform.keys,
        )
        .with_panel(platform.panel)
        .with_timing(PasteTiming::from_millis(
            settings.paste.activate_delay_ms,
            settings.paste.chord_delay_ms,
        ));

        tracing::info!(root = %paths.root().display(), "clip service ready");

        Self {
            paths,
            settings: RwLock::new(settings),
            store,
            watcher,
            poller: WatcherHandle::new(),
            paster,
            apps: platform.apps,
            target: Mutex::new(None),
        }
    }

    pub fn store(&self) -> &Arc<HistoryStore> {
        &self.store
    }

    pub fn watcher(&self) -> &Arc<ClipboardWatcher> {
        &self.watcher
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    pub fn settings(&self) -> Settings {
        match self.settings.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn update_settings(&self, update: impl FnOnce(&mut Settings)) {
        let snapshot = {
            let mut guard = match self.settings.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            update(&mut guard);
            guard.clone()
        };
        if let Err(e) = snapshot.save(&self.paths.settings_file()) {
            tracing::warn!("failed to save settings: {}", e);
        }
    }

    /// Handle the activate trigger: remember the frontmost application as
    /// the paste target and return it.
    pub fn activate(&self) -> Option<AppInfo> {
        let app = self.apps.get_active_app();
        match &app {
            Some(app) => tracing::debug!(bundle_id = %app.bundle_id, "recorded paste target"),
            None => tracing::debug!("no frontmost application to record"),
        }
        *self.target.lock().unwrap_or_else(|p| p.into_inner()) = app.clone();
        app
    }

    pub fn paste_target(&self) -> Option<AppInfo> {
        self.target.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub fn list(&self, query: &HistoryQuery) -> Vec<ClipItem> {
        self.store.query(query)
    }

    pub fn count(&self) -> usize {
        self.store.len()
    }

    pub fn get(&self, id: &str) -> Option<ClipItem> {
        self.store.get(id)
    }

    /// Paste entry `id` into the recorded target. Must be called within a
    /// tokio runtime.
    pub fn paste(&self, id: &str, mode: PasteMode) -> Result<PasteOutcome, PasteError> {
        self.paster.paste(id, mode, self.paste_target())
    }

    pub fn toggle_pin(&self, id: &str) -> Option<bool> {
        self.store.toggle_pin(id)
    }

    pub fn delete(&self, id: &str) -> bool {
        self.store.delete(id)
    }

    pub fn clear_all(&self) -> usize {
        self.store.clear_all()
    }

    /// Remove unpinned entries captured before `cutoff`.
    pub fn prune_older_than(&self, cutoff: DateTime<Utc>) -> usize {
        self.store.prune_older_than(cutoff, true)
    }

    /// Prune with the configured retention period.
    pub fn prune_expired(&self) -> usize {
        let cutoff = Utc::now() - self.settings().retention();
        self.prune_older_than(cutoff)
    }

    /// Change the size cap, evicting immediately. Returns how many entries
    /// were evicted.
    pub fn set_max_items(&self, max_items: usize) -> usize {
        let max_items = max_items.max(1);
        self.update_settings(|s| s.max_items = max_items);
        self.store.set_max_items(max_items)
    }

    pub fn set_ignored_apps(&self, ids: Vec<String>) {
        self.update_settings(|s| s.ignored_app_ids = ids.clone());
        self.watcher.set_ignored_apps(ids);
    }

    /// Start polling the clipboard. Must be called within a tokio runtime.
    pub fn start(&self) -> bool {
        let interval = self.settings().poll_interval();
        self.poller.start(Arc::clone(&self.watcher), interval)
    }

    pub fn stop(&self) {
        self.poller.stop();
    }

    pub fn is_running(&self) -> bool {
        self.poller.is_running()
    }

    /// Wait until pending history writes reach disk.
    pub fn flush(&self) {
        self.store.flush();
    }
}

impl std::fmt::Debug for ClipService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipService")
            .field("paths", &self.paths)
            .field("store", &self.store)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}
