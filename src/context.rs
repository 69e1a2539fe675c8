//! Service context bundling the port trait objects.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::drive::DriveTransport;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::memory::MemoryFileSystem;
use crate::adapters::replaying::{ReplayingClock, ReplayingTransport};
use crate::backup::DailyBackup;
use crate::cassette::{Cassette, CassetteReplayer};
use crate::config::Settings;
use crate::error::{CassetteError, StorageError};
use crate::ports::{BackupTransport, Clock, FileSystem, KeyValueStore, TaskStore};
use crate::repository::TaskRepository;
use crate::store::{FilePreferences, TableStore, PREFERENCES_FILE};
use crate::tracker::DayTracker;

/// Bundles all port trait objects into a single context.
///
/// Constructors wire up different adapter sets: `live` for the real
/// system, `replaying` for deterministic runs driven by a cassette.
pub struct ServiceContext {
    /// Clock for obtaining the current time.
    pub clock: Arc<dyn Clock>,
    /// Filesystem backing the stores.
    pub fs: Arc<dyn FileSystem>,
    /// Task and completion tables.
    pub store: Arc<dyn TaskStore>,
    /// Small persisted preferences.
    pub prefs: Arc<dyn KeyValueStore>,
    /// Backup upload, absent when no remote folder is configured.
    pub transport: Option<Arc<dyn BackupTransport>>,
    repo: Arc<TaskRepository>,
    replay: Option<Arc<ReplayingTransport>>,
}

impl ServiceContext {
    fn assemble(
        clock: Arc<dyn Clock>,
        fs: Arc<dyn FileSystem>,
        store: Arc<dyn TaskStore>,
        prefs: Arc<dyn KeyValueStore>,
        transport: Option<Arc<dyn BackupTransport>>,
    ) -> Self {
        let repo = Arc::new(TaskRepository::new(Arc::clone(&store), Arc::clone(&clock)));
        Self { clock, fs, store, prefs, transport, repo, replay: None }
    }

    /// Creates a live context over the data directory in `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tables document exists but cannot be loaded.
    pub fn live(settings: &Settings) -> Result<Self, StorageError> {
        let fs: Arc<dyn FileSystem> = Arc::new(LiveFileSystem);
        let store = TableStore::open(Arc::clone(&fs), &settings.tables_path())?;
        let prefs = FilePreferences::new(Arc::clone(&fs), &settings.preferences_path());
        let transport = settings.drive_folder.as_ref().map(|folder| {
            Arc::new(DriveTransport::new(folder.clone(), settings.drive_token.clone()))
                as Arc<dyn BackupTransport>
        });
        tracing::debug!(home = %settings.home.display(), backups = transport.is_some(), "live context");
        Ok(Self::assemble(Arc::new(LiveClock), fs, Arc::new(store), Arc::new(prefs), transport))
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// Clock readings and upload results come from the cassette; tables and
    /// preferences live in memory and start empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be read, has no clock
    /// readings, or holds a malformed reading.
    pub fn replaying(path: &Path) -> Result<Self, CassetteError> {
        let cassette = Cassette::load(path)?;
        let mut replayer = CassetteReplayer::new(&cassette);
        let clock = ReplayingClock::new(&mut replayer)?;
        let transport = Arc::new(ReplayingTransport::new(replayer));
        let fs: Arc<dyn FileSystem> = Arc::new(MemoryFileSystem::new());
        let prefs = FilePreferences::new(Arc::clone(&fs), Path::new(PREFERENCES_FILE));

        let mut ctx = Self::assemble(
            Arc::new(clock),
            fs,
            Arc::new(TableStore::in_memory()),
            Arc::new(prefs),
            Some(Arc::clone(&transport) as Arc<dyn BackupTransport>),
        );
        ctx.replay = Some(transport);
        Ok(ctx)
    }

    /// The shared repository.
    #[must_use]
    pub fn repository(&self) -> Arc<TaskRepository> {
        Arc::clone(&self.repo)
    }

    /// A day tracker opened on today.
    ///
    /// # Errors
    ///
    /// Returns an error if today's tasks cannot be loaded.
    pub async fn tracker(&self) -> Result<DayTracker, StorageError> {
        DayTracker::open(self.repository()).await
    }

    /// The daily backup, when a transport is configured.
    #[must_use]
    pub fn backup(&self) -> Option<DailyBackup> {
        let transport = self.transport.as_ref()?;
        Some(DailyBackup::new(
            self.repository(),
            Arc::clone(&self.prefs),
            Arc::clone(transport),
            Arc::clone(&self.clock),
        ))
    }

    /// Documents handed to the replaying transport, in call order.
    ///
    /// Always empty for a live context.
    #[must_use]
    pub fn replayed_uploads(&self) -> Vec<(String, String)> {
        self.replay.as_ref().map(|t| t.uploads()).unwrap_or_default()
    }
}
