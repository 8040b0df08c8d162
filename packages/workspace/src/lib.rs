//! Host-side adapters for the Writify notebook.
//!
//! `writify-editor` owns the session state; this crate connects it to the
//! outside world: key-value storage, debounced autosave, export through a
//! rasterizer, identity, notices and configuration.

pub mod autosave;
pub mod config;
pub mod export;
pub mod identity;
pub mod logging;
pub mod notices;
pub mod persistence;
pub mod shell;
pub mod storage;

pub use autosave::{Autosaver, DEFAULT_AUTOSAVE_DELAY};
pub use config::{ConfigError, ExportSettings, NotebookConfig, Theme, DEFAULT_CONFIG_NAME};
pub use export::{
    ExportArtifact, ExportError, Exporter, PdfAssembler, RasterImage, RasterOptions, Rasterizer,
    RegionHandle,
};
pub use identity::{
    AuthState, Credentials, Identity, IdentityError, IdentityProvider, IdentityService,
};
pub use notices::{
    Notice, NoticeLevel, Notifier, RecordingNotifier, RecordingThemeSink, ThemeSink,
    TracingNotifier,
};
pub use persistence::SessionPersistence;
pub use shell::{NotebookShell, ShellServices};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageResult};
