/// Integration tests for the notebook shell
/// Tests session → autosave → storage, export and identity flows
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use writify_editor::{Mutation, MutationError, PageField, VisualStyle};
use writify_workspace::{
    AuthState, Credentials, ExportError, Exporter, FileStore, Identity, IdentityError,
    IdentityProvider, IdentityService, KeyValueStore, MemoryStore, NotebookConfig, NotebookShell,
    NoticeLevel, PdfAssembler, RasterImage, RasterOptions, Rasterizer, RecordingNotifier,
    RecordingThemeSink, RegionHandle, ShellServices, Theme,
};

struct WhiteRasterizer;

#[async_trait]
impl Rasterizer for WhiteRasterizer {
    async fn rasterize(
        &self,
        _region: &RegionHandle,
        _options: &RasterOptions,
    ) -> Result<RasterImage, ExportError> {
        RasterImage::new(1, 1, vec![255, 255, 255, 255])
    }
}

struct PageCountAssembler;

#[async_trait]
impl PdfAssembler for PageCountAssembler {
    async fn assemble_pdf(&self, pages: Vec<RasterImage>) -> Result<Vec<u8>, ExportError> {
        Ok(vec![pages.len() as u8])
    }
}

struct PasswordProvider;

#[async_trait]
impl IdentityProvider for PasswordProvider {
    async fn sign_up(&self, credentials: &Credentials) -> Result<Identity, IdentityError> {
        self.sign_in(credentials).await
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Identity, IdentityError> {
        if credentials.password == "correct-horse" {
            Ok(Identity {
                uid: "u1".to_string(),
                email: Some(credentials.email.clone()),
                display_name: None,
            })
        } else {
            Err(IdentityError::Provider("invalid credential".to_string()))
        }
    }

    async fn sign_in_with_federated_provider(&self) -> Result<Identity, IdentityError> {
        Err(IdentityError::Cancelled)
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        Ok(())
    }
}

struct Harness {
    notifier: RecordingNotifier,
    themes: RecordingThemeSink,
}

impl Harness {
    fn new() -> Self {
        Self {
            notifier: RecordingNotifier::new(),
            themes: RecordingThemeSink::new(),
        }
    }

    fn services(&self) -> ShellServices {
        ShellServices {
            exporter: Exporter::new(Arc::new(WhiteRasterizer), Arc::new(PageCountAssembler)),
            identity: IdentityService::new(Arc::new(PasswordProvider)),
            notifier: Arc::new(self.notifier.clone()),
            theme_sink: Arc::new(self.themes.clone()),
        }
    }

    fn start(&self, config: &NotebookConfig, store: impl KeyValueStore + 'static) -> NotebookShell {
        NotebookShell::start(config, store, self.services())
    }
}

#[tokio::test(start_paused = true)]
async fn test_edits_survive_a_restart() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let config = NotebookConfig::default();
    let harness = Harness::new();

    let mut shell = harness.start(&config, store.clone());
    assert!(shell.edit("Dear diary"));
    shell.apply(Mutation::AddPage)?;
    assert!(shell.edit("page two"));
    shell.apply(Mutation::SetPageField {
        index: 1,
        field: PageField::VisualStyle(VisualStyle::Grid),
    })?;

    tokio::time::sleep(Duration::from_millis(900)).await;
    assert_eq!(store.write_count(), 1);
    shell.close().await;

    let reopened = harness.start(&config, store.clone());
    let session = reopened.session();
    assert_eq!(session.page_count(), 2);
    assert_eq!(session.current_index(), 1);
    assert_eq!(session.current_text(), "page two");
    assert_eq!(session.current_page().visual_style, VisualStyle::Grid);
    assert!(!session.history().can_undo());
    reopened.close().await;

    Ok(())
}

#[tokio::test]
async fn test_close_flushes_to_file_store() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = NotebookConfig {
        storage_key: "notes".to_string(),
        ..NotebookConfig::default()
    };
    let harness = Harness::new();

    let mut shell = harness.start(&config, FileStore::open(dir.path())?);
    shell.edit("flushed on close");
    shell.close().await;

    let store = FileStore::open(dir.path())?;
    let raw = store.get("notes")?.expect("session file written");
    assert!(raw.contains("flushed on close"));

    let reopened = harness.start(&config, store);
    assert_eq!(reopened.session().current_text(), "flushed on close");
    reopened.close().await;
    Ok(())
}

#[tokio::test]
async fn test_fresh_notebook_uses_configured_style() {
    let mut config = NotebookConfig::default();
    config.text_style.font_size = 30.0;
    config.history_capacity = 3;
    let harness = Harness::new();

    let mut shell = harness.start(&config, MemoryStore::new());
    assert_eq!(shell.session().text_style().font_size, 30.0);

    for text in ["a", "b", "c", "d", "e"] {
        shell.edit(text);
    }
    assert_eq!(shell.session().history().undo_levels(), 3);
    shell.close().await;
}

#[tokio::test]
async fn test_corrupt_notebook_starts_with_configured_style() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let mut config = NotebookConfig::default();
    config.text_style.font_size = 30.0;
    store.set(&config.storage_key, "{\"schemaVersion\":1,\"session\":")?;
    let harness = Harness::new();

    let shell = harness.start(&config, store);
    assert_eq!(shell.session().page_count(), 1);
    assert_eq!(shell.session().current_text(), "");
    assert_eq!(shell.session().text_style().font_size, 30.0);
    shell.close().await;
    Ok(())
}

#[tokio::test]
async fn test_restored_notebook_keeps_its_own_style() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let harness = Harness::new();

    let mut shell = harness.start(&NotebookConfig::default(), store.clone());
    shell.edit("saved");
    shell.close().await;

    let mut config = NotebookConfig::default();
    config.text_style.font_size = 30.0;
    let reopened = harness.start(&config, store);
    assert_eq!(reopened.session().current_text(), "saved");
    assert_eq!(
        reopened.session().text_style().font_size,
        NotebookConfig::default().text_style.font_size
    );
    reopened.close().await;
    Ok(())
}

#[tokio::test]
async fn test_rejected_mutation_leaves_session_alone() {
    let harness = Harness::new();
    let mut shell = harness.start(&NotebookConfig::default(), MemoryStore::new());
    shell.edit("keep me");
    let version = shell.session().version();

    let err = shell.apply(Mutation::DeletePage { index: 4 }).unwrap_err();
    assert_eq!(err, MutationError::PageOutOfRange { index: 4, len: 1 });
    assert_eq!(shell.session().version(), version);
    assert_eq!(shell.session().current_text(), "keep me");
    shell.close().await;
}

#[tokio::test]
async fn test_undo_redo_through_shell() {
    let harness = Harness::new();
    let mut shell = harness.start(&NotebookConfig::default(), MemoryStore::new());

    shell.edit("one");
    shell.edit("two");
    assert!(shell.undo());
    assert_eq!(shell.session().current_text(), "one");
    assert!(shell.redo());
    assert_eq!(shell.session().current_text(), "two");
    assert!(!shell.redo());
    shell.close().await;
}

#[tokio::test]
async fn test_export_failures_become_warnings() {
    let harness = Harness::new();
    let mut shell = harness.start(&NotebookConfig::default(), MemoryStore::new());

    let err = shell.export_image().await.unwrap_err();
    assert!(matches!(err, ExportError::NothingToExport));
    let notice = harness.notifier.last().expect("notice raised");
    assert_eq!(notice.level, NoticeLevel::Warning);

    shell.edit("something");
    let artifact = shell.export_image().await.expect("png export");
    assert_eq!(artifact.file_name, "writify-note.png");

    shell.apply(Mutation::AddPage).expect("add page");
    let pdf = shell.export_pdf().await.expect("pdf export");
    assert_eq!(pdf.bytes, vec![2]);
    assert_eq!(harness.notifier.notices().len(), 1);
    shell.close().await;
}

#[tokio::test]
async fn test_identity_failures_become_errors() {
    let harness = Harness::new();
    let shell = harness.start(&NotebookConfig::default(), MemoryStore::new());
    let mut changes = shell.identity().on_auth_state_change();

    let err = shell
        .sign_in(Credentials::new("me@example.com", "nope"))
        .await
        .unwrap_err();
    assert_eq!(err, IdentityError::WeakPassword);
    assert_eq!(
        harness.notifier.last().map(|n| n.level),
        Some(NoticeLevel::Error)
    );

    shell
        .sign_in_with_federated_provider()
        .await
        .expect_err("popup closed");
    assert_eq!(harness.notifier.notices().len(), 2);

    shell
        .sign_in(Credentials::new("me@example.com", "correct-horse"))
        .await
        .expect("sign in");
    changes.changed().await.expect("state published");
    assert!(changes.borrow_and_update().is_signed_in());

    shell.sign_out().await.expect("sign out");
    assert_eq!(shell.auth_state(), AuthState::SignedOut);
    shell.close().await;
}

#[tokio::test]
async fn test_theme_applied_and_toggled() {
    let harness = Harness::new();
    let config = NotebookConfig {
        theme: Theme::Dark,
        ..NotebookConfig::default()
    };

    let mut shell = harness.start(&config, MemoryStore::new());
    assert_eq!(shell.theme(), Theme::Dark);
    assert_eq!(shell.toggle_theme(), Theme::Light);
    assert_eq!(harness.themes.applied(), vec![Theme::Dark, Theme::Light]);
    shell.close().await;
}
