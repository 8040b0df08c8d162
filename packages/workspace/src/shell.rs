//! # Notebook Shell
//!
//! Wires the edit session to its adapters: every state change is handed to
//! the autosaver, export and identity outcomes become notices, and theme
//! changes go to the injected sink. The session itself knows nothing about
//! any of them.

use crate::autosave::Autosaver;
use crate::config::{NotebookConfig, Theme};
use crate::export::{ExportArtifact, ExportError, Exporter};
use crate::identity::{AuthState, Credentials, Identity, IdentityError, IdentityService};
use crate::notices::{Notice, Notifier, ThemeSink};
use crate::persistence::SessionPersistence;
use crate::storage::KeyValueStore;
use std::sync::Arc;
use writify_editor::{EditSession, Mutation, MutationError, MutationResult};

/// External capabilities the shell talks to
pub struct ShellServices {
    pub exporter: Exporter,
    pub identity: IdentityService,
    pub notifier: Arc<dyn Notifier>,
    pub theme_sink: Arc<dyn ThemeSink>,
}

pub struct NotebookShell {
    session: EditSession,
    autosaver: Autosaver,
    exporter: Exporter,
    identity: IdentityService,
    notifier: Arc<dyn Notifier>,
    theme_sink: Arc<dyn ThemeSink>,
    theme: Theme,
}

impl NotebookShell {
    /// Restore the saved notebook and start autosaving
    ///
    /// Must be called inside a tokio runtime.
    pub fn start<S>(config: &NotebookConfig, store: S, services: ShellServices) -> Self
    where
        S: KeyValueStore + 'static,
    {
        let persistence = SessionPersistence::with_key(store, config.storage_key.clone())
            .history_capacity(config.history_capacity);

        // Missing and unusable stored data both start a configured notebook
        let (session, fresh) = match persistence.try_restore() {
            Some(session) => (session, false),
            None => {
                let mut session = persistence.new_session();
                session.set_text_style(config.text_style.clone());
                (session, true)
            }
        };

        tracing::info!(
            pages = session.page_count(),
            current = session.current_index(),
            fresh,
            "notebook opened"
        );

        services.theme_sink.apply_theme(config.theme);

        Self {
            session,
            autosaver: Autosaver::spawn(persistence, config.autosave_delay()),
            exporter: services.exporter,
            identity: services.identity,
            notifier: services.notifier,
            theme_sink: services.theme_sink,
            theme: config.theme,
        }
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// Apply a mutation and queue an autosave when state changed
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, MutationError> {
        let name = mutation.name();
        let result = self.session.apply(mutation).map_err(|e| {
            tracing::warn!(mutation = name, "Rejected mutation: {}", e);
            e
        })?;

        if result.changed {
            self.autosaver.schedule(&self.session);
        }
        Ok(result)
    }

    pub fn edit(&mut self, text: impl Into<String>) -> bool {
        self.apply(Mutation::UpdateText { text: text.into() })
            .map(|result| result.changed)
            .unwrap_or(false)
    }

    pub fn undo(&mut self) -> bool {
        self.apply(Mutation::Undo)
            .map(|result| result.changed)
            .unwrap_or(false)
    }

    pub fn redo(&mut self) -> bool {
        self.apply(Mutation::Redo)
            .map(|result| result.changed)
            .unwrap_or(false)
    }

    pub async fn export_image(&self) -> Result<ExportArtifact, ExportError> {
        let result = self.exporter.export_image(&self.session).await;
        self.report_export(result)
    }

    pub async fn export_pdf(&self) -> Result<ExportArtifact, ExportError> {
        let result = self.exporter.export_pdf(&self.session).await;
        self.report_export(result)
    }

    fn report_export(
        &self,
        result: Result<ExportArtifact, ExportError>,
    ) -> Result<ExportArtifact, ExportError> {
        if let Err(e) = &result {
            self.notifier.notify(Notice::warning(e.to_string()));
        }
        result
    }

    pub fn auth_state(&self) -> AuthState {
        self.identity.current()
    }

    pub fn identity(&self) -> &IdentityService {
        &self.identity
    }

    pub async fn sign_up(&self, credentials: Credentials) -> Result<Identity, IdentityError> {
        let result = self.identity.sign_up(credentials).await;
        self.report_identity(result)
    }

    pub async fn sign_in(&self, credentials: Credentials) -> Result<Identity, IdentityError> {
        let result = self.identity.sign_in(credentials).await;
        self.report_identity(result)
    }

    pub async fn sign_in_with_federated_provider(&self) -> Result<Identity, IdentityError> {
        let result = self.identity.sign_in_with_federated_provider().await;
        self.report_identity(result)
    }

    pub async fn sign_out(&self) -> Result<(), IdentityError> {
        let result = self.identity.sign_out().await;
        self.report_identity(result)
    }

    fn report_identity<T>(&self, result: Result<T, IdentityError>) -> Result<T, IdentityError> {
        if let Err(e) = &result {
            self.notifier.notify(Notice::error(e.to_string()));
        }
        result
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme_sink.apply_theme(self.theme);
        self.theme
    }

    /// Flush the pending autosave and stop
    pub async fn close(self) {
        self.autosaver.shutdown().await;
    }
}
