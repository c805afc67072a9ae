//! Impact reports: fetch for display, export to a file.

use crate::notifications::toasts;
use crate::session_manager::SessionManager;
use ecoweb_core::notification::{Notification, Notifier};
use ecoweb_core::report::{ReportApi, ReportData, ReportPeriod};
use ecoweb_core::session::SessionToken;
use ecoweb_core::{EcowebError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// File name used when the export destination is a directory.
pub fn export_file_name(period: ReportPeriod) -> String {
    format!("relatorio-impacto-{}.pdf", period)
}

pub struct ReportService {
    api: Arc<dyn ReportApi>,
    session: Arc<SessionManager>,
    notifier: Arc<dyn Notifier>,
    latest: RwLock<Option<ReportData>>,
}

impl ReportService {
    pub fn new(
        api: Arc<dyn ReportApi>,
        session: Arc<SessionManager>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            session,
            notifier,
            latest: RwLock::new(None),
        }
    }

    pub async fn fetch(&self, period: ReportPeriod) -> Result<ReportData> {
        let token = self.token().await?;
        let report = self
            .api
            .fetch_report(&token, period)
            .await
            .map_err(|e| self.report(e, toasts::report_failed()))?;

        *self.latest.write().await = Some(report.clone());
        Ok(report)
    }

    /// Exports the report and writes it to `dest`.
    ///
    /// When `dest` is an existing directory the file is named after the
    /// period. Returns the written path.
    pub async fn export(&self, period: ReportPeriod, dest: &Path) -> Result<PathBuf> {
        let token = self.token().await?;
        let bytes = self
            .api
            .export_report(&token, period)
            .await
            .map_err(|e| self.report(e, toasts::report_export_failed()))?;

        let is_dir = tokio::fs::metadata(dest)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        let path = if is_dir {
            dest.join(export_file_name(period))
        } else {
            dest.to_path_buf()
        };

        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| self.report(e.into(), toasts::report_export_failed()))?;

        tracing::info!("[ReportService] Exported {} byte(s) to {}", bytes.len(), path.display());
        self.notifier.notify(toasts::report_exported());
        Ok(path)
    }

    /// The last successfully fetched report.
    pub async fn latest(&self) -> Option<ReportData> {
        self.latest.read().await.clone()
    }

    async fn token(&self) -> Result<SessionToken> {
        self.session
            .require_token()
            .await
            .map_err(|e| self.report(e, toasts::session_expired()))
    }

    fn report(&self, err: EcowebError, notification: Notification) -> EcowebError {
        tracing::warn!("[ReportService] {}", err);
        self.notifier.notify(notification);
        err
    }
}
