//! Dashboard State
//!
//! Holds the current view-model and runs loads. A load moves the phase
//! `Idle -> Loading -> Ready | Failed`; both end states carry a usable
//! `DashboardData`. The view-model is swapped wholesale behind an `Arc` and
//! never mutated in place, and only one load runs at a time.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};

use super::source::DataSource;
use crate::models::dashboard::DashboardData;
use crate::models::response::LoadStatusResponse;
use crate::models::settings::{PipelineConfig, SettingsUpdate};
use crate::services::normalize::{
    extract_records, Assembly, DashboardAssembler, DataOrigin, NormalizeContext,
};
use crate::storage::ConfigService;
use crate::utils::error::{AppError, AppResult};

/// Phase of the data-load state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPhase {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// The view-model of the last completed load
#[derive(Debug, Clone)]
struct Snapshot {
    data: Arc<DashboardData>,
    origin: DataOrigin,
    advisory: Option<String>,
    loaded_at: DateTime<Utc>,
}

/// Shared dashboard state
pub struct DashboardState {
    /// Active pipeline configuration
    config: Arc<RwLock<PipelineConfig>>,
    /// Backing config file, when one is attached
    config_service: Arc<RwLock<Option<ConfigService>>>,
    phase: Arc<RwLock<LoadPhase>>,
    snapshot: Arc<RwLock<Option<Snapshot>>>,
    /// Serializes loads
    load_lock: Arc<Mutex<()>>,
}

impl DashboardState {
    /// Create an idle state with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            config_service: Arc::new(RwLock::new(None)),
            phase: Arc::new(RwLock::new(LoadPhase::Idle)),
            snapshot: Arc::new(RwLock::new(None)),
            load_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Create an idle state backed by a config file.
    ///
    /// `None` uses ~/.lot-dashboard/config.json.
    pub fn with_config_file(path: Option<PathBuf>) -> AppResult<Self> {
        let service = match path {
            Some(path) => ConfigService::from_path(path)?,
            None => ConfigService::new()?,
        };
        let mut state = Self::new(service.get_config_clone());
        state.config_service = Arc::new(RwLock::new(Some(service)));
        Ok(state)
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Get the current configuration
    pub async fn get_config(&self) -> PipelineConfig {
        self.config.read().await.clone()
    }

    /// Apply a partial update; persisted when a config file is attached.
    /// Takes effect on the next load.
    pub async fn update_config(&self, update: SettingsUpdate) -> AppResult<PipelineConfig> {
        let mut service = self.config_service.write().await;
        let updated = match &mut *service {
            Some(service) => service.update_config(update)?,
            None => {
                let mut candidate = self.config.read().await.clone();
                candidate.apply_update(update);
                candidate.validate().map_err(AppError::validation)?;
                candidate
            }
        };
        *self.config.write().await = updated.clone();
        Ok(updated)
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Load from a source using today's date and the configured jitter seed
    pub async fn load(&self, source: &DataSource) -> AppResult<LoadStatusResponse> {
        let seed = self.config.read().await.jitter_seed;
        self.load_with_context(source, NormalizeContext::for_today(seed))
            .await
    }

    /// Load from a source with an explicit normalization context
    pub async fn load_with_context(
        &self,
        source: &DataSource,
        mut ctx: NormalizeContext,
    ) -> AppResult<LoadStatusResponse> {
        let _guard = self.load_lock.lock().await;
        let assembler = DashboardAssembler::new(&*self.config.read().await)?;

        self.set_phase(LoadPhase::Loading).await;
        tracing::info!("[Loader] Loading dashboard data from {}", source);

        let assembly = match source.read_text().await {
            Ok(text) => match serde_json::from_str::<serde_json::Value>(&text) {
                Ok(payload) => {
                    let records = extract_records(&payload);
                    assembler.assemble_records_batched(&records, &mut ctx).await
                }
                Err(e) => assembler.fallback_assembly(&format!("payload is not valid JSON ({})", e)),
            },
            Err(e) => assembler.fallback_assembly(&e.to_string()),
        };

        Ok(self.publish(assembly).await)
    }

    /// Replace the current view-model and settle the phase
    async fn publish(&self, assembly: Assembly) -> LoadStatusResponse {
        let phase = match assembly.origin {
            DataOrigin::Records => LoadPhase::Ready,
            DataOrigin::Fallback => LoadPhase::Failed,
        };
        let snapshot = Snapshot {
            data: Arc::new(assembly.data),
            origin: assembly.origin,
            advisory: assembly.advisory,
            loaded_at: Utc::now(),
        };
        let status = status_of(phase, Some(&snapshot));

        *self.snapshot.write().await = Some(snapshot);
        self.set_phase(phase).await;

        match phase {
            LoadPhase::Ready => tracing::info!("[Loader] Ready with {} lots", status.lot_count),
            _ => tracing::warn!(
                "[Loader] Failed, showing backup data ({})",
                status.advisory.as_deref().unwrap_or("no advisory")
            ),
        }
        status
    }

    async fn set_phase(&self, phase: LoadPhase) {
        *self.phase.write().await = phase;
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Current load phase
    pub async fn phase(&self) -> LoadPhase {
        *self.phase.read().await
    }

    /// Current view-model; an error until the first load completes
    pub async fn dashboard(&self) -> AppResult<Arc<DashboardData>> {
        let guard = self.snapshot.read().await;
        match &*guard {
            Some(snapshot) => Ok(Arc::clone(&snapshot.data)),
            None => Err(AppError::not_found("dashboard data has not been loaded")),
        }
    }

    /// Status of the most recent load
    pub async fn status(&self) -> LoadStatusResponse {
        let phase = self.phase().await;
        let guard = self.snapshot.read().await;
        status_of(phase, guard.as_ref())
    }
}

fn status_of(phase: LoadPhase, snapshot: Option<&Snapshot>) -> LoadStatusResponse {
    match snapshot {
        Some(snapshot) => LoadStatusResponse {
            phase,
            origin: Some(snapshot.origin),
            advisory: snapshot.advisory.clone(),
            lot_count: snapshot.data.lots.len(),
            loaded_at: Some(snapshot.loaded_at),
        },
        None => LoadStatusResponse {
            phase,
            ..Default::default()
        },
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl std::fmt::Debug for DashboardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardState")
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
