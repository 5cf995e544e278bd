//! Data source and refreshable dataset snapshot
//!
//! A [`DataStore`] hands out `Arc<Dataset>` snapshots. Refresh loads a
//! complete new dataset before swapping it in, so readers never see a
//! partial load, and a failed refresh leaves the previous snapshot in place.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use serde::Serialize;
use tracing::{info, warn};

use crate::dataset::{Dataset, DatasetInfo};
use crate::error::Result;
use crate::import::{self, DataFormat};
use crate::mock;

/// Where shop data comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Built-in sample data
    Mock,
    /// A data file; format detected from the extension unless given
    File {
        path: PathBuf,
        format: Option<DataFormat>,
    },
}

impl DataSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File {
            path: path.into(),
            format: None,
        }
    }

    /// Load a fresh, validated dataset
    pub fn load(&self) -> Result<Dataset> {
        match self {
            Self::Mock => mock::mock_dataset(),
            Self::File { path, format } => import::load_file(path, *format),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Mock => mock::MOCK_ORIGIN.to_string(),
            Self::File { path, .. } => path.display().to_string(),
        }
    }
}

/// Result of a refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshOutcome {
    /// Whether the source content differs from the previous snapshot
    pub changed: bool,
    #[serde(flatten)]
    pub dataset: DatasetInfo,
}

/// Shared holder of the current dataset snapshot
pub struct DataStore {
    source: DataSource,
    current: RwLock<Arc<Dataset>>,
}

impl DataStore {
    /// Load the source once; fails if the initial data is invalid
    pub fn open(source: DataSource) -> Result<Self> {
        let dataset = source.load()?;
        info!(
            source = %source.describe(),
            shops = dataset.len(),
            "Opened data store"
        );
        Ok(Self {
            source,
            current: RwLock::new(Arc::new(dataset)),
        })
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<Dataset> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Reload from the source and swap in the new snapshot
    pub fn refresh(&self) -> Result<RefreshOutcome> {
        let previous = self.snapshot();

        let dataset = match self.source.load() {
            Ok(ds) => Arc::new(ds),
            Err(e) => {
                warn!(
                    source = %self.source.describe(),
                    error = %e,
                    "Refresh rejected, keeping previous data"
                );
                return Err(e);
            }
        };

        let changed = dataset.fingerprint() != previous.fingerprint();
        let info = dataset.info();

        {
            let mut guard = match self.current.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            *guard = dataset;
        }

        info!(
            source = %self.source.describe(),
            shops = info.shop_count,
            changed,
            "Data refreshed"
        );

        Ok(RefreshOutcome {
            changed,
            dataset: info,
        })
    }
}
