//! A day's worth of analyzer inputs, loadable from JSON.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{select_top_picks, StandingsByCompetition};
use crate::models::{AnalysedFixture, Fixture, Form, H2HStats};

#[derive(Debug, Error)]
pub enum SlateError {
    #[error("failed to read slate file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse slate file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate fixture id {0} in slate")]
    DuplicateFixture(u64),
}

/// Fixtures plus everything the analyzer may consult for them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slate {
    pub fixtures: Vec<Fixture>,
    /// League tables keyed by competition code
    #[serde(default)]
    pub standings: StandingsByCompetition,
    /// Head-to-head records keyed by fixture id
    #[serde(default)]
    pub h2h: HashMap<u64, H2HStats>,
    /// Form computed from recent results, keyed by team id
    #[serde(default)]
    pub form: HashMap<u64, Form>,
}

impl Slate {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SlateError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SlateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let slate: Slate = serde_json::from_str(&raw).map_err(|source| SlateError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        slate.validate()?;
        Ok(slate)
    }

    fn validate(&self) -> Result<(), SlateError> {
        let mut seen = std::collections::HashSet::new();
        for f in &self.fixtures {
            if !seen.insert(f.id) {
                return Err(SlateError::DuplicateFixture(f.id));
            }
        }
        Ok(())
    }

    pub fn select(&self, count: usize) -> Vec<AnalysedFixture> {
        select_top_picks(
            &self.fixtures,
            &self.standings,
            &self.h2h,
            &self.form,
            count,
        )
    }
}
