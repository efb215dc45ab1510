//! One statement at a time: extract → normalize → parse, with the result
//! replaced wholesale on every run.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ledgerlens_core::{Error, Result, Transaction};
use ledgerlens_finance::{summarize, Summary};
use ledgerlens_ingest::{
    base_name_of, export_csv, export_filename, parse_transactions, strip_code_fences,
    ExportNaming, StatementFile,
};
use tracing::{debug, info};

use crate::extract::Extractor;

/// A successful extraction: the raw text as returned and the rows parsed from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub source_name: String,
    pub base_name: Option<String>,
    /// Fence-stripped model output; this is what gets exported
    pub raw_csv: String,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Loading,
    Failed(String),
    Ready(Arc<Extraction>),
}

#[derive(Debug, Default)]
pub struct Session {
    state: Mutex<SessionState>,
}

/// Holds the single-flight slot; a dropped (cancelled) run frees it.
struct Flight<'a> {
    session: &'a Session,
}

impl Drop for Flight<'_> {
    fn drop(&mut self) {
        let mut state = self.session.lock();
        if matches!(*state, SessionState::Loading) {
            *state = SessionState::Idle;
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> SessionState {
        self.lock().clone()
    }

    pub fn current(&self) -> Option<Arc<Extraction>> {
        match &*self.lock() {
            SessionState::Ready(x) => Some(x.clone()),
            _ => None,
        }
    }

    /// Recomputed from the held transactions on every call.
    pub fn summary(&self) -> Option<Summary> {
        self.current().map(|x| summarize(&x.transactions))
    }

    /// Claim the flight slot and drop whatever the previous run produced.
    fn begin(&self) -> Result<Flight<'_>> {
        let mut state = self.lock();
        if matches!(*state, SessionState::Loading) {
            return Err(Error::Busy);
        }
        *state = SessionState::Loading;
        Ok(Flight { session: self })
    }

    fn finish(&self, outcome: Result<Extraction>) -> Result<Arc<Extraction>> {
        let mut state = self.lock();
        match outcome {
            Ok(x) => {
                let x = Arc::new(x);
                *state = SessionState::Ready(x.clone());
                Ok(x)
            }
            Err(e) => {
                debug!(error = %e, "statement processing failed");
                *state = SessionState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Send `file` through `extractor` and parse the result.
    pub async fn run<E: Extractor>(&self, extractor: &E, file: &StatementFile) -> Result<Arc<Extraction>> {
        let _flight = self.begin()?;
        let outcome = match extractor.extract(file).await {
            Ok(text) => ingest_text(&file.name, &text),
            Err(e) => Err(e),
        };
        self.finish(outcome)
    }

    /// Same pipeline for CSV text that is already on hand.
    pub fn load_csv(&self, source_name: &str, text: &str) -> Result<Arc<Extraction>> {
        let _flight = self.begin()?;
        self.finish(ingest_text(source_name, text))
    }

    /// Write the held raw CSV into `dir`. `None` when there is nothing to export.
    pub fn export(&self, dir: &Path, naming: &ExportNaming) -> Result<Option<PathBuf>> {
        let Some(x) = self.current() else {
            return Ok(None);
        };
        if x.raw_csv.is_empty() {
            return Ok(None);
        }
        let path = dir.join(export_filename(x.base_name.as_deref(), naming));
        export_csv(&x.raw_csv, &path)?;
        Ok(Some(path))
    }
}

fn ingest_text(source_name: &str, text: &str) -> Result<Extraction> {
    let raw_csv = strip_code_fences(text);
    if raw_csv.is_empty() {
        return Err(Error::EmptyResponse);
    }

    let transactions = parse_transactions(&raw_csv)?;
    info!(source = source_name, transactions = transactions.len(), "statement parsed");

    Ok(Extraction {
        source_name: source_name.to_string(),
        base_name: base_name_of(source_name).map(str::to_string),
        raw_csv,
        transactions,
    })
}
