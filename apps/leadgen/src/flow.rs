//! Per-flow submission state machine and the two flow drivers.
//!
//! Each flow owns one explicit state value, `Idle → Submitting → { Success |
//! Failed } → Idle`, rather than scattered booleans. Transitions are strictly
//! sequential per submission and there is no cancellation of an in-flight
//! request. All mapping of internal errors to user-facing strings happens
//! here, at the flow boundary — callers above only ever see the state.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::client::BioService;
use crate::csv::write_csv;
use crate::errors::FlowError;
use crate::models::{GeneratedLead, LeadQuery};

/// User-facing message for any single-lead failure that is not a service
/// error payload (network, transport, malformed body).
pub const SEARCH_FAILED_MSG: &str = "Search failed. Please try again.";

/// User-facing message for any batch failure past validation.
pub const BATCH_FAILED_MSG: &str = "Batch processing failed. Please try again.";

/// User-facing message when batch generation is invoked with no file.
pub const NO_FILE_MSG: &str = "Please select a CSV file first.";

// ────────────────────────────────────────────────────────────────────────────
// State machine
// ────────────────────────────────────────────────────────────────────────────

/// Lifecycle of one submission. `T` is the flow's rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState<T> {
    /// Ready for input; nothing shown.
    Idle,
    /// A request is in flight. Previous output is already cleared and new
    /// submissions are refused until the request settles.
    Submitting,
    /// The last submission produced output.
    Success(T),
    /// The last submission failed; holds the user-facing message.
    Failed(String),
}

impl<T> Default for FlowState<T> {
    fn default() -> Self {
        FlowState::Idle
    }
}

impl<T> FlowState<T> {
    /// True while a request is in flight — the double-submit guard.
    pub fn is_submitting(&self) -> bool {
        matches!(self, FlowState::Submitting)
    }

    /// True when a new submission may begin.
    pub fn accepts_input(&self) -> bool {
        !self.is_submitting()
    }

    /// Enters `Submitting`, clearing whatever the previous submission left
    /// behind. Returns `false` (and does nothing) if a request is already in
    /// flight.
    pub fn begin(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        *self = FlowState::Submitting;
        true
    }

    /// Settles the in-flight submission.
    pub fn finish(&mut self, result: Result<T, String>) {
        *self = match result {
            Ok(output) => FlowState::Success(output),
            Err(message) => FlowState::Failed(message),
        };
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Single-lead flow
// ────────────────────────────────────────────────────────────────────────────

/// Drives one single-lead generation: free text in, rendered lead or error out.
#[derive(Default)]
pub struct SingleLeadFlow {
    pub state: FlowState<GeneratedLead>,
}

impl SingleLeadFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submits the two free-text fields. Refused (no request issued) while a
    /// previous submission is still in flight.
    pub async fn submit(&mut self, service: &dyn BioService, lead_name: &str, additional_info: &str) {
        if !self.state.begin() {
            return;
        }

        let query = LeadQuery::from_free_text(lead_name, additional_info);
        info!(first = %query.first, last = %query.last, "generating bio");

        let result = service
            .generate_bio(&query)
            .await
            .map_err(|e| Self::user_message(&e));
        self.state.finish(result);
    }

    /// Maps a failure to what the user sees. A service-provided error message
    /// is shown verbatim; everything else collapses to the retry prompt.
    fn user_message(err: &FlowError) -> String {
        error!("single-lead flow failed: {err}");
        match err {
            FlowError::Service(message) => message.clone(),
            FlowError::Validation(message) => message.clone(),
            _ => SEARCH_FAILED_MSG.to_string(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Batch flow
// ────────────────────────────────────────────────────────────────────────────

/// What a successful batch leaves behind: the written file and its row count.
/// The rows themselves are not retained for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub output_path: PathBuf,
    pub rows: usize,
}

/// Drives one batch generation: CSV file in, `generated_bios.csv` out.
#[derive(Default)]
pub struct BatchFlow {
    pub state: FlowState<BatchOutcome>,
}

impl BatchFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submits the selected CSV. `input` of `None` means no file was selected:
    /// the flow fails validation without issuing a network request. On any
    /// failure past validation, partial output is discarded and the flow
    /// returns to a retryable state.
    pub async fn submit(
        &mut self,
        service: &dyn BioService,
        input: Option<&Path>,
        output_path: &Path,
    ) {
        if !self.state.begin() {
            return;
        }

        let result = Self::run(service, input, output_path)
            .await
            .map_err(|e| Self::user_message(&e));
        self.state.finish(result);
    }

    async fn run(
        service: &dyn BioService,
        input: Option<&Path>,
        output_path: &Path,
    ) -> Result<BatchOutcome, FlowError> {
        let input = input.ok_or_else(|| FlowError::Validation(NO_FILE_MSG.to_string()))?;

        let file_name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "leads.csv".to_string());
        let csv_bytes = std::fs::read(input)
            .map_err(|e| FlowError::Batch(format!("could not read {}: {e}", input.display())))?;

        info!(file = %input.display(), bytes = csv_bytes.len(), "submitting batch");

        let rows = service
            .generate_batch_bio(&file_name, csv_bytes)
            .await
            .map_err(FlowError::into_batch)?;

        write_csv(output_path, &rows)?;
        Ok(BatchOutcome {
            output_path: output_path.to_path_buf(),
            rows: rows.len(),
        })
    }

    fn user_message(err: &FlowError) -> String {
        error!("batch flow failed: {err}");
        match err {
            FlowError::Validation(message) => message.clone(),
            _ => BATCH_FAILED_MSG.to_string(),
        }
    }
}
