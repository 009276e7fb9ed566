//! "Add information" dialog hosted by the detail card.
//!
//! ```text
//! Closed --open--> Empty --edit--> Filled --submit--> Submitting
//!   ^                                                   |    |
//!   +------------------- success (form reset) ----------+    |
//!                        Filled <-- failure (form kept) -----+
//! ```

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::api::CaseApi;
use crate::error::FieldError;
use crate::model::SupplementaryInfo;
use crate::submission::InfoForm;

pub const SUCCESS_NOTICE: &str = "Informação adicionada com sucesso!";
pub const FAILURE_NOTICE: &str = "Erro interno no servidor. Verifique se os arquivos não são \
     muito grandes ou estão em formato inválido.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    /// Open with a pristine form.
    Empty,
    /// Open with user input.
    Filled,
    Submitting,
}

/// Toast-style message left for the shell to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("dialog is not open")]
    NotOpen,
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(Vec<FieldError>),
    #[error("submission failed")]
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Closed,
    Open,
    Submitting,
}

pub struct AddInfoDialog {
    occurrence_id: u64,
    phase: Phase,
    form: InfoForm,
    errors: Vec<FieldError>,
    notice: Option<Notice>,
}

impl AddInfoDialog {
    pub fn new(occurrence_id: u64) -> Self {
        Self {
            occurrence_id,
            phase: Phase::Closed,
            form: InfoForm::default(),
            errors: Vec::new(),
            notice: None,
        }
    }

    pub fn occurrence_id(&self) -> u64 {
        self.occurrence_id
    }

    pub fn state(&self) -> DialogState {
        match self.phase {
            Phase::Closed => DialogState::Closed,
            Phase::Submitting => DialogState::Submitting,
            Phase::Open if self.form.is_empty() => DialogState::Empty,
            Phase::Open => DialogState::Filled,
        }
    }

    pub fn is_open(&self) -> bool {
        self.phase != Phase::Closed
    }

    pub fn open(&mut self) {
        if self.phase == Phase::Closed {
            self.phase = Phase::Open;
        }
    }

    /// Dismiss the dialog. Whatever was typed is discarded.
    pub fn close(&mut self) {
        self.phase = Phase::Closed;
        self.form.reset();
        self.errors.clear();
    }

    pub fn form(&self) -> &InfoForm {
        &self.form
    }

    /// Mutable access to the form; `None` unless the dialog is open.
    pub fn form_mut(&mut self) -> Option<&mut InfoForm> {
        (self.phase == Phase::Open).then_some(&mut self.form)
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Validate, post, and settle the dialog.
    ///
    /// Invalid input stays in the dialog with per-field errors and never
    /// reaches the network. On success the created record is returned, the
    /// dialog closes and its form resets. On failure the dialog stays open
    /// with the input preserved; the cause is only logged.
    pub async fn submit(
        &mut self,
        api: &dyn CaseApi,
        today: NaiveDate,
    ) -> Result<SupplementaryInfo, SubmitError> {
        if self.phase != Phase::Open {
            return Err(SubmitError::NotOpen);
        }

        let submission = match self.form.to_submission(self.occurrence_id, today) {
            Ok(s) => s,
            Err(errors) => {
                warn!(count = errors.len(), "information form rejected");
                self.errors = errors.clone();
                return Err(SubmitError::Invalid(errors));
            }
        };
        self.errors.clear();

        self.phase = Phase::Submitting;
        info!(
            occurrence_id = self.occurrence_id,
            files = submission.attachments.len(),
            "submitting information"
        );
        match api.submit_info(&submission).await {
            Ok(created) => {
                info!(id = created.id, "information saved");
                self.phase = Phase::Closed;
                self.form.reset();
                self.notice = Some(Notice::Success(SUCCESS_NOTICE.into()));
                Ok(created)
            }
            Err(e) => {
                error!(error = %e, detail = %e.detail(), "information submission failed");
                self.phase = Phase::Open;
                self.notice = Some(Notice::Failure(FAILURE_NOTICE.into()));
                Err(SubmitError::Failed)
            }
        }
    }
}
