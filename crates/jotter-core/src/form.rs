//! Note form controller
//!
//! [`FormController`] is the piece the presentation layer talks to. It holds
//! the raw field values, runs the validator, hands valid drafts to its
//! [`SubmissionCoordinator`], and tells the host when the form should close.
//!
//! ```text
//! Editing ──submit(invalid)──▶ Editing (field errors)
//! Editing ──submit(valid)────▶ Submitting ──ok──▶ Closed (host notified)
//!                                   └──────err──▶ Editing (banner, values kept)
//! any ─────cancel────────────▶ Closed (host notified, no submit)
//! ```
//!
//! All methods take `&self`, so a cancel can land while a submit is awaiting
//! the store. The late completion then leaves the closed form untouched.

use std::collections::BTreeSet;
use std::sync::Arc;

use jotter_config::FormComponentConfig;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::note::{Field, FormValues, Note};
use crate::submission::{SubmissionCoordinator, SubmissionState, SUBMISSION_ERROR_MESSAGE};
use crate::validation::{FieldErrors, ValidationResult, Validator};

/// Callback interface of whatever hosts the form (a modal, a page, a REPL)
pub trait FormHost: Send + Sync {
    /// The form is done and should be closed; called on cancel and after a
    /// successful save
    fn on_cancel(&self);
}

impl<F> FormHost for F
where
    F: Fn() + Send + Sync,
{
    fn on_cancel(&self) {
        self()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormPhase {
    Editing,
    Submitting,
    Closed,
}

/// What the presentation layer renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub phase: FormPhase,
    pub values: FormValues,
    /// Errors of touched fields only
    pub errors: FieldErrors,
    pub is_submitting: bool,
    pub submission_error: Option<String>,
    pub submit_label: &'static str,
}

/// Result of a [`FormController::submit`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent
    Invalid(FieldErrors),
    /// Form was closed or already submitting
    Ignored,
    /// Note saved and the form closed
    Saved(Note),
    /// Store failed; the form is editable again with a banner
    Failed,
    /// Completion arrived after the form was cancelled
    Discarded,
}

#[derive(Debug)]
struct FormInner {
    phase: FormPhase,
    values: FormValues,
    errors: FieldErrors,
    touched: BTreeSet<Field>,
    submission_error: Option<String>,
    host_notified: bool,
}

impl FormInner {
    fn new(values: FormValues) -> Self {
        Self {
            phase: FormPhase::Editing,
            values,
            errors: FieldErrors::new(),
            touched: BTreeSet::new(),
            submission_error: None,
            host_notified: false,
        }
    }

    /// Clear the draft and close; returns true if the host still needs telling
    fn close(&mut self) -> bool {
        self.phase = FormPhase::Closed;
        self.values = FormValues::default();
        self.errors.clear();
        self.touched.clear();
        self.submission_error = None;
        !std::mem::replace(&mut self.host_notified, true)
    }

    fn set_field_error(&mut self, field: Field, error: Option<String>) {
        match error {
            Some(message) => {
                self.errors.insert(field, message);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }
}

/// Settles a form whose submit future was dropped mid-flight
///
/// If the note was already created the form closes as on success;
/// otherwise it returns to `Editing` with the banner.
struct SubmittingGuard<'a> {
    form: &'a FormController,
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        let notify = {
            let mut inner = self.form.inner.lock();
            if inner.phase != FormPhase::Submitting {
                return;
            }
            match self.form.coordinator.state() {
                SubmissionState::Succeeded(note) => {
                    debug!(note_id = %note.id, "Submit dropped after save; closing form");
                    inner.close()
                }
                _ => {
                    inner.phase = FormPhase::Editing;
                    inner.submission_error = Some(SUBMISSION_ERROR_MESSAGE.to_string());
                    false
                }
            }
        };

        if notify {
            self.form.host.on_cancel();
        }
    }
}

pub struct FormController {
    inner: Mutex<FormInner>,
    validator: Validator,
    coordinator: SubmissionCoordinator,
    host: Arc<dyn FormHost>,
    config: FormComponentConfig,
}

impl FormController {
    /// Mount a form with default values, validator and config
    pub fn new(coordinator: SubmissionCoordinator, host: Arc<dyn FormHost>) -> Self {
        Self {
            inner: Mutex::new(FormInner::new(FormValues::default())),
            validator: Validator::default(),
            coordinator,
            host,
            config: FormComponentConfig::default(),
        }
    }

    #[must_use]
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: FormComponentConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from existing values instead of the defaults
    #[must_use]
    pub fn with_values(self, values: FormValues) -> Self {
        *self.inner.lock() = FormInner::new(values);
        self
    }

    pub fn coordinator(&self) -> &SubmissionCoordinator {
        &self.coordinator
    }

    pub fn phase(&self) -> FormPhase {
        self.inner.lock().phase
    }

    pub fn values(&self) -> FormValues {
        self.inner.lock().values.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.inner.lock().phase == FormPhase::Submitting
    }

    pub fn view(&self) -> FormView {
        let inner = self.inner.lock();
        let errors = inner
            .errors
            .iter()
            .filter(|(field, _)| inner.touched.contains(*field))
            .map(|(field, message)| (*field, message.clone()))
            .collect();
        let is_submitting = inner.phase == FormPhase::Submitting;

        FormView {
            phase: inner.phase,
            values: inner.values.clone(),
            errors,
            is_submitting,
            submission_error: inner.submission_error.clone(),
            submit_label: if is_submitting { "Saving..." } else { "Save" },
        }
    }

    /// Update one field. Shown errors stay until the next validation unless
    /// `revalidate_on_change` is set.
    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        let mut inner = self.inner.lock();
        if inner.phase == FormPhase::Closed {
            warn!(%field, "Edit on closed form ignored");
            return;
        }

        inner.values.set(field, value);
        if self.config.revalidate_on_change {
            let error = self.validator.validate_field(field, &inner.values);
            inner.set_field_error(field, error);
        }
    }

    /// Field lost focus: mark it touched and optionally re-validate it
    pub fn blur(&self, field: Field) {
        let mut inner = self.inner.lock();
        if inner.phase == FormPhase::Closed {
            return;
        }

        inner.touched.insert(field);
        if self.config.validate_on_blur {
            let error = self.validator.validate_field(field, &inner.values);
            inner.set_field_error(field, error);
        }
    }

    /// Validate and, if valid, submit the current values
    #[instrument(skip(self))]
    pub async fn submit(&self) -> SubmitOutcome {
        let draft = {
            let mut inner = self.inner.lock();
            if inner.phase != FormPhase::Editing {
                debug!(phase = ?inner.phase, "Submit ignored");
                return SubmitOutcome::Ignored;
            }

            inner.touched.extend(Field::ALL);
            match self.validator.validate(&inner.values) {
                ValidationResult::Invalid(errors) => {
                    debug!(fields = errors.len(), "Submit blocked by validation");
                    inner.errors = errors.clone();
                    return SubmitOutcome::Invalid(errors);
                }
                ValidationResult::Valid(draft) => {
                    inner.errors.clear();
                    inner.submission_error = None;
                    inner.phase = FormPhase::Submitting;
                    draft
                }
            }
        };

        let _guard = SubmittingGuard { form: self };
        let settled = self.coordinator.submit(draft).await;

        let (notify, outcome) = {
            let mut inner = self.inner.lock();
            if inner.phase != FormPhase::Submitting {
                debug!(phase = ?inner.phase, "Submission settled after form closed");
                return SubmitOutcome::Discarded;
            }

            match settled {
                SubmissionState::Succeeded(note) => {
                    let notify = inner.close();
                    (notify, SubmitOutcome::Saved(note))
                }
                SubmissionState::Failed(_) => {
                    inner.phase = FormPhase::Editing;
                    inner.submission_error = Some(SUBMISSION_ERROR_MESSAGE.to_string());
                    (false, SubmitOutcome::Failed)
                }
                SubmissionState::Pending | SubmissionState::Idle => {
                    warn!("Coordinator busy with another submission");
                    inner.phase = FormPhase::Editing;
                    (false, SubmitOutcome::Ignored)
                }
            }
        };

        if notify {
            self.host.on_cancel();
        }
        outcome
    }

    /// Close without submitting. Returns false if already closed.
    pub fn cancel(&self) -> bool {
        let notify = {
            let mut inner = self.inner.lock();
            if inner.phase == FormPhase::Closed {
                return false;
            }
            if inner.phase == FormPhase::Submitting {
                debug!("Cancelled while submitting; completion will be discarded");
            }
            inner.close()
        };

        if notify {
            self.host.on_cancel();
        }
        true
    }
}
