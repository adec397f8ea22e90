use notefrais_core::form::{self, BillForm, FormReport};
use notefrais_core::receipt::{ReceiptError, StagedReceipt, validate_receipt_filename};

use crate::{App, Route};

/// Outcome of one submit action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Field errors to surface inline; the store was not called.
    Invalid(FormReport),
    /// The bill was persisted and the single navigation transition fired.
    Created,
    /// The store rejected the create; the message is verbatim and no
    /// navigation happened.
    Failed { message: String },
}

/// The new-bill page, tracking one in-progress draft: a staged receipt (or
/// none), the visible file error, and the in-flight submission guard.
pub struct NewBillPage<'a> {
    app: &'a App<'a>,
    staged: Option<StagedReceipt>,
    file_error: Option<ReceiptError>,
    in_flight: bool,
}

impl<'a> NewBillPage<'a> {
    pub(crate) fn new(app: &'a App<'a>) -> Self {
        Self {
            app,
            staged: None,
            file_error: None,
            in_flight: false,
        }
    }

    pub fn staged_receipt(&self) -> Option<&StagedReceipt> {
        self.staged.as_ref()
    }

    pub fn file_error(&self) -> Option<&ReceiptError> {
        self.file_error.as_ref()
    }

    /// Validates the picked file. On rejection the pending file is
    /// discarded, the file-error affordance becomes visible, and any
    /// previously staged receipt stays untouched.
    pub fn select_file(&mut self, file_name: &str, file_url: &str) -> Result<(), ReceiptError> {
        match validate_receipt_filename(file_name) {
            Ok(()) => {
                self.staged = Some(StagedReceipt {
                    file_name: file_name.to_string(),
                    file_url: file_url.to_string(),
                });
                self.file_error = None;
                Ok(())
            }
            Err(error) => {
                tracing::debug!(file_name, "receipt file rejected");
                self.file_error = Some(error.clone());
                Err(error)
            }
        }
    }

    /// Validation, then persistence, then navigation; each step only runs
    /// once its predecessor succeeded. Returns `None` when a submission is
    /// already in flight.
    pub fn submit(&mut self, form: &BillForm) -> Option<Submission> {
        if self.in_flight {
            tracing::debug!("bill submission already in flight, ignoring");
            return None;
        }

        let report = form::validate(form);
        if !report.is_valid() {
            return Some(Submission::Invalid(report));
        }

        let bill = form::build_bill(form, &report, self.staged.as_ref(), &self.app.user.email);

        self.in_flight = true;
        let outcome = match self.app.store.create(&bill) {
            Ok(_) => {
                tracing::info!(name = %bill.name, "bill created");
                self.app.navigator.navigate(Route::Bills);
                Submission::Created
            }
            Err(error) => Submission::Failed {
                message: error.to_string(),
            },
        };
        self.in_flight = false;

        Some(outcome)
    }
}
