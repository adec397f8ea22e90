use std::cell::Cell;

use notefrais_core::bill::Bill;
use notefrais_core::sort::sort_bills_latest_first;
use notefrais_core::view::ViewState;

use crate::{App, Route};

/// Payload for the receipt modal, only produced for bills that actually
/// carry an uploaded receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptPreview {
    pub file_url: String,
    pub file_name: String,
}

/// The bills list page: fetch, sort, render state.
pub struct BillsPage<'a> {
    app: &'a App<'a>,
    in_flight: Cell<bool>,
}

impl<'a> BillsPage<'a> {
    pub(crate) fn new(app: &'a App<'a>) -> Self {
        Self {
            app,
            in_flight: Cell::new(false),
        }
    }

    /// Fetches and orders the bill collection. Returns `None` when a fetch
    /// is already in flight; the duplicate request is dropped, not queued.
    pub fn load(&self) -> Option<ViewState> {
        if self.in_flight.replace(true) {
            tracing::debug!("bills fetch already in flight, ignoring");
            return None;
        }

        let state = match self.app.store.fetch_all() {
            Ok(mut bills) => {
                sort_bills_latest_first(&mut bills);
                tracing::debug!(count = bills.len(), "bills fetched");
                ViewState::ready(bills)
            }
            Err(error) => ViewState::failed(error.to_string()),
        };

        self.in_flight.set(false);
        Some(state)
    }

    /// No-op (returns `None`) for bills without an uploaded receipt.
    pub fn open_receipt(&self, bill: &Bill) -> Option<ReceiptPreview> {
        if !bill.has_receipt() {
            return None;
        }

        Some(ReceiptPreview {
            file_url: bill.file_url.clone(),
            file_name: bill.file_name.clone(),
        })
    }

    /// One navigation transition to the submission view, no validation.
    pub fn go_to_new_bill(&self) {
        self.app.navigator.navigate(Route::NewBill);
    }
}
