use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use notefrais_core::bill::{Bill, BillStatus};
use notefrais_core::session::{Role, UserProfile};
use notefrais_core::store::{BillStore, StoreError};

use crate::routes::{Navigator, Route};

/// Shared event log used to assert cross-collaborator ordering.
pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    FetchAll,
    Create(Bill),
    Update(Bill),
}

#[derive(Default)]
pub struct ScriptedStore {
    responses: Mutex<VecDeque<Result<Vec<Bill>, StoreError>>>,
    calls: Mutex<Vec<StoreCall>>,
    journal: Option<Journal>,
}

impl ScriptedStore {
    pub fn new(responses: Vec<Result<Vec<Bill>, StoreError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
            journal: None,
        }
    }

    pub fn with_journal(responses: Vec<Result<Vec<Bill>, StoreError>>, journal: Journal) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
            journal: Some(journal),
        }
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: StoreCall, label: &str) -> Result<Vec<Bill>, StoreError> {
        self.calls.lock().expect("calls lock").push(call);
        if let Some(journal) = &self.journal {
            journal.lock().expect("journal lock").push(label.to_string());
        }

        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| Err(StoreError::new("missing scripted response")))
    }
}

impl BillStore for ScriptedStore {
    fn fetch_all(&self) -> Result<Vec<Bill>, StoreError> {
        self.record(StoreCall::FetchAll, "fetch_all")
    }

    fn create(&self, bill: &Bill) -> Result<Vec<Bill>, StoreError> {
        self.record(StoreCall::Create(bill.clone()), "create")
    }

    fn update(&self, bill: &Bill) -> Result<Vec<Bill>, StoreError> {
        self.record(StoreCall::Update(bill.clone()), "update")
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
    journal: Option<Journal>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_journal(journal: Journal) -> Self {
        Self {
            routes: Mutex::new(Vec::new()),
            journal: Some(journal),
        }
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().expect("routes lock").clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().expect("routes lock").push(route);
        if let Some(journal) = &self.journal {
            journal
                .lock()
                .expect("journal lock")
                .push(format!("navigate:{}", route.path()));
        }
    }
}

pub fn bill(name: &str, date: &str) -> Bill {
    Bill {
        id: Some(format!("bill-{name}")),
        status: BillStatus::Pending,
        expense_type: "Transports".to_string(),
        name: name.to_string(),
        amount: 100.0,
        date: date.to_string(),
        vat: "20".to_string(),
        pct: 20,
        commentary: String::new(),
        file_url: String::new(),
        file_name: String::new(),
        email: "employee@test.tld".to_string(),
    }
}

pub fn employee() -> UserProfile {
    UserProfile {
        email: "employee@test.tld".to_string(),
        role: Role::Employee,
    }
}
