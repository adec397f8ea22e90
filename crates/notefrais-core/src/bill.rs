use serde::{Deserialize, Serialize};

/// Expense category labels, exactly as the backend stores them.
pub const EXPENSE_TYPES: [&str; 7] = [
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

pub fn is_known_expense_type(value: &str) -> bool {
    EXPENSE_TYPES.contains(&value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "En attente",
            Self::Accepted => "Accepté",
            Self::Refused => "Refusé",
        }
    }
}

/// One submitted expense bill. Immutable once persisted; the store only
/// replaces whole records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    /// Assigned by the store on first persistence, absent before.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub status: BillStatus,
    pub expense_type: String,
    pub name: String,
    pub amount: f64,
    pub date: String,
    #[serde(default)]
    pub vat: String,
    pub pct: u32,
    #[serde(default)]
    pub commentary: String,
    /// Set together with `file_name` once a receipt has been accepted and
    /// uploaded; both stay empty until then.
    #[serde(default)]
    pub file_url: String,
    #[serde(default)]
    pub file_name: String,
    pub email: String,
}

impl Bill {
    pub fn has_receipt(&self) -> bool {
        !self.file_url.is_empty()
    }
}
