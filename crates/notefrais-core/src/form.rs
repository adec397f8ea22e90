use std::collections::BTreeMap;

use thiserror::Error;

use crate::bill::{Bill, BillStatus, is_known_expense_type};
use crate::date::parse_bill_date;
use crate::receipt::StagedReceipt;

/// Fallback VAT percentage when the field is left empty or non-numeric.
pub const DEFAULT_PCT: u32 = 20;
pub const MIN_NAME_LENGTH: usize = 5;

/// Raw field values exactly as entered in the new-bill form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillForm {
    pub expense_type: String,
    pub name: String,
    pub amount: String,
    pub date: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    ExpenseType,
    Name,
    Amount,
    Date,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Self::ExpenseType => "Type de dépense",
            Self::Name => "Nom de la dépense",
            Self::Amount => "Montant",
            Self::Date => "Date",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("expense name must contain at least {MIN_NAME_LENGTH} characters")]
    NameTooShort,
    #[error("amount must be a non-negative number")]
    InvalidAmount,
    #[error("date must be a valid calendar date in YYYY-MM-DD form")]
    InvalidDate,
    #[error("unknown expense type '{value}'")]
    UnknownExpenseType { value: String },
}

/// Outcome of validating one form. Field errors accumulate; none of the
/// rules short-circuits another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormReport {
    errors: BTreeMap<Field, FieldError>,
    pct: u32,
}

impl FormReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &BTreeMap<Field, FieldError> {
        &self.errors
    }

    pub fn error_for(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn first_invalid_field(&self) -> Option<Field> {
        self.errors.keys().next().copied()
    }

    /// The VAT percentage the bill will carry, after the empty/invalid
    /// fallback has been applied.
    pub fn pct(&self) -> u32 {
        self.pct
    }
}

pub fn validate(form: &BillForm) -> FormReport {
    let mut errors = BTreeMap::new();

    if form.name.trim().chars().count() < MIN_NAME_LENGTH {
        errors.insert(Field::Name, FieldError::NameTooShort);
    }

    match form.amount.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => {}
        _ => {
            errors.insert(Field::Amount, FieldError::InvalidAmount);
        }
    }

    if parse_bill_date(form.date.trim()).is_none() {
        errors.insert(Field::Date, FieldError::InvalidDate);
    }

    let expense_type = form.expense_type.trim();
    if !is_known_expense_type(expense_type) {
        errors.insert(
            Field::ExpenseType,
            FieldError::UnknownExpenseType {
                value: expense_type.to_string(),
            },
        );
    }

    let pct = form.pct.trim().parse::<u32>().unwrap_or(DEFAULT_PCT);

    FormReport { errors, pct }
}

/// Builds the pending bill a valid form produces. Callers must only pass a
/// report whose error map is empty.
pub fn build_bill(
    form: &BillForm,
    report: &FormReport,
    receipt: Option<&StagedReceipt>,
    email: &str,
) -> Bill {
    Bill {
        id: None,
        status: BillStatus::Pending,
        expense_type: form.expense_type.trim().to_string(),
        name: form.name.trim().to_string(),
        amount: form.amount.trim().parse().unwrap_or_default(),
        date: form.date.trim().to_string(),
        vat: form.vat.trim().to_string(),
        pct: report.pct(),
        commentary: form.commentary.trim().to_string(),
        file_url: receipt.map(|staged| staged.file_url.clone()).unwrap_or_default(),
        file_name: receipt.map(|staged| staged.file_name.clone()).unwrap_or_default(),
        email: email.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> BillForm {
        BillForm {
            expense_type: "Restaurants et bars".to_string(),
            name: "newBill".to_string(),
            amount: "200".to_string(),
            date: "2002-02-02".to_string(),
            vat: "40".to_string(),
            pct: "20".to_string(),
            commentary: "test2".to_string(),
        }
    }

    #[test]
    fn accepts_a_fully_valid_form() {
        let report = validate(&valid_form());
        assert!(report.is_valid());
        assert_eq!(report.pct(), 20);
    }

    #[test]
    fn short_name_is_the_only_error_when_the_rest_is_valid() {
        let mut form = valid_form();
        form.name = "a".to_string();

        let report = validate(&form);
        assert!(!report.is_valid());
        assert_eq!(report.errors().len(), 1);
        assert_eq!(report.error_for(Field::Name), Some(&FieldError::NameTooShort));
    }

    #[test]
    fn empty_pct_defaults_instead_of_failing() {
        let mut form = valid_form();
        form.pct = String::new();

        let report = validate(&form);
        assert!(report.is_valid());
        assert_eq!(report.pct(), DEFAULT_PCT);
    }

    #[test]
    fn non_numeric_pct_defaults_instead_of_failing() {
        let mut form = valid_form();
        form.pct = "vingt".to_string();

        assert_eq!(validate(&form).pct(), DEFAULT_PCT);
    }

    #[test]
    fn errors_accumulate_without_short_circuiting() {
        let form = BillForm {
            expense_type: "Cadeaux".to_string(),
            name: "ab".to_string(),
            amount: "-3".to_string(),
            date: "02/02/2002".to_string(),
            vat: String::new(),
            pct: String::new(),
            commentary: String::new(),
        };

        let report = validate(&form);
        assert_eq!(report.errors().len(), 4);
        assert_eq!(report.error_for(Field::Amount), Some(&FieldError::InvalidAmount));
        assert_eq!(report.error_for(Field::Date), Some(&FieldError::InvalidDate));
        assert!(matches!(
            report.error_for(Field::ExpenseType),
            Some(FieldError::UnknownExpenseType { .. })
        ));
    }

    #[test]
    fn amount_rejects_non_numbers_and_negatives() {
        for amount in ["", "abc", "-1", "NaN", "inf"] {
            let mut form = valid_form();
            form.amount = amount.to_string();
            let report = validate(&form);
            assert_eq!(
                report.error_for(Field::Amount),
                Some(&FieldError::InvalidAmount),
                "amount {amount:?} should be rejected"
            );
        }
    }

    #[test]
    fn name_length_counts_trimmed_characters() {
        let mut form = valid_form();
        form.name = "  ab  ".to_string();
        assert!(!validate(&form).is_valid());

        form.name = "  abcde  ".to_string();
        assert!(validate(&form).is_valid());
    }

    #[test]
    fn build_bill_is_pending_and_carries_the_staged_receipt() {
        let form = valid_form();
        let report = validate(&form);
        let staged = StagedReceipt {
            file_name: "image.png".to_string(),
            file_url: "https://uploads.example/image.png".to_string(),
        };

        let bill = build_bill(&form, &report, Some(&staged), "a@a");
        assert_eq!(bill.status, BillStatus::Pending);
        assert!(bill.id.is_none());
        assert_eq!(bill.amount, 200.0);
        assert_eq!(bill.file_name, "image.png");
        assert_eq!(bill.file_url, "https://uploads.example/image.png");
        assert_eq!(bill.email, "a@a");
    }

    #[test]
    fn build_bill_without_receipt_leaves_both_file_fields_empty() {
        let form = valid_form();
        let report = validate(&form);

        let bill = build_bill(&form, &report, None, "a@a");
        assert!(bill.file_url.is_empty());
        assert!(bill.file_name.is_empty());
    }
}
