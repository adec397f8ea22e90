use crate::bill::Bill;

/// Transient state for one render cycle of the bills list view. Built by the
/// list page, consumed by a front end, then discarded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub loading: bool,
    pub error: Option<String>,
    pub bills: Vec<Bill>,
}

/// Exactly one render instruction per state.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderPlan<'a> {
    Loading,
    Error(&'a str),
    List(&'a [Bill]),
}

impl ViewState {
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            loading: false,
            error: Some(message.into()),
            bills: Vec::new(),
        }
    }

    pub fn ready(bills: Vec<Bill>) -> Self {
        Self {
            loading: false,
            error: None,
            bills,
        }
    }

    /// Fixed precedence: loading beats error beats the list. An empty list
    /// renders as an empty list, never as an error.
    pub fn plan(&self) -> RenderPlan<'_> {
        if self.loading {
            return RenderPlan::Loading;
        }

        match self.error.as_deref() {
            Some(message) if !message.is_empty() => RenderPlan::Error(message),
            _ => RenderPlan::List(&self.bills),
        }
    }
}
