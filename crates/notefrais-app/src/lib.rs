pub mod list;
pub mod new;
pub mod routes;

#[cfg(test)]
pub(crate) mod test_support;

pub use list::{BillsPage, ReceiptPreview};
pub use new::{NewBillPage, Submission};
pub use routes::{Navigator, Route, RouteBus};

use notefrais_core::session::UserProfile;
use notefrais_core::store::BillStore;

/// Wires the store and navigation collaborators to the two pages. The user
/// profile is captured once at construction and read-only afterwards.
pub struct App<'a> {
    pub store: &'a dyn BillStore,
    pub navigator: &'a dyn Navigator,
    pub user: UserProfile,
}

impl<'a> App<'a> {
    pub fn new(
        store: &'a dyn BillStore,
        navigator: &'a dyn Navigator,
        user: UserProfile,
    ) -> Self {
        Self {
            store,
            navigator,
            user,
        }
    }

    pub fn bills_page(&self) -> BillsPage<'_> {
        BillsPage::new(self)
    }

    pub fn new_bill_page(&self) -> NewBillPage<'_> {
        NewBillPage::new(self)
    }
}
