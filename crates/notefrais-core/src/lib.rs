pub mod bill;
pub mod date;
pub mod form;
pub mod receipt;
pub mod session;
pub mod sort;
pub mod store;
pub mod view;
