pub(crate) mod bill_table;
pub(crate) mod modal;
pub(crate) mod text;
