//! Reusable page building blocks.

pub mod data_table;

pub use data_table::{PAGE_SIZE, Page, Searchable, filter_rows, paginate};
