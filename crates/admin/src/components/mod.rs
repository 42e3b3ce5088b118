//! Reusable UI component descriptions shared by admin templates.

pub mod data_table;

pub use data_table::{DataTableConfig, FilterOption, FilterType, TableColumn, TableFilter};
