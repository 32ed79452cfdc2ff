//! Concrete layout strategies and the branch builders of parallel containers.

pub mod block;
pub mod line;
pub mod list_item;
pub mod list_utils;
pub mod partition_solver;
pub mod table_row;
