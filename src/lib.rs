//! Data preparation core for the WHO tuberculosis burden dataset.
//!
//! Loads `TB_Burden_Country.csv`, canonicalizes the region/country labels,
//! applies sidebar-style filters (region set, inclusive year range, optional
//! country set), and computes the grouped reductions the dashboard charts
//! consume. Chart rendering itself is out of scope; everything here returns
//! plain tables and maps.

pub mod data;
pub mod session;

pub use data::filter::{filter_records, FilterCriteria};
pub use data::model::{AggregateOp, GroupKey, Measure, TbDataset, TbRecord};
pub use data::DataError;
