//! Data layer: core types, loading, filtering, and aggregation.
//!
//! ```text
//!  TB_Burden_Country.csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse + normalize rows → TbDataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ TbDataset  │  Vec<TbRecord>, distinct regions/countries, year span
//!   └───────────┘
//!        │
//!        ▼
//!   ┌──────────┐      ┌──────────────────────┐
//!   │  filter   │ ───▶ │ aggregate / series    │  chart-ready reductions
//!   └──────────┘      └──────────────────────┘
//! ```

use thiserror::Error;

pub mod aggregate;
pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod series;

#[cfg(test)]
pub(crate) mod test_support;

/// Errors produced by the data layer itself (as opposed to I/O failures,
/// which the loader reports through `anyhow` with file context).
#[derive(Error, Debug)]
pub enum DataError {
    #[error("unknown column or key: {0}")]
    UnknownColumn(String),
    #[error("dataset contains no rows")]
    EmptyDataset,
}
