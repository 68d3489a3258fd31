#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # geo-hierarchy
//!
//! Denormalized views of the province → district → sub-district chain.
//!
//! - **Parent-rooted**: each province embeds its `districts`, each district
//!   embeds its `sub_districts`.
//! - **Child-rooted**: each sub-district embeds its `district`, which
//!   embeds its `province`. Parents that do not resolve are left out and
//!   reported as [`Notice`]s.
//!
//! ## Example Usage
//!
//! ```rust
//! use geo_hierarchy::HierarchyBuilder;
//! use geo_model::{Catalog, Record};
//! use serde_json::json;
//!
//! let record = |v: serde_json::Value| -> Record { v.as_object().cloned().unwrap() };
//! let catalog = Catalog::default();
//! let builder = HierarchyBuilder::new(&catalog).unwrap();
//!
//! let provinces = vec![record(json!({"id": 1, "name_en": "Bangkok"}))];
//! let districts = vec![record(json!({"id": 11, "province_id": 1}))];
//! let subs = vec![record(json!({"id": 111, "district_id": 11, "zip_code": "10200"}))];
//!
//! let nested = builder.build_parent_rooted(&provinces, &districts, &subs);
//! assert_eq!(nested[0]["districts"][0]["sub_districts"][0]["id"], json!(111));
//!
//! let view = builder.build_child_rooted(&subs, &districts, &provinces);
//! assert_eq!(view.records[0]["district"]["province"]["name_en"], json!("Bangkok"));
//! ```

pub mod builder;
pub mod notice;

pub use builder::{ChildRooted, HierarchyBuilder};
pub use notice::Notice;

use thiserror::Error;

/// Errors that can occur when setting up the hierarchy builder
#[derive(Error, Debug)]
pub enum Error {
    #[error("Catalog error: {0}")]
    Catalog(#[from] geo_model::Error),

    #[error("Table has no foreign key to its parent: {0}")]
    MissingForeignKey(String),
}

pub type Result<T> = std::result::Result<T, Error>;
