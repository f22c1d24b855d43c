//! guidedoc: extract API guide documentation from `###*` doc-comment blocks.
//!
//! Source files are scanned for doc-comment blocks; each block becomes a
//! class (`@class`) or a function (`@method`) with its `@param`s. Classes and
//! functions are then grouped by guide id into a [`FeatureIndex`]. The
//! changelog is split into [`Release`]s.

pub mod changelog;
pub mod config;
pub mod error;
pub mod feature;
pub mod index;
pub mod model;
pub mod parser;
pub mod repository;
pub mod unindent;
pub mod vcs;

pub use changelog::{Changelog, Release};
pub use config::Config;
pub use error::{Error, Result};
pub use feature::{Feature, FeatureKind};
pub use index::{Entry, FeatureIndex};
pub use model::{Function, Klass, Parameter, Visibility};
pub use parser::{ParseContext, Parsed};
pub use repository::Repository;
pub use vcs::{GitCli, VersionControl};
