//! Class-model materialization and flat JSON deltas.
//!
//! A flat model (Class, Attribute and Aggregation records) is indexed once by
//! [`RelationIndex`]; [`TreeBuilder`] turns it into a nested document and
//! [`MetadataExporter`] into per-class metadata. Independently, [`delta::diff`]
//! and [`Patcher`] compute and apply edits between flat key/value documents.

pub mod cli;
pub mod config;
pub mod delta;
pub mod error;
pub mod export;
pub mod index;
pub mod io;
pub mod logging;
pub mod model;
pub mod tree;

pub use config::Settings;
pub use delta::{DeltaDocument, FlatDocument, KeyClass, PatchMode, Patcher};
pub use error::{DocumentError, ExportError, IndexError, MultiplicityError, TreeError};
pub use export::{CardinalityPolicy, MetadataExporter, MetadataRecord, Parameter};
pub use index::{ClassIndexEntry, RelationIndex};
pub use model::{AttributeRecord, ClassRecord, ModelElement, Multiplicity, RelationEdge};
pub use tree::{Field, TreeBuilder, TreeNode};
