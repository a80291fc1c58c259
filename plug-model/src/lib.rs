//! Record model for plug chaincode.
//!
//! Defines the pieces every contract module shares:
//! - [`Record`]: a stored entity with one identity field and a merge rule
//! - [`FieldValue`]: the zero-value predicate behind partial updates
//! - [`EntitySchema`]: the declared field list of a record type
//! - [`Presence`]: an explicit "field supplied" wrapper for fields that
//!   must be clearable
//! - [`impl_record!`]: generates the `Record` impl from a field list
//!
//! # Partial updates
//!
//! An update payload names only the fields the caller wants to change.
//! Every field left out decodes to its zero value, and [`Record::merge`]
//! keeps the stored value for each of those. The identity field is never
//! overwritten. The flip side is that a zero value can never be written
//! through an update: `false`, `0`, `""` and empty collections all read as
//! "unchanged". Fields that need clearing should be declared as
//! `Presence<T>` instead.

mod field;
mod record;
mod schema;

pub use field::{FieldValue, Presence, null_as_default};
pub use record::{Record, pick};
pub use schema::{EntitySchema, FieldDescriptor, FieldType};
