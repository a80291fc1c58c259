use crate::{EntitySchema, FieldValue};

/// A stored entity with a single identity field.
///
/// Implementations are normally generated by [`impl_record!`](crate::impl_record),
/// which enumerates the fields at compile time: forgetting a field in the
/// list is a compile error, not a silently skipped field.
pub trait Record: Clone + Default {
    /// Entity name used in keys, error messages and events (e.g. "tag").
    const ENTITY: &'static str;

    /// Rust name of the identity field.
    const IDENTITY_FIELD: &'static str;

    /// The identity key value.
    fn identity(&self) -> &str;

    /// The declared field list, identity first.
    fn schema() -> EntitySchema;

    /// Partial-update merge.
    ///
    /// Returns a new record where each non-identity field is taken from
    /// `next` if it is set there and from `previous` otherwise. The identity
    /// field always comes from `previous`. Collections are replaced whole.
    fn merge(previous: &Self, next: &Self) -> Self;

    /// `Self::merge(self, next)`.
    fn merged_with(&self, next: &Self) -> Self {
        Self::merge(self, next)
    }
}

/// The single-field merge rule: `next` wins unless it is the zero value.
pub fn pick<T: FieldValue + Clone>(previous: &T, next: &T) -> T {
    if next.is_unset() {
        previous.clone()
    } else {
        next.clone()
    }
}

/// Implements [`Record`] for a struct from its identity and field list.
///
/// ```ignore
/// impl_record!(Tag {
///     entity: "tag",
///     identity: name,
///     fields: [creator_id, description],
/// });
/// ```
///
/// Every struct field must appear exactly once, either as `identity` or in
/// `fields`. The struct must implement `Default` and `Clone`, and the
/// identity field must be a `String`.
#[macro_export]
macro_rules! impl_record {
    (
        $ty:ident {
            entity: $entity:literal,
            identity: $id:ident,
            fields: [$($field:ident),* $(,)?] $(,)?
        }
    ) => {
        impl $crate::Record for $ty {
            const ENTITY: &'static str = $entity;
            const IDENTITY_FIELD: &'static str = stringify!($id);

            fn identity(&self) -> &str {
                self.$id.as_str()
            }

            fn schema() -> $crate::EntitySchema {
                let sample = <Self as ::core::default::Default>::default();
                $crate::EntitySchema::new(
                    $entity,
                    vec![
                        $crate::FieldDescriptor::identity(stringify!($id), &sample.$id),
                        $($crate::FieldDescriptor::mergeable(stringify!($field), &sample.$field),)*
                    ],
                )
            }

            fn merge(previous: &Self, next: &Self) -> Self {
                Self {
                    $id: ::core::clone::Clone::clone(&previous.$id),
                    $($field: $crate::pick(&previous.$field, &next.$field),)*
                }
            }
        }
    };
}
