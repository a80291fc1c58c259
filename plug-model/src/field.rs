//! Zero-value predicates for record fields.

use crate::FieldType;
use plug_types::LedgerTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// A value that can sit in a mergeable record field.
///
/// `is_unset` is the zero-value test the merge engine uses to decide whether
/// an incoming value is an instruction to change the field.
pub trait FieldValue {
    /// Declared semantic type of the field.
    const FIELD_TYPE: FieldType;

    /// True if absence is tagged on the wire rather than inferred from the
    /// zero value.
    const EXPLICIT_PRESENCE: bool = false;

    /// True if this value is the zero value for its type.
    fn is_unset(&self) -> bool;
}

impl FieldValue for String {
    const FIELD_TYPE: FieldType = FieldType::Text;

    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl FieldValue for bool {
    const FIELD_TYPE: FieldType = FieldType::Bool;

    fn is_unset(&self) -> bool {
        !*self
    }
}

macro_rules! integer_field {
    ($($ty:ty),*) => {
        $(
            impl FieldValue for $ty {
                const FIELD_TYPE: FieldType = FieldType::Integer;

                fn is_unset(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

integer_field!(u8, u16, u32, u64, usize, i32, i64);

impl FieldValue for LedgerTime {
    const FIELD_TYPE: FieldType = FieldType::Timestamp;

    fn is_unset(&self) -> bool {
        self.is_zero()
    }
}

impl FieldValue for Vec<String> {
    const FIELD_TYPE: FieldType = FieldType::TextList;

    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl FieldValue for Vec<u32> {
    const FIELD_TYPE: FieldType = FieldType::IntegerList;

    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl FieldValue for Vec<u64> {
    const FIELD_TYPE: FieldType = FieldType::IntegerList;

    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl FieldValue for BTreeMap<u8, Vec<String>> {
    const FIELD_TYPE: FieldType = FieldType::CodeMap;

    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

/// A field value with an explicit "was it supplied" tag.
///
/// On the wire this is a plain optional value: a missing key or `null`
/// decodes to [`Presence::Absent`], anything else to
/// [`Presence::Present`], including zero values. Unlike a bare field, a
/// `Present(false)` or `Present(0)` does overwrite during a merge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Presence<T> {
    Absent,
    Present(T),
}

impl<T> Presence<T> {
    /// Returns the supplied value, if any.
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Presence::Absent => None,
            Presence::Present(v) => Some(v),
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Presence::Present(_))
    }
}

impl<T> Default for Presence<T> {
    fn default() -> Self {
        Presence::Absent
    }
}

impl<T> From<Option<T>> for Presence<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Presence::Present(v),
            None => Presence::Absent,
        }
    }
}

impl<T> From<Presence<T>> for Option<T> {
    fn from(value: Presence<T>) -> Self {
        match value {
            Presence::Present(v) => Some(v),
            Presence::Absent => None,
        }
    }
}

impl<T: FieldValue> FieldValue for Presence<T> {
    const FIELD_TYPE: FieldType = T::FIELD_TYPE;
    const EXPLICIT_PRESENCE: bool = true;

    fn is_unset(&self) -> bool {
        !self.is_present()
    }
}

impl<T: Serialize> Serialize for Presence<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_option().serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Presence<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Presence::from)
    }
}

/// Decodes `null` as the type's default value.
///
/// Go clients marshal nil slices and maps as `null`. Use on collection
/// fields with `#[serde(deserialize_with = "plug_model::null_as_default")]`
/// so those payloads read the same as an omitted field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
