use serde::Serialize;

/// Describes a record type's declared fields.
///
/// Produced by [`Record::schema`](crate::Record::schema); the identity field
/// always comes first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySchema {
    pub entity: &'static str,
    pub identity: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

impl EntitySchema {
    /// Builds a schema from an ordered field list. The first descriptor
    /// flagged as identity names the identity field.
    pub fn new(entity: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        let identity = fields
            .iter()
            .find(|f| f.identity)
            .map(|f| f.name)
            .unwrap_or_default();
        Self {
            entity,
            identity,
            fields,
        }
    }

    /// Looks up a field by its Rust name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields the merge engine may overwrite.
    pub fn mergeable_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| !f.identity)
    }
}

/// One declared field of a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub field_type: FieldType,
    /// The identity key, excluded from merges.
    pub identity: bool,
    /// Absence is tagged explicitly (see [`Presence`](crate::Presence)), so
    /// zero values can be written.
    pub explicit_presence: bool,
}

impl FieldDescriptor {
    /// Descriptor for the identity field. The value is only used to infer
    /// the field type.
    pub fn identity<T: crate::FieldValue>(name: &'static str, _sample: &T) -> Self {
        Self {
            name,
            field_type: T::FIELD_TYPE,
            identity: true,
            explicit_presence: T::EXPLICIT_PRESENCE,
        }
    }

    /// Descriptor for a mergeable field.
    pub fn mergeable<T: crate::FieldValue>(name: &'static str, _sample: &T) -> Self {
        Self {
            name,
            field_type: T::FIELD_TYPE,
            identity: false,
            explicit_presence: T::EXPLICIT_PRESENCE,
        }
    }
}

/// The semantic type of a record field, which fixes its zero value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Empty string is zero.
    Text,
    /// `0` is zero.
    Integer,
    /// `false` is zero.
    Bool,
    /// `0001-01-01T00:00:00Z` is zero.
    Timestamp,
    TextList,
    IntegerList,
    /// Small integer code to list of strings (emoji reactions).
    CodeMap,
}

impl FieldType {
    /// Whether values of this type are replaced wholesale as collections.
    pub fn is_collection(self) -> bool {
        matches!(self, FieldType::TextList | FieldType::IntegerList | FieldType::CodeMap)
    }
}
