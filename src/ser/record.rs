//! Field descriptor tables and the custom encoder capability.

use super::tag::Tag;
use super::value::ToQueryValue;
use crate::Values;

/// The error type returned by custom encoders.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Implemented by types which encode themselves into [`Values`] in a
/// non-standard way.
///
/// `key` is the fully scoped name of the field being encoded. The
/// implementation may add any number of entries, under that key or others.
/// An error aborts the whole encoding call.
///
/// Pair an implementation with [`custom_encoder!`](crate::custom_encoder) so
/// fields of the type are dispatched to it.
pub trait EncodeValues {
    fn encode_values(&self, key: &str, values: &mut Values) -> Result<(), BoxError>;
}

/// Describes one field of a [`Record`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    ident: &'static str,
    tag: Tag,
    exported: bool,
    embedded: bool,
}

impl Field {
    /// A visible, non-embedded field with the given declared identifier and
    /// raw tag.
    pub fn new(ident: &'static str, tag: &'static str) -> Self {
        Self {
            ident,
            tag: Tag::parse(tag),
            exported: true,
            embedded: false,
        }
    }

    /// Marks the field as embedded. An embedded record without an explicit
    /// name has its fields promoted into the enclosing record.
    #[must_use]
    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    /// Marks the field as hidden. Hidden fields are skipped unless they are
    /// embedded.
    #[must_use]
    pub fn unexported(mut self) -> Self {
        self.exported = false;
        self
    }

    pub fn ident(&self) -> &'static str {
        self.ident
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn is_exported(&self) -> bool {
        self.exported
    }

    pub fn is_embedded(&self) -> bool {
        self.embedded
    }
}

/// A record: a value made of named fields.
///
/// Usually implemented with the [`record!`](crate::record) macro.
pub trait Record {
    /// The field table, in declaration order.
    fn fields(&self) -> &'static [Field];

    /// The field values, in the same order as [`Record::fields`].
    fn field_values(&self) -> Vec<&dyn ToQueryValue>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ser::tag::TagOption;

    #[test]
    fn field_defaults() {
        let field = Field::new("Page", "page,omitempty");
        assert_eq!(field.ident(), "Page");
        assert_eq!(field.tag().name(), "page");
        assert!(field.tag().options().contains(TagOption::OmitEmpty));
        assert!(field.is_exported());
        assert!(!field.is_embedded());
    }

    #[test]
    fn field_flags() {
        let field = Field::new("inner", "").embedded().unexported();
        assert!(field.is_embedded());
        assert!(!field.is_exported());
    }
}
