//! Parsing of per-field tags.
//!
//! A tag takes the form `name` or `name,opt1,opt2`. The name segment may be
//! empty (`,omitempty`), in which case the field's declared identifier is
//! used. The sentinel name `-` suppresses the field entirely.
//!
//! Unknown options are ignored and malformed tags never produce an error.

use std::fmt;

/// The name given to fields which should never be encoded.
pub const SKIP: &str = "-";

/// An option recognised in a field tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TagOption {
    /// Omit the field when its value is empty.
    OmitEmpty,
    /// Encode booleans as `1`/`0`.
    Int,
    /// Encode timestamps as seconds since the Unix epoch.
    Unix,
    /// Join sequence elements with `,`.
    Comma,
    /// Join sequence elements with ` `.
    Space,
    /// Join sequence elements with `;`.
    Semicolon,
    /// Append `[]` to the key of each sequence element.
    Brackets,
    /// Append the element index to the key of each sequence element.
    Numbered,
}

impl TagOption {
    const ALL: [TagOption; 8] = [
        TagOption::OmitEmpty,
        TagOption::Int,
        TagOption::Unix,
        TagOption::Comma,
        TagOption::Space,
        TagOption::Semicolon,
        TagOption::Brackets,
        TagOption::Numbered,
    ];

    /// The option as it is written in a tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            TagOption::OmitEmpty => "omitempty",
            TagOption::Int => "int",
            TagOption::Unix => "unix",
            TagOption::Comma => "comma",
            TagOption::Space => "space",
            TagOption::Semicolon => "semicolon",
            TagOption::Brackets => "brackets",
            TagOption::Numbered => "numbered",
        }
    }

    /// Looks up an option by its exact tag spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|opt| opt.as_str() == name)
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for TagOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of options attached to a field.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TagOptions(u8);

impl TagOptions {
    /// An empty option set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns a copy of this set with `option` added.
    #[must_use]
    pub const fn with(self, option: TagOption) -> Self {
        Self(self.0 | option.bit())
    }

    /// Checks whether the set contains `option`.
    pub const fn contains(self, option: TagOption) -> bool {
        self.0 & option.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates over the options in the set.
    pub fn iter(self) -> impl Iterator<Item = TagOption> {
        TagOption::ALL
            .into_iter()
            .filter(move |opt| self.contains(*opt))
    }

    /// The delimiter used to join sequence elements into a single value, if
    /// any. `comma` takes precedence over `space`, which takes precedence
    /// over `semicolon`.
    pub fn delimiter(self) -> Option<char> {
        if self.contains(TagOption::Comma) {
            Some(',')
        } else if self.contains(TagOption::Space) {
            Some(' ')
        } else if self.contains(TagOption::Semicolon) {
            Some(';')
        } else {
            None
        }
    }
}

impl fmt::Debug for TagOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<TagOption> for TagOptions {
    fn from_iter<I: IntoIterator<Item = TagOption>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

/// A parsed field tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tag {
    name: &'static str,
    options: TagOptions,
}

impl Tag {
    /// Splits `tag` on commas. The first segment is the name, the remaining
    /// segments are options.
    pub fn parse(tag: &'static str) -> Self {
        let mut parts = tag.split(',');
        let name = parts.next().unwrap_or_default();
        let options = parts.filter_map(TagOption::from_name).collect();
        Self { name, options }
    }

    /// The name segment; empty when the declared identifier should be used.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn options(&self) -> TagOptions {
        self.options
    }

    /// Whether the field is suppressed by the `-` name.
    pub fn is_skipped(&self) -> bool {
        self.name == SKIP
    }
}
