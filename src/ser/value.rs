//! A borrowed view of a value, used to drive the encoder.
//!
//! Every type that can appear in a record implements [`ToQueryValue`], which
//! projects it onto one of a small set of [`Kind`]s. The encoder only ever
//! looks at this projection.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, SecondsFormat, TimeZone};
use indexmap::IndexMap;

use super::record::{EncodeValues, Record};
use super::tag::{TagOption, TagOptions};

/// Builds a default instance of a custom encoder for an absent reference.
pub type ZeroEncoder = fn() -> Box<dyn EncodeValues>;

/// The kind of a [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Int,
    Uint,
    Float,
    Char,
    String,
    Time,
    Seq,
    Map,
    Record,
    Custom,
    Ref,
    Nil,
}

impl Kind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::Char => "char",
            Kind::String => "string",
            Kind::Time => "time",
            Kind::Seq => "seq",
            Kind::Map => "map",
            Kind::Record => "record",
            Kind::Custom => "custom",
            Kind::Ref => "ref",
            Kind::Nil => "nil",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value as seen by the encoder.
pub enum Value<'a> {
    Bool(bool),
    Int(i64),
    Uint(u64),
    F32(f32),
    F64(f64),
    Char(char),
    Str(Cow<'a, str>),
    /// A timestamp, normalised to a fixed offset.
    Time(DateTime<FixedOffset>),
    Seq(Vec<Value<'a>>),
    /// Mapping entries, in the order they should be emitted.
    Map(Vec<(String, Value<'a>)>),
    Record(&'a dyn Record),
    /// A value which encodes itself.
    Custom(&'a dyn EncodeValues),
    /// A present nilable reference.
    Ref(Box<Value<'a>>),
    /// An absent nilable reference. Carries a constructor when the referenced
    /// type is a custom encoder, so it can still emit a default.
    Nil(Option<ZeroEncoder>),
}

impl<'a> Value<'a> {
    /// Wraps any `Display` type as a string leaf.
    pub fn display<T: fmt::Display + ?Sized>(value: &T) -> Value<'static> {
        Value::Str(Cow::Owned(value.to_string()))
    }

    pub fn custom(encoder: &'a dyn EncodeValues) -> Self {
        Value::Custom(encoder)
    }

    /// The absent form of a custom encoder type `T`.
    pub fn nil_encoder<T: EncodeValues + Default + 'static>() -> Value<'static> {
        fn zero<T: EncodeValues + Default + 'static>() -> Box<dyn EncodeValues> {
            Box::new(T::default())
        }
        Value::Nil(Some(zero::<T>))
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Uint(_) => Kind::Uint,
            Value::F32(_) | Value::F64(_) => Kind::Float,
            Value::Char(_) => Kind::Char,
            Value::Str(_) => Kind::String,
            Value::Time(_) => Kind::Time,
            Value::Seq(_) => Kind::Seq,
            Value::Map(_) => Kind::Map,
            Value::Record(_) => Kind::Record,
            Value::Custom(_) => Kind::Custom,
            Value::Ref(_) => Kind::Ref,
            Value::Nil(_) => Kind::Nil,
        }
    }

    /// Follows present references down to the referenced value. Stops at
    /// the first absent reference.
    pub fn resolve(self) -> Self {
        let mut value = self;
        loop {
            match value {
                Value::Ref(inner) => value = *inner,
                other => return other,
            }
        }
    }

    /// Borrowing counterpart of [`Value::resolve`].
    pub fn resolved(&self) -> &Self {
        let mut value = self;
        while let Value::Ref(inner) = value {
            value = inner.as_ref();
        }
        value
    }

    /// Whether the value is the zero value for its kind.
    ///
    /// Present references are never empty, even when they point at an empty
    /// value. Records and custom encoders are never empty. A `char` is empty
    /// when it is `'\0'`, the same as a zero integer code point.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Bool(b) => !*b,
            Value::Int(i) => *i == 0,
            Value::Uint(u) => *u == 0,
            Value::F32(f) => *f == 0.0,
            Value::F64(f) => *f == 0.0,
            Value::Char(c) => *c == '\0',
            Value::Str(s) => s.is_empty(),
            Value::Time(t) => is_zero_instant(t),
            Value::Seq(items) => items.is_empty(),
            Value::Map(entries) => entries.is_empty(),
            Value::Nil(_) => true,
            Value::Ref(_) | Value::Record(_) | Value::Custom(_) => false,
        }
    }

    /// Renders a leaf value as a string.
    ///
    /// Absent references render as the empty string. Composite values have
    /// no leaf form: sequences are joined with `,`, while records, maps and
    /// custom encoders render as the empty string.
    pub fn to_query_string(&self, opts: TagOptions) -> String {
        match self.resolved() {
            Value::Bool(b) if opts.contains(TagOption::Int) => {
                String::from(if *b { "1" } else { "0" })
            }
            Value::Bool(b) => String::from(if *b { "true" } else { "false" }),
            Value::Int(i) => itoa::Buffer::new().format(*i).to_owned(),
            Value::Uint(u) => itoa::Buffer::new().format(*u).to_owned(),
            Value::F32(f) => float_string(ryu::Buffer::new().format(*f)),
            Value::F64(f) => float_string(ryu::Buffer::new().format(*f)),
            Value::Char(c) => c.to_string(),
            Value::Str(s) => s.to_string(),
            Value::Time(t) if opts.contains(TagOption::Unix) => {
                itoa::Buffer::new().format(t.timestamp()).to_owned()
            }
            Value::Time(t) => t.to_rfc3339_opts(SecondsFormat::Secs, true),
            Value::Seq(items) => join(items, ',', opts),
            Value::Ref(inner) => inner.to_query_string(opts),
            Value::Nil(_) | Value::Record(_) | Value::Map(_) | Value::Custom(_) => String::new(),
        }
    }
}

/// Whole numbers render without a fractional part, so `2.0` is written as `2`.
fn float_string(formatted: &str) -> String {
    formatted
        .strip_suffix(".0")
        .unwrap_or(formatted)
        .to_owned()
}

/// Joins the string forms of `items` with `delim`. Nested sequences are
/// joined with the same delimiter.
pub(crate) fn join(items: &[Value<'_>], delim: char, opts: TagOptions) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(delim);
        }
        match item.resolved() {
            Value::Seq(inner) => out.push_str(&join(inner, delim, opts)),
            leaf => out.push_str(&leaf.to_query_string(opts)),
        }
    }
    out
}

/// The zero instant is midnight UTC on January 1st of year 1, whatever the
/// offset the timestamp is expressed in.
fn is_zero_instant(t: &DateTime<FixedOffset>) -> bool {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .is_some_and(|zero| t.naive_utc() == zero)
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Uint(u) => f.debug_tuple("Uint").field(u).finish(),
            Value::F32(x) => f.debug_tuple("F32").field(x).finish(),
            Value::F64(x) => f.debug_tuple("F64").field(x).finish(),
            Value::Char(c) => f.debug_tuple("Char").field(c).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Time(t) => f.debug_tuple("Time").field(t).finish(),
            Value::Seq(items) => f.debug_tuple("Seq").field(items).finish(),
            Value::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            Value::Record(_) => f.write_str("Record(..)"),
            Value::Custom(_) => f.write_str("Custom(..)"),
            Value::Ref(inner) => f.debug_tuple("Ref").field(inner).finish(),
            Value::Nil(zero) => f.debug_tuple("Nil").field(&zero.is_some()).finish(),
        }
    }
}

/// Conversion into a [`Value`].
///
/// Implemented for primitives, strings, timestamps, collections, `Option`
/// (the only nilable reference) and smart pointers (which are transparent).
/// Records implement it through the [`record!`](crate::record) macro and
/// custom encoders through [`custom_encoder!`](crate::custom_encoder).
pub trait ToQueryValue {
    fn to_query_value(&self) -> Value<'_>;

    /// The value of an absent `Option<Self>`.
    fn nil_value() -> Value<'static>
    where
        Self: Sized,
    {
        Value::Nil(None)
    }
}

macro_rules! to_query_value_as {
    ($variant:ident, $target:ty: $($ty:ty),*) => {
        $(
            impl ToQueryValue for $ty {
                fn to_query_value(&self) -> Value<'_> {
                    Value::$variant(*self as $target)
                }
            }
        )*
    };
}

to_query_value_as!(Int, i64: i8, i16, i32, i64, isize);
to_query_value_as!(Uint, u64: u8, u16, u32, u64, usize);

impl ToQueryValue for bool {
    fn to_query_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl ToQueryValue for f32 {
    fn to_query_value(&self) -> Value<'_> {
        Value::F32(*self)
    }
}

impl ToQueryValue for f64 {
    fn to_query_value(&self) -> Value<'_> {
        Value::F64(*self)
    }
}

impl ToQueryValue for char {
    fn to_query_value(&self) -> Value<'_> {
        Value::Char(*self)
    }
}

impl ToQueryValue for str {
    fn to_query_value(&self) -> Value<'_> {
        Value::Str(Cow::Borrowed(self))
    }
}

impl ToQueryValue for String {
    fn to_query_value(&self) -> Value<'_> {
        Value::Str(Cow::Borrowed(self))
    }
}

impl ToQueryValue for Cow<'_, str> {
    fn to_query_value(&self) -> Value<'_> {
        Value::Str(Cow::Borrowed(self))
    }
}

/// The untyped nil.
impl ToQueryValue for () {
    fn to_query_value(&self) -> Value<'_> {
        Value::Nil(None)
    }
}

impl<Tz: TimeZone> ToQueryValue for DateTime<Tz> {
    fn to_query_value(&self) -> Value<'_> {
        Value::Time(self.with_timezone(&self.offset().fix()))
    }
}

impl<T: ToQueryValue> ToQueryValue for Option<T> {
    fn to_query_value(&self) -> Value<'_> {
        match self {
            Some(value) => Value::Ref(Box::new(value.to_query_value())),
            None => T::nil_value(),
        }
    }
}

macro_rules! transparent {
    ($($ty:ty),*) => {
        $(
            impl<T: ToQueryValue + ?Sized> ToQueryValue for $ty {
                fn to_query_value(&self) -> Value<'_> {
                    (**self).to_query_value()
                }
            }
        )*
    };
}

transparent!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

macro_rules! sequence {
    ($($ty:ty),*) => {
        $(
            impl<T: ToQueryValue> ToQueryValue for $ty {
                fn to_query_value(&self) -> Value<'_> {
                    Value::Seq(self.iter().map(|item| item.to_query_value()).collect())
                }
            }
        )*
    };
}

sequence!([T], Vec<T>, VecDeque<T>, BTreeSet<T>);

impl<T: ToQueryValue, const N: usize> ToQueryValue for [T; N] {
    fn to_query_value(&self) -> Value<'_> {
        self.as_slice().to_query_value()
    }
}

impl<K: fmt::Display, V: ToQueryValue> ToQueryValue for BTreeMap<K, V> {
    fn to_query_value(&self) -> Value<'_> {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.to_string(), v.to_query_value()))
                .collect(),
        )
    }
}

impl<K: fmt::Display, V: ToQueryValue, S> ToQueryValue for IndexMap<K, V, S> {
    fn to_query_value(&self) -> Value<'_> {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.to_string(), v.to_query_value()))
                .collect(),
        )
    }
}

/// Entries are emitted in key order.
impl<K: fmt::Display, V: ToQueryValue, S> ToQueryValue for HashMap<K, V, S> {
    fn to_query_value(&self) -> Value<'_> {
        let mut entries: Vec<_> = self
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_query_value()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Value::Map(entries)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::ser::tag::Tag;

    fn opts(tag: &'static str) -> TagOptions {
        Tag::parse(tag).options()
    }

    #[test]
    fn empty_scalars() {
        assert!(false.to_query_value().is_empty());
        assert!(!true.to_query_value().is_empty());
        assert!(0i32.to_query_value().is_empty());
        assert!(!(-1i64).to_query_value().is_empty());
        assert!(0u8.to_query_value().is_empty());
        assert!(0.0f64.to_query_value().is_empty());
        assert!(!0.5f32.to_query_value().is_empty());
        assert!("".to_query_value().is_empty());
        assert!(!"a".to_query_value().is_empty());
        assert!('\0'.to_query_value().is_empty());
        assert!(!'a'.to_query_value().is_empty());
    }

    #[test]
    fn empty_collections() {
        assert!(Vec::<u8>::new().to_query_value().is_empty());
        assert!(!vec![0u8].to_query_value().is_empty());
        assert!(BTreeMap::<String, u8>::new().to_query_value().is_empty());
        assert!(BTreeSet::<u8>::new().to_query_value().is_empty());
        assert!(<[u8; 0]>::default().to_query_value().is_empty());
    }

    #[test]
    fn empty_references() {
        assert!(None::<u8>.to_query_value().is_empty());
        // a present reference is never empty, even to a zero value
        assert!(!Some(0u8).to_query_value().is_empty());
        assert!(!Some(None::<u8>).to_query_value().is_empty());
        assert!(().to_query_value().is_empty());
    }

    #[test]
    fn empty_timestamps() {
        let zero = Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap();
        assert!(zero.to_query_value().is_empty());

        let offset = FixedOffset::east_opt(3600).unwrap();
        assert!(zero.with_timezone(&offset).to_query_value().is_empty());

        let epoch = Utc.timestamp_opt(0, 0).unwrap();
        assert!(!epoch.to_query_value().is_empty());
    }

    #[test]
    fn booleans() {
        assert_eq!(true.to_query_value().to_query_string(opts("")), "true");
        assert_eq!(false.to_query_value().to_query_string(opts("")), "false");
        assert_eq!(true.to_query_value().to_query_string(opts(",int")), "1");
        assert_eq!(false.to_query_value().to_query_string(opts(",int")), "0");
    }

    #[test]
    fn numbers() {
        assert_eq!((-42i8).to_query_value().to_query_string(opts("")), "-42");
        assert_eq!(u64::MAX.to_query_value().to_query_string(opts("")), "18446744073709551615");
        assert_eq!(1.5f64.to_query_value().to_query_string(opts("")), "1.5");
        assert_eq!(0.1f32.to_query_value().to_query_string(opts("")), "0.1");
        assert_eq!(2.0f64.to_query_value().to_query_string(opts("")), "2");
        assert_eq!((-3.0f32).to_query_value().to_query_string(opts("")), "-3");
        assert_eq!(1e21f64.to_query_value().to_query_string(opts("")), "1e21");
    }

    #[test]
    fn timestamps() {
        let t = Utc.with_ymd_and_hms(2000, 1, 1, 12, 34, 56).unwrap();
        assert_eq!(t.to_query_value().to_query_string(opts("")), "2000-01-01T12:34:56Z");
        assert_eq!(t.to_query_value().to_query_string(opts(",unix")), "946730096");

        let offset = FixedOffset::west_opt(8 * 3600).unwrap();
        let t = offset.with_ymd_and_hms(2000, 1, 1, 4, 34, 56).unwrap();
        assert_eq!(
            t.to_query_value().to_query_string(opts("")),
            "2000-01-01T04:34:56-08:00"
        );
        assert_eq!(t.to_query_value().to_query_string(opts(",unix")), "946730096");
    }

    #[test]
    fn references() {
        assert_eq!(None::<bool>.to_query_value().to_query_string(opts("")), "");
        assert_eq!(Some(Some(7u8)).to_query_value().to_query_string(opts("")), "7");
        assert_eq!(Box::new('x').to_query_value().to_query_string(opts("")), "x");
    }

    #[test]
    fn display_values() {
        let addr = std::net::Ipv4Addr::new(127, 0, 0, 1);
        assert_eq!(Value::display(&addr).to_query_string(opts("")), "127.0.0.1");
    }

    #[test]
    fn joins_nested_sequences() {
        let nested = vec![vec![1, 2], vec![3]];
        let Value::Seq(items) = nested.to_query_value() else {
            panic!("expected a sequence");
        };
        assert_eq!(join(&items, ';', opts("")), "1;2;3");
    }

    #[test]
    fn hash_maps_are_sorted() {
        let map: HashMap<&str, u8> = [("b", 2), ("a", 1), ("c", 3)].into_iter().collect();
        let Value::Map(entries) = map.to_query_value() else {
            panic!("expected a map");
        };
        let keys: Vec<_> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["a", "b", "c"]);
    }

    #[test]
    fn kinds() {
        assert_eq!(1u8.to_query_value().kind(), Kind::Uint);
        assert_eq!(Some(1u8).to_query_value().kind(), Kind::Ref);
        assert_eq!(Some(1u8).to_query_value().resolve().kind(), Kind::Uint);
        assert_eq!(Some(None::<u8>).to_query_value().resolve().kind(), Kind::Nil);
        assert_eq!(Kind::Record.to_string(), "record");
    }
}
