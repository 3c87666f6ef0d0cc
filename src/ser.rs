//! Encoding of records into query values.

pub(crate) mod encode;
mod record;
mod tag;
mod value;

pub use record::{BoxError, EncodeValues, Field, Record};
pub use tag::{Tag, TagOption, TagOptions};
pub use value::{Kind, ToQueryValue, Value, ZeroEncoder};

use tracing::{debug, trace};

use crate::error::*;
use crate::{Config, Values};

/// Encodes a record into [`Values`].
///
/// ```
/// use query_values::record;
///
/// struct Options {
///     query: String,
///     show_all: bool,
///     page: u32,
/// }
///
/// record! {
///     Options {
///         query => "q",
///         show_all => "all",
///         page => "page",
///     }
/// }
///
/// let opt = Options { query: "foo".to_owned(), show_all: true, page: 2 };
/// let values = query_values::to_values(&opt).unwrap();
///
/// assert_eq!(values.get("q"), Some("foo"));
/// assert_eq!(values.get("all"), Some("true"));
/// assert_eq!(values.get("page"), Some("2"));
/// ```
///
/// The input must be a record, or an `Option` of one. An absent `Option`
/// (or `()`) encodes as empty values; any other kind is an
/// [`Error::InvalidInputKind`].
pub fn to_values<T: ToQueryValue + ?Sized>(input: &T) -> Result<Values> {
    Config::default().values(input)
}

/// Encodes a record straight into a querystring.
///
/// ```
/// use query_values::record;
///
/// struct Query {
///     name: String,
///     tags: Vec<&'static str>,
/// }
///
/// record! {
///     Query {
///         name,
///         tags => "tag,brackets",
///     }
/// }
///
/// let q = Query { name: "Alice Smith".to_owned(), tags: vec!["a", "b"] };
/// assert_eq!(
///     query_values::to_string(&q).unwrap(),
///     "name=Alice+Smith&tag[]=a&tag[]=b"
/// );
/// ```
pub fn to_string<T: ToQueryValue + ?Sized>(input: &T) -> Result<String> {
    Config::default().to_string(input)
}

/// Walks a value tree and appends the flattened entries to a [`Values`].
///
/// ## Implementation Details
///
/// Fields are visited in declaration order. Nested records extend the
/// scope, so `{user: {name: "John"}}` is written as `user[name]=John`.
/// Embedded records without an explicit name are set aside and encoded
/// after the direct fields, in the enclosing scope. All levels write into
/// the same map.
pub struct ValuesEncoder<'v> {
    values: &'v mut Values,
    config: Config,
}

impl<'v> ValuesEncoder<'v> {
    pub fn new(values: &'v mut Values, config: Config) -> Self {
        Self { values, config }
    }

    /// Encodes a top level value, which must resolve to a record or to an
    /// absent reference.
    pub fn encode_top_level(&mut self, value: Value<'_>) -> Result<()> {
        debug!(kind = %value.kind(), "encoding query values");
        match value.resolve() {
            Value::Nil(_) => Ok(()),
            Value::Record(record) => self.encode_record(record, "", 0),
            other => Err(Error::InvalidInputKind(other.kind())),
        }
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        match self.config.depth_limit() {
            Some(max) if depth > max => Err(Error::DepthExceeded(max)),
            _ => Ok(()),
        }
    }

    /// Encodes the fields of `record`, prefixing their names with `scope`.
    pub fn encode_record(&mut self, record: &dyn Record, scope: &str, depth: usize) -> Result<()> {
        self.check_depth(depth)?;

        let mut embedded = Vec::new();
        for (field, value) in record.fields().iter().zip(record.field_values()) {
            if !field.is_exported() && !field.is_embedded() {
                trace!(field = field.ident(), "skipping unexported field");
                continue;
            }

            let tag = field.tag();
            if tag.is_skipped() {
                trace!(field = field.ident(), "skipping field tagged `-`");
                continue;
            }

            let value = value.to_query_value();
            let mut name = tag.name();
            if name.is_empty() {
                if field.is_embedded() {
                    if let Value::Record(inner) = value {
                        trace!(field = field.ident(), "deferring embedded record");
                        embedded.push(inner);
                        continue;
                    }
                }
                name = field.ident();
            }

            let name = if scope.is_empty() {
                name.to_owned()
            } else {
                format!("{scope}[{name}]")
            };

            let opts = tag.options();
            if opts.contains(TagOption::OmitEmpty) && value.is_empty() {
                trace!(%name, "omitting empty field");
                continue;
            }

            self.encode_value(name, value, opts, depth)?;
        }

        // embedded records share the enclosing record's scope
        for inner in embedded {
            self.encode_record(inner, scope, depth)?;
        }
        Ok(())
    }

    /// Encodes a single value under the fully scoped `name`.
    fn encode_value(
        &mut self,
        name: String,
        value: Value<'_>,
        opts: TagOptions,
        depth: usize,
    ) -> Result<()> {
        match value.resolved() {
            Value::Custom(encoder) => {
                trace!(%name, "using custom encoder");
                return encoder
                    .encode_values(&name, self.values)
                    .map_err(Error::Encoder);
            }
            Value::Nil(Some(zero)) => {
                trace!(%name, "using default custom encoder for absent value");
                return zero()
                    .encode_values(&name, self.values)
                    .map_err(Error::Encoder);
            }
            _ => {}
        }

        match value.resolve() {
            Value::Seq(items) => self.encode_seq(name, items, opts, depth),
            Value::Record(record) => {
                trace!(scope = %name, "encoding nested record");
                self.encode_record(record, &name, depth + 1)
            }
            Value::Map(entries) => {
                self.check_depth(depth + 1)?;
                for (key, entry) in entries {
                    self.encode_value(format!("{name}[{key}]"), entry, opts, depth + 1)?;
                }
                Ok(())
            }
            leaf => {
                self.values.add(name, leaf.to_query_string(opts));
                Ok(())
            }
        }
    }

    fn encode_seq(
        &mut self,
        name: String,
        items: Vec<Value<'_>>,
        opts: TagOptions,
        depth: usize,
    ) -> Result<()> {
        if let Some(delim) = opts.delimiter() {
            let joined = value::join(&items, delim, opts);
            self.values.add(name, joined);
            return Ok(());
        }

        let name = if opts.contains(TagOption::Brackets) {
            name + "[]"
        } else {
            name
        };
        let numbered = opts.contains(TagOption::Numbered);
        for (i, item) in items.into_iter().enumerate() {
            let key = if numbered {
                format!("{name}{i}")
            } else {
                name.clone()
            };
            self.encode_value(key, item, opts, depth)?;
        }
        Ok(())
    }
}
