use crate::error::Result;
use crate::ser::{ToQueryValue, ValuesEncoder};
use crate::Values;

/// Configuration for encoding behavior.
///
/// The `Config` struct allows you to customize how records are flattened
/// and how the resulting [`Values`] are rendered as a querystring.
///
/// ## Nesting Depth
///
/// The `max_depth` parameter limits how many levels of nested records are
/// followed. Record types are normally finite, but a record graph built
/// from shared pointers can refer back to itself, and encoding it would
/// recurse forever. Setting a limit turns that into an
/// [`Error::DepthExceeded`](crate::Error::DepthExceeded).
///
/// Default value: `max_depth = None` (unbounded)
///
/// ```
/// use query_values::{record, Config, Error};
///
/// struct Inner { x: u8 }
/// record! { Inner { x } }
///
/// struct Outer { inner: Inner }
/// record! { Outer { inner } }
///
/// let outer = Outer { inner: Inner { x: 1 } };
///
/// let values = Config::new().values(&outer).unwrap();
/// assert_eq!(values.get("inner[x]"), Some("1"));
///
/// let err = Config::new().max_depth(Some(0)).values(&outer).unwrap_err();
/// assert!(matches!(err, Error::DepthExceeded(0)));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Config {
    max_depth: Option<usize>,
    use_form_encoding: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub const fn new() -> Self {
        Self {
            max_depth: None,
            use_form_encoding: cfg!(feature = "default_to_form_encoding"),
        }
    }

    /// Specifies how many levels of nested records will be encoded. The top
    /// level record is depth 0. Default is `None`, meaning no limit.
    pub const fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// By default, querystrings are rendered with query-string escaping, as
    /// defined in [WHATWG](https://url.spec.whatwg.org/#query-percent-encode-set).
    ///
    /// This is a relatively lax encoding scheme, which leaves the square
    /// brackets of nested keys like `a[b][c]=1` readable.
    ///
    /// To use `application/x-www-form-urlencoded` escaping instead, set
    /// this to `true`. Alternatively, you can use the
    /// `default_to_form_encoding` Cargo feature to set this to `true` by
    /// default.
    pub const fn use_form_encoding(mut self, use_form_encoding: bool) -> Self {
        self.use_form_encoding = use_form_encoding;
        self
    }

    pub(crate) const fn depth_limit(self) -> Option<usize> {
        self.max_depth
    }

    pub(crate) const fn form_encoding(self) -> bool {
        self.use_form_encoding
    }

    /// Encodes a record into a fresh [`Values`] using this `Config`.
    ///
    /// If encoding fails, any entries written before the failure are
    /// discarded.
    pub fn values<T: ToQueryValue + ?Sized>(self, input: &T) -> Result<Values> {
        let mut values = Values::new();
        self.encode_into(input, &mut values)?;
        Ok(values)
    }

    /// Encodes a record into an existing [`Values`].
    ///
    /// Entries are appended to whatever `values` already holds. If encoding
    /// fails, the entries written before the failure are left in place; the
    /// map should not be considered complete.
    pub fn encode_into<T: ToQueryValue + ?Sized>(self, input: &T, values: &mut Values) -> Result<()> {
        ValuesEncoder::new(values, self).encode_top_level(input.to_query_value())
    }

    /// Encodes a record directly into a querystring using this `Config`.
    pub fn to_string<T: ToQueryValue + ?Sized>(self, input: &T) -> Result<String> {
        Ok(self.values(input)?.encode_with(self))
    }
}
