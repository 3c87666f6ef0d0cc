//! Encoding of annotated records into URL query values.
//!
//! A record is registered together with a tag for each of its fields,
//! describing the field's external name and encoding options. Encoding
//! walks the value tree and produces [`Values`], an ordered multi-map of
//! string keys to string values, ready to be rendered as a querystring.
//!
//! Nested records are written with bracketed keys, in the style of
//! [qs](https://github.com/ljharb/qs) and
//! [`Rack::Utils::parse_nested_query`](http://www.rubydoc.info/github/rack/rack/Rack/Utils#parse_nested_query-class_method):
//! `user[addr][city]=SFO`.
//!
//! ## Tags
//!
//! A tag is `name` or `name,opt1,opt2,...`. An empty name (`,omitempty`)
//! keeps the field's identifier, and the name `-` skips the field.
//!
//! | option | applies to | effect |
//! |---|---|---|
//! | `omitempty` | any | skip the field if its value is empty |
//! | `int` | `bool` | encode as `1`/`0` |
//! | `unix` | timestamps | encode as seconds since the Unix epoch |
//! | `comma`/`space`/`semicolon` | sequences | join the elements into one value |
//! | `brackets` | sequences | key becomes `name[]` |
//! | `numbered` | sequences | key becomes `name0`, `name1`, ... |
//!
//! The empty values are `false`, zero, empty strings and collections,
//! `None`, and the zero timestamp (January 1st of year 1, UTC).
//!
//! Booleans default to `true`/`false` and timestamps to RFC 3339. Sequences
//! default to repeating the key once per element. `Some` values are encoded
//! as the value they hold; `None` encodes as an empty value. Multiple fields
//! that resolve to the same name all contribute values to that name.
//!
//! ## Usage
//!
//! ```
//! use query_values::record;
//!
//! struct Address {
//!     city: String,
//!     postcode: String,
//! }
//!
//! record! {
//!     Address {
//!         postcode,
//!         city,
//!     }
//! }
//!
//! struct User {
//!     name: String,
//!     addr: Address,
//!     ids: Vec<u8>,
//! }
//!
//! record! {
//!     User {
//!         name,
//!         addr,
//!         ids => "id,comma",
//!     }
//! }
//!
//! struct Query {
//!     user: User,
//! }
//!
//! record! { Query { user } }
//!
//! let query = Query {
//!     user: User {
//!         name: "acme".to_owned(),
//!         addr: Address {
//!             city: "SFO".to_owned(),
//!             postcode: "1234".to_owned(),
//!         },
//!         ids: vec![1, 2, 3],
//!     },
//! };
//!
//! assert_eq!(
//!     query_values::to_string(&query).unwrap(),
//!     "user[name]=acme&user[addr][postcode]=1234&user[addr][city]=SFO&user[id]=1,2,3"
//! );
//! ```
//!
//! Records nest to any depth. A record graph which refers back to itself
//! through shared pointers recurses without end unless a
//! [`Config::max_depth`] is set.

#[macro_use]
mod macros;

mod config;
mod error;
mod ser;
mod values;

#[doc(inline)]
pub use config::Config;
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use ser::{
    BoxError, EncodeValues, Field, Kind, Record, Tag, TagOption, TagOptions, ToQueryValue, Value,
    ValuesEncoder, ZeroEncoder, to_string, to_values,
};
#[doc(inline)]
pub use values::Values;
