/// Registers a struct as a [`Record`](crate::Record).
///
/// Each field is listed in declaration order, optionally followed by
/// `=> "tag"`. Fields left out of the list are never encoded. Two
/// attributes are recognised:
///
/// - `#[embedded]`: the field is an embedded record whose fields are
///   promoted into the enclosing record (unless the tag gives it a name).
/// - `#[unexported]`: the field is hidden, and only visited if it is also
///   embedded.
///
/// ```
/// use query_values::record;
///
/// struct Paging {
///     limit: u32,
///     offset: u32,
/// }
///
/// record! {
///     Paging {
///         limit => "limit,omitempty",
///         offset => "offset,omitempty",
///     }
/// }
///
/// struct Search<'a> {
///     q: &'a str,
///     paging: Paging,
///     secret: String,
/// }
///
/// record! {
///     Search<'a> {
///         q,
///         #[embedded]
///         paging,
///         secret => "-",
///     }
/// }
///
/// let search = Search {
///     q: "rust",
///     paging: Paging { limit: 10, offset: 0 },
///     secret: "hunter2".to_owned(),
/// };
/// assert_eq!(query_values::to_string(&search).unwrap(), "q=rust&limit=10");
/// ```
#[macro_export]
macro_rules! record {
    (
        $ty:ident $(< $($lt:lifetime),+ >)? {
            $( $(#[$flag:ident])* $field:ident $(=> $tag:literal)? ),* $(,)?
        }
    ) => {
        impl $(< $($lt),+ >)? $crate::Record for $ty $(< $($lt),+ >)? {
            fn fields(&self) -> &'static [$crate::Field] {
                static FIELDS: ::std::sync::LazyLock<::std::vec::Vec<$crate::Field>> =
                    ::std::sync::LazyLock::new(|| {
                        ::std::vec![
                            $(
                                $crate::Field::new(
                                    ::std::stringify!($field),
                                    ::std::concat!("" $(, $tag)?),
                                )
                                $(.$flag())*
                            ),*
                        ]
                    });
                &FIELDS
            }

            fn field_values(&self) -> ::std::vec::Vec<&dyn $crate::ToQueryValue> {
                ::std::vec![$(&self.$field as &dyn $crate::ToQueryValue),*]
            }
        }

        impl $(< $($lt),+ >)? $crate::ToQueryValue for $ty $(< $($lt),+ >)? {
            fn to_query_value(&self) -> $crate::Value<'_> {
                $crate::Value::Record(self)
            }
        }
    };
}

/// Routes fields of a type to its [`EncodeValues`](crate::EncodeValues)
/// implementation.
///
/// The type must implement `Default`: an absent `Option` of the type is
/// encoded by a default instance, so that it can still emit something.
///
/// ```
/// use query_values::{custom_encoder, record, BoxError, EncodeValues, Values};
///
/// #[derive(Default)]
/// struct Sort {
///     field: Option<&'static str>,
/// }
///
/// impl EncodeValues for Sort {
///     fn encode_values(&self, key: &str, values: &mut Values) -> Result<(), BoxError> {
///         values.add(key, self.field.unwrap_or("relevance"));
///         Ok(())
///     }
/// }
///
/// custom_encoder!(Sort);
///
/// struct Query {
///     sort: Option<Sort>,
/// }
///
/// record! { Query { sort } }
///
/// let values = query_values::to_values(&Query { sort: None }).unwrap();
/// assert_eq!(values.get("sort"), Some("relevance"));
/// ```
#[macro_export]
macro_rules! custom_encoder {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::ToQueryValue for $ty {
                fn to_query_value(&self) -> $crate::Value<'_> {
                    $crate::Value::custom(self)
                }

                fn nil_value() -> $crate::Value<'static> {
                    $crate::Value::nil_encoder::<Self>()
                }
            }
        )+
    };
}
