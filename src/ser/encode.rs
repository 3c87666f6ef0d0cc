use std::borrow::Cow;

use percent_encoding::AsciiSet;

/// As defined in https://url.spec.whatwg.org/#query-percent-encode-set
///
/// The set of characters that need to be encoded in a _query_ string
/// are:
/// - CONTROL characters
/// - SPACE (but we'll separately encode it as `+`)
/// - U+0022 ("), U+0023 (#), U+003C (<), and U+003E (>).
///
/// Keys are already flattened (`user[addr][city]`), so brackets are
/// structural and stay literal.
const QS_KEY_SET: &AsciiSet = &percent_encoding::CONTROLS
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    // `+` is used to represent a space in query strings
    .add(b'+')
    // key, value separator
    .add(b'=')
    // denote key-value pairs
    .add(b'&')
    .add(b'%');

/// Values additionally encode brackets, so that a value can never be
/// mistaken for a nested key.
const QS_VALUE_SET: &AsciiSet = &QS_KEY_SET.add(b'[').add(b']');

/// As defined in https://url.spec.whatwg.org/#application-x-www-form-urlencoded-percent-encode-set
///
/// The application/x-www-form-urlencoded percent-encode set contains all code points, except the ASCII alphanumeric,
/// U+002A (*), U+002D (-), U+002E (.), and U+005F (_).
const FORM_URLENCODED_SET: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

/// Percent-encodes a flattened key.
pub fn encode_key(s: &str, use_form_encoding: bool) -> Cow<'_, str> {
    let set = if use_form_encoding {
        FORM_URLENCODED_SET
    } else {
        QS_KEY_SET
    };
    encode_with(s, set, use_form_encoding)
}

/// Percent-encodes a value.
pub fn encode_value(s: &str, use_form_encoding: bool) -> Cow<'_, str> {
    let set = if use_form_encoding {
        FORM_URLENCODED_SET
    } else {
        QS_VALUE_SET
    };
    encode_with(s, set, use_form_encoding)
}

/// In query-string mode spaces become `+`; form mode percent-encodes them
/// as `%20` along with everything else.
fn encode_with<'a>(s: &'a str, set: &'static AsciiSet, use_form_encoding: bool) -> Cow<'a, str> {
    let encoded: Cow<'a, str> = percent_encoding::utf8_percent_encode(s, set).into();
    if !use_form_encoding && encoded.contains(' ') {
        Cow::Owned(encoded.replace(' ', "+"))
    } else {
        encoded
    }
}
