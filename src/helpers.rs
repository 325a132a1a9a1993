use percent_encoding::percent_decode_str;

/// Percent-decodes a captured path segment before it is exposed as a route
/// parameter. Byte sequences that do not form valid UTF-8 after decoding are
/// replaced rather than rejected, so decoding never fails at request time.
pub(crate) fn percent_decode(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}
