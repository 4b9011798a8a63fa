use lazy_static::lazy_static;
use regex::Regex;

use crate::error::DecodeError;
use crate::types::LogLine;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"[\t\n\x0C\r ]+").expect("whitespace pattern is valid");
}

/// Decode one raw log line into its timestamp, session id, key and value.
///
/// Runs of ASCII whitespace are collapsed to a single space before splitting, so
/// irregular spacing between tokens is tolerated. Leading or trailing
/// whitespace still yields an empty token and is rejected. The field fragment
/// is split on its first `=`; the value may contain further `=` characters.
pub fn decode_line(raw: &str) -> Result<LogLine, DecodeError> {
    let line = WHITESPACE_RUN.replace_all(raw, " ");
    let tokens: Vec<&str> = line.split(' ').collect();

    let [timestamp, session_id, field_spec] = tokens.as_slice() else {
        return Err(DecodeError::MalformedLine {
            line: line.to_string(),
        });
    };

    let (key, value) =
        field_spec
            .split_once('=')
            .ok_or_else(|| DecodeError::MalformedField {
                fragment: field_spec.to_string(),
            })?;

    Ok(LogLine {
        timestamp: timestamp.to_string(),
        session_id: session_id.to_string(),
        key: key.to_string(),
        value: value.to_string(),
    })
}
