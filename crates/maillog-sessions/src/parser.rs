use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

use crate::assembler::SessionAssembler;
use crate::decoder::decode_line;
use crate::duration::DurationMode;
use crate::error::AssembleError;

/// Fold every line of `reader` into a fresh [`SessionAssembler`].
///
/// Stops at the first unreadable, malformed or unparsable line; nothing
/// assembled up to that point is returned.
pub fn assemble<R: BufRead>(reader: R, mode: DurationMode) -> Result<SessionAssembler, AssembleError> {
    let mut assembler = SessionAssembler::new(mode);
    let mut line_count = 0;

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|source| AssembleError::Read {
            line_number,
            source,
        })?;

        let decoded = decode_line(&line).map_err(|source| AssembleError::Decode {
            line_number,
            source,
        })?;

        assembler
            .ingest_line(&decoded)
            .map_err(|source| AssembleError::Duration {
                line_number,
                source,
            })?;

        line_count = line_number;
    }

    info!(
        lines = line_count,
        sessions = assembler.len(),
        full_sessions = assembler.full_count(),
        "Finished reading log stream"
    );

    Ok(assembler)
}

/// Open a log file and assemble its sessions.
pub fn assemble_file(path: &Path, mode: DurationMode) -> Result<SessionAssembler, AssembleError> {
    let file = File::open(path).map_err(|source| AssembleError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), %mode, "Reading log file");
    assemble(BufReader::new(file), mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_from_memory() {
        let input = "\
2021-01-01T10:00:00.000000 A client=foo
2021-01-01T10:00:00.000000 A message-id=m1
2021-01-01T10:00:00.000000 A from=a@x
2021-01-01T10:00:00.000000 A to=b@x
2021-01-01T10:00:05.000000 A status=sent
";
        let assembler = assemble(input.as_bytes(), DurationMode::Elapsed).unwrap();
        assert_eq!(assembler.len(), 1);
        assert_eq!(assembler.full_count(), 1);
    }

    #[test]
    fn test_empty_input() {
        let assembler = assemble("".as_bytes(), DurationMode::Elapsed).unwrap();
        assert!(assembler.is_empty());
        assert!(assembler.full_sessions().is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let input = "2021-01-01T10:00:00 A client=foo\r\n2021-01-01T10:00:01 A to=b@x\r\n";
        let assembler = assemble(input.as_bytes(), DurationMode::Elapsed).unwrap();
        assert_eq!(assembler.get("A").unwrap().address.to, "b@x");
    }

    #[test]
    fn test_error_reports_line_number() {
        let input = "2021-01-01T10:00:00 A client=foo\nbroken line\n";
        let err = assemble(input.as_bytes(), DurationMode::Elapsed).unwrap_err();
        assert_eq!(err.line_number(), Some(2));
        assert!(matches!(err, AssembleError::Decode { .. }));
    }

    #[test]
    fn test_timestamp_error_reports_status_line() {
        let input = "bad A client=foo\n2021-01-01T10:00:00 A from=a@x\n2021-01-01T10:00:05 A status=sent\n";
        let err = assemble(input.as_bytes(), DurationMode::Elapsed).unwrap_err();
        assert_eq!(err.line_number(), Some(3));
        assert!(matches!(err, AssembleError::Duration { .. }));
    }
}
