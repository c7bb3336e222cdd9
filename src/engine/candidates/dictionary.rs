// src/engine/candidates/dictionary.rs
//! Streaming batches from newline-delimited candidate files
//!
//! The whole file is never held in memory; callers pull one bounded batch
//! at a time.

use crate::types::Candidate;
use crate::utils::error::AuditError;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Longest accepted line, terminator excluded
pub const MAX_LINE_BYTES: u64 = 4096;

/// Source of candidate batches for streaming mode
pub trait BatchReader: Send {
    /// Returns up to `size` candidates, or `None` at end of input
    ///
    /// A returned batch is never empty.
    fn read_next_batch(&mut self, size: usize) -> Result<Option<Vec<Candidate>>, AuditError>;

    /// Lines dropped because they could not be decoded or were too long
    fn skipped(&self) -> u64 {
        0
    }
}

/// Reads one candidate per line
///
/// Line terminators (`\n`, `\r\n`) are stripped and empty lines ignored.
/// Lines that are not valid UTF-8 or longer than [`MAX_LINE_BYTES`] are
/// skipped and counted. Memory per line stays bounded either way.
pub struct FileBatchReader<R> {
    reader: R,
    line: Vec<u8>,
    skipped: u64,
}

impl FileBatchReader<BufReader<File>> {
    /// Opens a dictionary file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            AuditError::ConfigError(format!(
                "Failed to open dictionary {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self::new(BufReader::with_capacity(1 << 20, file)))
    }
}

impl<R: BufRead> FileBatchReader<R> {
    /// Wraps any buffered reader
    pub fn new(reader: R) -> Self {
        FileBatchReader {
            reader,
            line: Vec::with_capacity(64),
            skipped: 0,
        }
    }

    /// Consumes input up to and including the next `\n`
    fn discard_rest_of_line(&mut self) -> Result<(), AuditError> {
        loop {
            let (used, done) = {
                let buf = self.reader.fill_buf()?;
                if buf.is_empty() {
                    return Ok(());
                }
                match buf.iter().position(|&b| b == b'\n') {
                    Some(i) => (i + 1, true),
                    None => (buf.len(), false),
                }
            };
            self.reader.consume(used);
            if done {
                return Ok(());
            }
        }
    }

    fn decode(&self) -> Result<Candidate, AuditError> {
        let mut end = self.line.len();
        while end > 0 && matches!(self.line[end - 1], b'\n' | b'\r') {
            end -= 1;
        }
        std::str::from_utf8(&self.line[..end])
            .map(str::to_owned)
            .map_err(|e| AuditError::CandidateEncoding(e.to_string()))
    }
}

impl<R: BufRead + Send> BatchReader for FileBatchReader<R> {
    fn read_next_batch(&mut self, size: usize) -> Result<Option<Vec<Candidate>>, AuditError> {
        let size = size.max(1);
        let mut batch = Vec::with_capacity(size.min(65_536));

        while batch.len() < size {
            self.line.clear();
            let read = self
                .reader
                .by_ref()
                .take(MAX_LINE_BYTES + 1)
                .read_until(b'\n', &mut self.line)?;
            if read == 0 {
                break;
            }
            if read as u64 > MAX_LINE_BYTES && self.line.last() != Some(&b'\n') {
                self.discard_rest_of_line()?;
                self.skipped += 1;
                log::debug!("Skipping dictionary line longer than {} bytes", MAX_LINE_BYTES);
                continue;
            }
            match self.decode() {
                Ok(candidate) if candidate.is_empty() => {}
                Ok(candidate) => batch.push(candidate),
                Err(e) => {
                    self.skipped += 1;
                    log::debug!("Skipping dictionary line: {}", e);
                }
            }
        }

        Ok(if batch.is_empty() { None } else { Some(batch) })
    }

    fn skipped(&self) -> u64 {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn drain(reader: &mut impl BatchReader, size: usize) -> Vec<Vec<Candidate>> {
        let mut out = Vec::new();
        while let Some(batch) = reader.read_next_batch(size).unwrap() {
            out.push(batch);
        }
        out
    }

    #[test]
    fn splits_into_bounded_batches() {
        let data = "one\ntwo\r\nthree\n\nfour\nfive";
        let mut reader = FileBatchReader::new(Cursor::new(data));
        let batches = drain(&mut reader, 2);
        assert_eq!(
            batches,
            vec![vec!["one", "two"], vec!["three", "four"], vec!["five"]]
        );
    }

    #[test]
    fn keeps_inner_whitespace() {
        let mut reader = FileBatchReader::new(Cursor::new(" pass word \n"));
        assert_eq!(drain(&mut reader, 10), vec![vec![" pass word "]]);
    }

    #[test]
    fn invalid_utf8_lines_are_skipped() {
        let data: &[u8] = b"good\n\xff\xfe\nalso-good\n";
        let mut reader = FileBatchReader::new(Cursor::new(data));
        assert_eq!(drain(&mut reader, 10), vec![vec!["good", "also-good"]]);
        assert_eq!(reader.skipped(), 1);
    }

    #[test]
    fn overlong_lines_are_skipped() {
        let data = format!("ok\n{}\nafter\n", "x".repeat(10_000));
        let mut reader = FileBatchReader::new(Cursor::new(data));
        assert_eq!(drain(&mut reader, 10), vec![vec!["ok", "after"]]);
        assert_eq!(reader.skipped(), 1);
    }

    #[test]
    fn unterminated_overlong_input_ends_cleanly() {
        let data = "y".repeat(100_000);
        let mut reader = FileBatchReader::new(Cursor::new(data));
        assert!(reader.read_next_batch(10).unwrap().is_none());
        assert_eq!(reader.skipped(), 1);
    }

    #[test]
    fn line_at_the_cap_is_kept() {
        let word = "z".repeat(MAX_LINE_BYTES as usize);
        let data = format!("{word}\n{word}");
        let mut reader = FileBatchReader::new(Cursor::new(data));
        assert_eq!(drain(&mut reader, 10), vec![vec![word.clone(), word]]);
        assert_eq!(reader.skipped(), 0);
    }

    #[test]
    fn empty_input_ends_immediately() {
        let mut reader = FileBatchReader::new(Cursor::new(""));
        assert!(reader.read_next_batch(10).unwrap().is_none());
    }

    #[test]
    fn missing_file_is_reported() {
        let err = FileBatchReader::open("/nonexistent/words.txt").err().unwrap();
        assert!(matches!(err, AuditError::ConfigError(_)));
    }
}
