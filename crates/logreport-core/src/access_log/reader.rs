use super::parser::{LineParser, ParsedRecord};
use super::selector::LogFileDescriptor;
use crate::Result;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};

/// Lazy, forward-only, single-pass stream of parsed records from one log
/// file, plain or gzip-compressed.
///
/// Unparseable lines are skipped and counted inside `next()`; I/O errors
/// surface as `Err` items and are fatal for the run. The file handle is
/// released when the reader is dropped, whether or not the stream was fully
/// consumed.
pub struct RecordReader {
    lines: Lines<Box<dyn BufRead>>,
    parser: LineParser,
    lines_read: u64,
    skipped: u64,
}

impl RecordReader {
    /// Open the log file described by `descriptor`, choosing the
    /// decompression strategy once for the whole stream.
    pub fn open(descriptor: &LogFileDescriptor) -> Result<Self> {
        tracing::debug!("Opening log file: {}", descriptor.path.display());

        let file = File::open(&descriptor.path)?;
        let reader: Box<dyn BufRead> = if descriptor.compressed {
            Box::new(BufReader::new(GzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };

        Ok(Self {
            lines: reader.lines(),
            parser: LineParser::new(),
            lines_read: 0,
            skipped: 0,
        })
    }

    /// Raw lines pulled from the file so far, parsed or not. Distinct from
    /// the parsed-record count, which excludes skipped lines.
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// Lines that matched neither the request nor the latency pattern.
    pub fn lines_skipped(&self) -> u64 {
        self.skipped
    }
}

impl Iterator for RecordReader {
    type Item = Result<ParsedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.lines_read += 1;

            match self.parser.parse(&line) {
                Some(record) => return Some(Ok(record)),
                None => self.skipped += 1,
            }
        }
    }
}
