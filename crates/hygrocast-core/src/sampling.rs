//! Sample acquisition from a line-oriented byte stream
//!
//! The microcontroller prints one `<temperature>,<humidity>` line per
//! measurement. [`LineSampleSource`] wraps any [`BufRead`] (the serial port in
//! production, a `Cursor` in tests) and turns each complete line into a
//! [`Reading`].

use std::io::{self, BufRead};

use thiserror::Error;

/// One parsed measurement, in °C and %RH
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub temperature: f64,
    pub humidity: f64,
}

impl Reading {
    pub const fn new(temperature: f64, humidity: f64) -> Self {
        Self {
            temperature,
            humidity,
        }
    }
}

/// Reasons a poll produced no reading
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("line is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("expected 2 comma-separated fields, found {found} in {line:?}")]
    FieldCount { found: usize, line: String },

    #[error("{field} is not a number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} is not finite: {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("no line terminator within {length} bytes")]
    LineTooLong { length: usize },
}

/// Anything that can be polled for a temperature/humidity reading.
pub trait SampleSource {
    /// Attempt to read one reading.
    ///
    /// Returns `Ok(None)` when no complete line arrived within the transport's
    /// timeout, or when the line was blank. Never retries.
    fn read_sample(&mut self) -> Result<Option<Reading>, SampleError>;
}

impl<S: SampleSource + ?Sized> SampleSource for Box<S> {
    fn read_sample(&mut self) -> Result<Option<Reading>, SampleError> {
        (**self).read_sample()
    }
}

/// Parse a `<temperature>,<humidity>` line.
pub fn parse_line(line: &str) -> Result<Reading, SampleError> {
    let line = line.trim();
    let fields: Vec<&str> = line.split(',').collect();

    let [temperature, humidity] = fields.as_slice() else {
        return Err(SampleError::FieldCount {
            found: fields.len(),
            line: line.to_owned(),
        });
    };

    Ok(Reading {
        temperature: parse_field("temperature", temperature)?,
        humidity: parse_field("humidity", humidity)?,
    })
}

fn parse_field(field: &'static str, raw: &str) -> Result<f64, SampleError> {
    let raw = raw.trim();
    let value: f64 = raw.parse().map_err(|_| SampleError::InvalidNumber {
        field,
        value: raw.to_owned(),
    })?;

    // NaN would poison every later fit
    if !value.is_finite() {
        return Err(SampleError::NonFinite { field, value });
    }
    Ok(value)
}

/// Longest line accepted before the bytes are dropped as noise
pub const MAX_LINE_BYTES: usize = 256;

/// [`SampleSource`] over a buffered byte stream, one reading per line.
///
/// Bytes of a line that is cut off by a read timeout are kept and completed
/// on the next poll. A line that grows past [`MAX_LINE_BYTES`] without a
/// terminator is rejected, and its remainder is skipped one buffered chunk
/// per poll, so a stream that never sends `\n` cannot stall the caller.
pub struct LineSampleSource<R> {
    reader: R,
    pending: Vec<u8>,
    /// Skipping the tail of an oversized line
    discarding: bool,
}

impl<R: BufRead> LineSampleSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: Vec::new(),
            discarding: false,
        }
    }

    /// Bytes received so far for a line that has not been terminated yet
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }
}

impl<R: BufRead> SampleSource for LineSampleSource<R> {
    fn read_sample(&mut self) -> Result<Option<Reading>, SampleError> {
        loop {
            let chunk = match self.reader.fill_buf() {
                Ok(chunk) => chunk,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e)
                    if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock) =>
                {
                    return Ok(None);
                }
                Err(e) => {
                    self.pending.clear();
                    self.discarding = false;
                    return Err(e.into());
                }
            };

            // End of stream terminates the last line
            if chunk.is_empty() {
                break;
            }

            let newline = chunk.iter().position(|&b| b == b'\n');
            let take = newline.map_or(chunk.len(), |i| i + 1);

            if self.discarding {
                self.reader.consume(take);
                self.discarding = newline.is_none();
                return Ok(None);
            }

            self.pending.extend_from_slice(&chunk[..take]);
            self.reader.consume(take);

            if self.pending.len() > MAX_LINE_BYTES {
                let length = self.pending.len();
                self.pending.clear();
                self.discarding = newline.is_none();
                return Err(SampleError::LineTooLong { length });
            }

            if newline.is_some() {
                break;
            }
        }

        let line = core::mem::take(&mut self.pending);
        let text = core::str::from_utf8(&line)?;
        if text.trim().is_empty() {
            return Ok(None);
        }

        parse_line(text).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::io::{BufReader, Cursor, Read};
    use std::rc::Rc;

    /// Reader that replays scripted chunks and errors, like a serial port
    struct ScriptedPort {
        script: VecDeque<io::Result<Vec<u8>>>,
    }

    impl ScriptedPort {
        fn new(script: Vec<io::Result<&[u8]>>) -> Self {
            Self {
                script: script.into_iter().map(|r| r.map(<[u8]>::to_vec)).collect(),
            }
        }
    }

    impl Read for ScriptedPort {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.script.pop_front() {
                None => Ok(0),
                Some(Err(e)) => Err(e),
                Some(Ok(bytes)) => {
                    let n = bytes.len().min(buf.len());
                    buf[..n].copy_from_slice(&bytes[..n]);
                    if n < bytes.len() {
                        self.script.push_front(Ok(bytes[n..].to_vec()));
                    }
                    Ok(n)
                }
            }
        }
    }

    /// Reader that streams `x` bytes forever and never ends a line
    struct EndlessNoise {
        reads: Rc<Cell<usize>>,
    }

    impl Read for EndlessNoise {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.reads.set(self.reads.get() + 1);
            let n = buf.len().min(8);
            buf[..n].fill(b'x');
            Ok(n)
        }
    }

    fn timeout() -> io::Error {
        io::Error::new(io::ErrorKind::TimedOut, "timed out")
    }

    #[test]
    fn test_parse_line() {
        let reading = parse_line("23.5,61.25").unwrap();
        assert_eq!(reading, Reading::new(23.5, 61.25));
    }

    #[test]
    fn test_parse_line_trims_whitespace_and_crlf() {
        let reading = parse_line(" 20.0 , 50.0 \r\n").unwrap();
        assert_eq!(reading, Reading::new(20.0, 50.0));
    }

    #[test]
    fn test_parse_line_negative_and_exponent() {
        let reading = parse_line("-4.5,1e1").unwrap();
        assert_eq!(reading, Reading::new(-4.5, 10.0));
    }

    #[test]
    fn test_parse_line_missing_comma() {
        let err = parse_line("23.5 61.2").unwrap_err();
        assert!(matches!(err, SampleError::FieldCount { found: 1, .. }));
    }

    #[test]
    fn test_parse_line_too_many_fields() {
        let err = parse_line("1,2,3").unwrap_err();
        assert!(matches!(err, SampleError::FieldCount { found: 3, .. }));
    }

    #[test]
    fn test_parse_line_non_numeric() {
        let err = parse_line("23.5,wet").unwrap_err();
        match err {
            SampleError::InvalidNumber { field, value } => {
                assert_eq!(field, "humidity");
                assert_eq!(value, "wet");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_line_rejects_nan() {
        let err = parse_line("nan,50").unwrap_err();
        assert!(matches!(
            err,
            SampleError::NonFinite {
                field: "temperature",
                ..
            }
        ));
    }

    #[test]
    fn test_line_source_reads_each_line() {
        let mut source = LineSampleSource::new(Cursor::new("20.0,50.0\n21.0,51.0\n"));

        assert_eq!(source.read_sample().unwrap(), Some(Reading::new(20.0, 50.0)));
        assert_eq!(source.read_sample().unwrap(), Some(Reading::new(21.0, 51.0)));
        assert_eq!(source.read_sample().unwrap(), None);
    }

    #[test]
    fn test_line_source_blank_line_is_no_sample() {
        let mut source = LineSampleSource::new(Cursor::new("\r\n20.0,50.0\n"));

        assert_eq!(source.read_sample().unwrap(), None);
        assert_eq!(source.read_sample().unwrap(), Some(Reading::new(20.0, 50.0)));
    }

    #[test]
    fn test_line_source_malformed_line_then_recovers() {
        let mut source = LineSampleSource::new(Cursor::new("garbage\n20.0,50.0\n"));

        assert!(source.read_sample().is_err());
        assert_eq!(source.read_sample().unwrap(), Some(Reading::new(20.0, 50.0)));
    }

    #[test]
    fn test_line_source_unterminated_last_line() {
        let mut source = LineSampleSource::new(Cursor::new("20.0,50.0"));
        assert_eq!(source.read_sample().unwrap(), Some(Reading::new(20.0, 50.0)));
    }

    #[test]
    fn test_line_source_invalid_utf8() {
        let mut source = LineSampleSource::new(Cursor::new(b"\xff\xfe,1\n".to_vec()));
        assert!(matches!(source.read_sample(), Err(SampleError::Utf8(_))));
    }

    #[test]
    fn test_line_source_timeout_keeps_partial_line() {
        let port = ScriptedPort::new(vec![Ok(&b"22.7,"[..]), Err(timeout()), Ok(&b"48.1\n"[..])]);
        let mut source = LineSampleSource::new(BufReader::new(port));

        assert_eq!(source.read_sample().unwrap(), None);
        assert_eq!(source.pending(), b"22.7,");
        assert_eq!(source.read_sample().unwrap(), Some(Reading::new(22.7, 48.1)));
        assert!(source.pending().is_empty());
    }

    #[test]
    fn test_line_source_io_error_discards_partial_line() {
        let port = ScriptedPort::new(vec![
            Ok(&b"22.7,"[..]),
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "unplugged")),
            Ok(&b"20.0,50.0\n"[..]),
        ]);
        let mut source = LineSampleSource::new(BufReader::new(port));

        assert!(matches!(source.read_sample(), Err(SampleError::Io(_))));
        assert_eq!(source.read_sample().unwrap(), Some(Reading::new(20.0, 50.0)));
    }

    #[test]
    fn test_line_source_endless_line_is_bounded() {
        let reads = Rc::new(Cell::new(0));
        let port = EndlessNoise {
            reads: Rc::clone(&reads),
        };
        let mut source = LineSampleSource::new(BufReader::new(port));

        assert!(matches!(
            source.read_sample(),
            Err(SampleError::LineTooLong { .. })
        ));
        assert!(reads.get() <= MAX_LINE_BYTES / 8 + 1);
        assert!(source.pending().is_empty());

        // While skipping the rest, each poll reads a single chunk
        let before = reads.get();
        assert_eq!(source.read_sample().unwrap(), None);
        assert_eq!(reads.get(), before + 1);
    }

    #[test]
    fn test_line_source_recovers_after_oversized_line() {
        let noise = vec![b'x'; MAX_LINE_BYTES + 44];
        let port = ScriptedPort::new(vec![Ok(&noise[..]), Ok(&b"yyy\n20.0,50.0\n"[..])]);
        let mut source = LineSampleSource::new(BufReader::new(port));

        assert!(matches!(
            source.read_sample(),
            Err(SampleError::LineTooLong { length: 300 })
        ));
        assert_eq!(source.read_sample().unwrap(), None);
        assert_eq!(source.read_sample().unwrap(), Some(Reading::new(20.0, 50.0)));
    }

    #[test]
    fn test_line_source_long_line_with_terminator_rejected() {
        let mut line = vec![b'1'; MAX_LINE_BYTES + 1];
        line.extend_from_slice(b"\n20.0,50.0\n");
        let mut source = LineSampleSource::new(Cursor::new(line));

        assert!(matches!(
            source.read_sample(),
            Err(SampleError::LineTooLong { .. })
        ));
        assert_eq!(source.read_sample().unwrap(), Some(Reading::new(20.0, 50.0)));
    }
}
