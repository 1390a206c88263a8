use std::fs::File;
use std::io::{BufRead, BufReader, Read};

use super::{Sample, parse_line};
use crate::error::{InputError, MalformedKind};

/// Where samples are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(String),
}

impl InputSource {
    #[must_use]
    pub fn from_arg(value: Option<&str>) -> Self {
        match value {
            None | Some("-") => InputSource::Stdin,
            Some(path) => InputSource::File(path.to_owned()),
        }
    }

    /// # Errors
    ///
    /// Returns an error when the input file cannot be opened.
    pub fn open(&self) -> Result<Box<dyn BufRead>, InputError> {
        match self {
            InputSource::Stdin => Ok(Box::new(BufReader::new(std::io::stdin()))),
            InputSource::File(path) => {
                let file = File::open(path).map_err(|err| InputError::Open {
                    path: path.clone(),
                    source: err,
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}

impl std::fmt::Display for InputSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputSource::Stdin => f.write_str("stdin"),
            InputSource::File(path) => f.write_str(path),
        }
    }
}

/// Pulls samples one line at a time so memory stays flat for any input size.
pub struct SampleReader<R> {
    reader: R,
    line: String,
    line_number: usize,
    require_timestamp: bool,
    last_time: Option<f64>,
}

impl<R: BufRead> SampleReader<R> {
    #[must_use]
    pub fn new(reader: R, require_timestamp: bool) -> Self {
        Self {
            reader,
            line: String::new(),
            line_number: 0,
            require_timestamp,
            last_time: None,
        }
    }

    /// Reads the next sample, skipping blank and comment lines.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure, on a malformed line, or when a
    /// timestamp is earlier than the one before it.
    pub fn next_sample(&mut self) -> Result<Option<Sample>, InputError> {
        loop {
            self.line.clear();
            let bytes = self
                .reader
                .read_line(&mut self.line)
                .map_err(|err| InputError::Read {
                    line_number: self.line_number.saturating_add(1),
                    source: err,
                })?;
            if bytes == 0 {
                return Ok(None);
            }
            self.line_number = self.line_number.saturating_add(1);
            let Some(sample) = parse_line(&self.line, self.line_number, self.require_timestamp)?
            else {
                continue;
            };
            if let Some(time) = sample.time {
                if self.last_time.is_some_and(|last| time < last) {
                    return Err(InputError::malformed(
                        self.line_number,
                        &self.line,
                        MalformedKind::TimestampBackwards,
                    ));
                }
                self.last_time = Some(time);
            }
            return Ok(Some(sample));
        }
    }

    #[must_use]
    pub const fn lines_read(&self) -> usize {
        self.line_number
    }
}

impl<R: Read> SampleReader<BufReader<R>> {
    #[must_use]
    pub fn from_read(reader: R, require_timestamp: bool) -> Self {
        Self::new(BufReader::new(reader), require_timestamp)
    }
}
