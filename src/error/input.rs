use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedKind {
    MissingTimestamp,
    InvalidValue,
    NonFiniteValue,
    InvalidTimestamp,
    TimestampBackwards,
}

impl MalformedKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MalformedKind::MissingTimestamp => "missing timestamp",
            MalformedKind::InvalidValue => "value is not a number",
            MalformedKind::NonFiniteValue => "value is not finite",
            MalformedKind::InvalidTimestamp => "timestamp is not ISO-8601",
            MalformedKind::TimestampBackwards => "timestamp is earlier than the previous sample",
        }
    }
}

impl std::fmt::Display for MalformedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Malformed input at line {line_number} ({kind}): '{line}'")]
    Malformed {
        line_number: usize,
        line: String,
        kind: MalformedKind,
    },
    #[error("Failed to open input '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read input at line {line_number}: {source}")]
    Read {
        line_number: usize,
        #[source]
        source: std::io::Error,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}

impl InputError {
    #[must_use]
    pub fn malformed(line_number: usize, line: &str, kind: MalformedKind) -> Self {
        InputError::Malformed {
            line_number,
            line: line.trim_end().to_owned(),
            kind,
        }
    }
}
