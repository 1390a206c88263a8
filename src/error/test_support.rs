use super::{ConfigError, InputError, QuantileError};

impl From<&'static str> for ConfigError {
    fn from(message: &'static str) -> Self {
        ConfigError::TestExpectation { message }
    }
}

impl From<String> for ConfigError {
    fn from(value: String) -> Self {
        ConfigError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}

impl From<&'static str> for InputError {
    fn from(message: &'static str) -> Self {
        InputError::TestExpectation { message }
    }
}

impl From<String> for InputError {
    fn from(value: String) -> Self {
        InputError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}

impl From<&'static str> for QuantileError {
    fn from(message: &'static str) -> Self {
        QuantileError::TestExpectation { message }
    }
}

impl From<String> for QuantileError {
    fn from(value: String) -> Self {
        QuantileError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}
