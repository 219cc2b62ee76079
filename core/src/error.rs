use failure::Fail;

#[derive(Debug, Clone, PartialEq, Fail)]
pub enum Error {
  #[fail(display = "Division by zero")]
  DivideByZero,

  #[fail(display = "Arithmetic overflow in {}", operation)]
  Overflow { operation: &'static str },

  #[fail(display = "Invalid {}: {} (expected {})", what, value, expected)]
  InvalidRange {
    what: &'static str,
    value: String,
    expected: &'static str,
  },

  #[fail(display = "Failed to send a MIDI message: {}", cause)]
  Output { cause: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Unwraps the result of a checked operation behind an operator impl.
pub(crate) fn fatal<T>(result: Result<T>) -> T {
  result.unwrap_or_else(|err| panic!("{}", err))
}

impl Error {
  pub(crate) fn overflow(operation: &'static str) -> Error {
    Error::Overflow { operation }
  }

  pub(crate) fn invalid_range<T: ToString>(
    what: &'static str,
    value: T,
    expected: &'static str,
  ) -> Error {
    Error::InvalidRange {
      what,
      value: value.to_string(),
      expected,
    }
  }
}
