use super::opt::parse_error::OptParseError;

/// Errors encounterable while parsing a message from bytes
///
/// Parsing stops at the first error; there is no partial [`Packet`](crate::Packet).
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Eq, Ord)]
pub enum MessageParseError {
  /// The datagram was shorter than the 4-byte header
  HeaderTooShort,

  /// The header carried a protocol version other than 1
  VersionNotOne(u8),

  /// The token length in the header was > 8, or the datagram
  /// ended before that many token bytes
  TokenTooShort(u8),

  /// The token claimed to extend past the end of the datagram.
  ///
  /// Not produced by [`Packet`](crate::Packet) parsing, which reports a short
  /// token as [`MessageParseError::TokenTooShort`]; kept so error code 6
  /// keeps its meaning.
  OptionsOverrunPacket,

  /// Error parsing option
  OptParseError(OptParseError),
}

impl MessageParseError {
  /// Stable numeric code for this error, suitable for logging
  ///
  /// ```
  /// use toadlet_msg::{MessageParseError, OptParseError};
  ///
  /// assert_eq!(MessageParseError::HeaderTooShort.code(), 1);
  /// assert_eq!(MessageParseError::OptParseError(OptParseError::OptionDeltaInvalid).code(), 11);
  /// ```
  pub fn code(&self) -> u8 {
    match self {
      | Self::HeaderTooShort => 1,
      | Self::VersionNotOne(_) => 2,
      | Self::TokenTooShort(_) => 3,
      | Self::OptionsOverrunPacket => 6,
      | Self::OptParseError(e) => e.code(),
    }
  }
}

impl From<OptParseError> for MessageParseError {
  fn from(e: OptParseError) -> Self {
    Self::OptParseError(e)
  }
}
