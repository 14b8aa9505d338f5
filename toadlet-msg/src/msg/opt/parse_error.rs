/// Errors encounterable while parsing an option from bytes
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Eq, Ord)]
pub enum OptParseError {
  /// The option header announced extension bytes
  /// that were not present
  OptionHeaderTooShort,

  /// Option Delta was set to 15, which is invalid.
  OptionDeltaInvalid,

  /// Value Length was set to 15, which is invalid.
  OptionLenInvalid,

  /// The option's value was longer than the rest of the datagram
  #[allow(missing_docs)]
  OptionTooBig { len: u32, remaining: usize },
}

impl OptParseError {
  /// Stable numeric code for this error, suitable for logging
  pub fn code(&self) -> u8 {
    match self {
      | Self::OptionHeaderTooShort => 4,
      | Self::OptionTooBig { .. } => 7,
      | Self::OptionLenInvalid => 8,
      | Self::OptionDeltaInvalid => 11,
    }
  }
}
