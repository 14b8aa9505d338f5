use toad_macros::rfc_7252_doc;

use crate::from_bytes::{Cursor, TryConsumeBytes};
use crate::to_bytes::{opt_len_or_delta, MessageToBytesError, Unsupported, Writer};
use crate::{Opts, PAYLOAD_MARKER};

/// Option parsing errors
pub mod parse_error;
pub use parse_error::*;

/// Known option numbers
pub mod known;
pub use known::*;

/// Decode one nibble of an option header, consuming its extension bytes.
///
/// The result may be as large as `65535 + 269`, which does not fit in a `u16`.
pub(crate) fn parse_opt_len_or_delta(head: u8,
                                     bytes: &mut Cursor<'_>,
                                     reserved_err: OptParseError)
                                     -> Result<u32, OptParseError> {
  match head {
    | 13 => {
      let n = bytes.next().ok_or(OptParseError::OptionHeaderTooShort)?;
      Ok(u32::from(n) + 13)
    },
    | 14 => match bytes.take_exact(2) {
      | Some(&[a, b]) => Ok(u32::from(u16::from_be_bytes([a, b])) + 269),
      | _ => Err(OptParseError::OptionHeaderTooShort),
    },
    | 15 => Err(reserved_err),
    | _ => Ok(u32::from(head)),
  }
}

#[doc = rfc_7252_doc!("5.4")]
/// <details><summary><b>RFC7252 Section 3.1 Option binary format</b></summary>
#[doc = concat!("\n#", rfc_7252_doc!("3.1"))]
/// </details>
///
/// # `Opt` struct
/// A CoAP Option whose number has already been
/// reconstructed from the running sum of deltas on the wire.
///
/// The value borrows from the datagram the option was parsed from.
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct Opt<'a> {
  /// See [`OptNumber`]
  pub number: OptNumber,
  /// See [`OptValue`]
  pub value: OptValue<'a>,
}

impl<'a> Opt<'a> {
  /// Number of bytes this option occupies on the wire
  /// when following an option numbered `previous`.
  pub fn size(&self, previous: OptNumber) -> usize {
    let ext = |n: u32| match n {
      | n if n >= 269 => 2,
      | n if n >= 13 => 1,
      | _ => 0,
    };

    let delta = self.number.0.saturating_sub(previous.0);
    1 + ext(delta) + ext(self.value.0.len() as u32) + self.value.0.len()
  }

  /// Write this option to `bytes`, encoding its number
  /// as a delta from the option written before it (`previous`).
  pub fn extend_bytes(&self,
                      previous: OptNumber,
                      bytes: &mut Writer<'_>)
                      -> Result<(), MessageToBytesError> {
    if self.number < previous {
      return Err(Unsupported::OptionsOutOfOrder { previous: previous.0,
                                                  number: self.number.0 }.into());
    }

    let len = u32::try_from(self.value.0.len()).unwrap_or(u32::MAX);
    let (del, del_bytes) = opt_len_or_delta(self.number.0 - previous.0)?;
    let (len, len_bytes) = opt_len_or_delta(len)?;

    bytes.push((del << 4) | len)?;
    bytes.extend_from_slice(&del_bytes)?;
    bytes.extend_from_slice(&len_bytes)?;
    bytes.extend_from_slice(self.value.0)
  }

  /// Parse a single option following an option numbered `previous`.
  ///
  /// Returns `Ok(None)` when there are no more options; that is,
  /// the cursor is exhausted or points at the payload marker.
  pub(crate) fn try_consume_bytes(bytes: &mut Cursor<'a>,
                                  previous: OptNumber)
                                  -> Result<Option<Self>, OptParseError> {
    let byte1 = match bytes.peek() {
      | None | Some(PAYLOAD_MARKER) => return Ok(None),
      | Some(b) => {
        bytes.next();
        b
      },
    };

    // delta extension bytes precede length extension bytes on the wire
    let delta = parse_opt_len_or_delta(byte1 >> 4, bytes, OptParseError::OptionDeltaInvalid)?;
    let len = parse_opt_len_or_delta(byte1 & 0b00001111, bytes, OptParseError::OptionLenInvalid)?;

    let remaining = bytes.remaining();
    let value = usize::try_from(len).ok()
                                    .and_then(|n| bytes.take_exact(n))
                                    .ok_or(OptParseError::OptionTooBig { len, remaining })?;

    Ok(Some(Opt { number: OptNumber(previous.0 + delta),
                  value: OptValue(value) }))
  }
}

impl<'a> TryConsumeBytes<'a> for Opts<'a> {
  type Error = OptParseError;

  /// Parse options until the payload marker, the end of the datagram,
  /// or [`MAX_OPTS`](crate::MAX_OPTS) options have been collected,
  /// whichever comes first.
  ///
  /// Reaching capacity is not an error; parsing simply stops
  /// and the cursor is left pointing at the first ignored option.
  fn try_consume_bytes(bytes: &mut Cursor<'a>) -> Result<Self, Self::Error> {
    let mut opts = Opts::default();
    let mut number = OptNumber(0);

    while opts.len() < opts.capacity() {
      match Opt::try_consume_bytes(bytes, number)? {
        | Some(opt) => {
          number = opt.number;
          opts.push(opt);
        },
        | None => break,
      }
    }

    Ok(opts)
  }
}

#[doc = rfc_7252_doc!("5.4.6")]
/// <details><summary><b>RFC7252 Section 12.2 Core CoAP Option Numbers</b></summary>
#[doc = concat!("\n#", rfc_7252_doc!("12.2"))]
/// </details>
///
/// # `OptNumber` struct
/// The largest number that can follow option 0 on the wire is 65804.
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct OptNumber(pub u32);

#[doc = rfc_7252_doc!("3.2")]
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct OptValue<'a>(pub &'a [u8]);

impl<'a> OptValue<'a> {
  /// Interpret this value as a big-endian unsigned integer.
  ///
  /// Empty values are 0. Only the last 4 bytes of longer values are considered.
  ///
  /// ```
  /// use toadlet_msg::OptValue;
  ///
  /// assert_eq!(OptValue(&[]).as_uint(), 0);
  /// assert_eq!(OptValue(&[40]).as_uint(), 40);
  /// assert_eq!(OptValue(&[1, 0]).as_uint(), 256);
  /// ```
  pub fn as_uint(&self) -> u32 {
    let start = self.0.len().saturating_sub(4);
    self.0[start..]
        .iter()
        .fold(0u32, |n, b| (n << 8) | u32::from(*b))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse_one(bytes: &[u8]) -> Result<Option<Opt<'_>>, OptParseError> {
    Opt::try_consume_bytes(&mut Cursor::new(bytes), OptNumber(0))
  }

  #[test]
  fn parse_opt() {
    let opt = parse_one(&[0b00010001, 0b00000001]).unwrap().unwrap();
    assert_eq!(opt,
               Opt { number: OptNumber(1),
                     value: OptValue(&[1]) });

    let opt = parse_one(&[0b11010001, 0b00000001, 0b00000001]).unwrap()
                                                               .unwrap();
    assert_eq!(opt,
               Opt { number: OptNumber(14),
                     value: OptValue(&[1]) });

    let opt = parse_one(&[0b11100001, 0b00000000, 0b00000001, 0b00000001]).unwrap()
                                                                           .unwrap();
    assert_eq!(opt,
               Opt { number: OptNumber(270),
                     value: OptValue(&[1]) });

    let mut bytes = Cursor::new(&[0b00000001, 0b00000001, 0b00010001, 0b00000011, 0b11111111]);
    let opts = Opts::try_consume_bytes(&mut bytes).unwrap();
    assert_eq!(opts.as_slice(),
               &[Opt { number: OptNumber(0),
                       value: OptValue(&[1]) },
                 Opt { number: OptNumber(1),
                       value: OptValue(&[3]) }]);
    assert_eq!(bytes.peek(), Some(PAYLOAD_MARKER));
  }

  #[test]
  fn numbers_accumulate() {
    let opt = Opt::try_consume_bytes(&mut Cursor::new(&[0b0001_0000]), OptNumber(11)).unwrap()
                                                                                      .unwrap();
    assert_eq!(opt.number, OptNumber(12));
  }

  #[test]
  fn nibble_boundaries() {
    // 12 is literal, 13 takes an extension byte
    assert_eq!(parse_one(&[0b1100_0000]).unwrap().unwrap().number,
               OptNumber(12));
    assert_eq!(parse_one(&[0b1101_0000, 0]).unwrap().unwrap().number,
               OptNumber(13));

    // 268 is the largest 1-byte extension, 269 takes two
    assert_eq!(parse_one(&[0b1101_0000, 255]).unwrap().unwrap().number,
               OptNumber(268));
    assert_eq!(parse_one(&[0b1110_0000, 0, 0]).unwrap().unwrap().number,
               OptNumber(269));

    // largest expressible delta
    assert_eq!(parse_one(&[0b1110_0000, 255, 255]).unwrap().unwrap().number,
               OptNumber(65804));
  }

  #[test]
  fn reserved_nibble_rejected() {
    assert_eq!(parse_one(&[0b1111_0000]), Err(OptParseError::OptionDeltaInvalid));
    assert_eq!(parse_one(&[0b0000_1111]), Err(OptParseError::OptionLenInvalid));
    assert_eq!(parse_one(&[0b0001_1111]), Err(OptParseError::OptionLenInvalid));
  }

  #[test]
  fn truncated() {
    assert_eq!(parse_one(&[0b1101_0000]), Err(OptParseError::OptionHeaderTooShort));
    assert_eq!(parse_one(&[0b1110_0000, 1]), Err(OptParseError::OptionHeaderTooShort));
    assert_eq!(parse_one(&[0b0000_1110, 1]), Err(OptParseError::OptionHeaderTooShort));
    assert_eq!(parse_one(&[0b0000_0011, 1, 2]),
               Err(OptParseError::OptionTooBig { len: 3,
                                                 remaining: 2 }));
  }

  #[test]
  fn exhausted() {
    assert_eq!(parse_one(&[]), Ok(None));
    assert_eq!(parse_one(&[PAYLOAD_MARKER, 1]), Ok(None));
  }

  #[test]
  fn size() {
    let value = [0u8; 13];
    let opt = Opt { number: OptNumber(300),
                    value: OptValue(&value) };
    assert_eq!(opt.size(OptNumber(0)), 1 + 2 + 1 + 13);
    assert_eq!(opt.size(OptNumber(299)), 1 + 1 + 13);

    let mut buf = [0u8; 32];
    let mut w = Writer::new(&mut buf);
    opt.extend_bytes(OptNumber(0), &mut w).unwrap();
    assert_eq!(w.len(), opt.size(OptNumber(0)));
  }
}
