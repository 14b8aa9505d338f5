use tinyvec::ArrayVec;
use toad_macros::rfc_7252_doc;

/// Message Code
pub mod code;

/// Message parsing errors
pub mod parse_error;

/// Message ID
pub mod id;

/// Message Options
pub mod opt;

/// Message Type
pub mod ty;

/// Message Token
pub mod token;

/// Message Version
pub mod ver;

pub use code::*;
pub use id::*;
pub use opt::*;
pub use parse_error::*;
pub use token::*;
pub use ty::*;
pub use ver::*;

use crate::from_bytes::{Cursor, TryConsumeBytes};
use crate::to_bytes::{MessageToBytesError, Writer};
use crate::TryFromBytes;

/// Byte separating the options from the payload
pub const PAYLOAD_MARKER: u8 = 0b1111_1111;

/// Maximum number of options a [`Packet`] holds.
///
/// Options in a datagram beyond this many are ignored while parsing.
pub const MAX_OPTS: usize = 16;

/// Fixed-capacity, ordered collection of the options in a [`Packet`]
pub type Opts<'a> = ArrayVec<[Opt<'a>; MAX_OPTS]>;

#[doc = rfc_7252_doc!("5.5")]
///
/// # `Payload` struct
/// Borrowed view of the bytes following the payload marker.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Payload<'a>(pub &'a [u8]);

impl<'a> TryConsumeBytes<'a> for Payload<'a> {
  type Error = MessageParseError;

  /// Everything after a `0xFF` marker is payload, provided at least one
  /// byte follows the marker. A marker with nothing behind it yields an
  /// empty payload.
  fn try_consume_bytes(bytes: &mut Cursor<'a>) -> Result<Self, Self::Error> {
    match bytes.peek() {
      | Some(PAYLOAD_MARKER) if bytes.remaining() > 1 => {
        bytes.next();
        Ok(Payload(bytes.take_until_end()))
      },
      | _ => Ok(Payload(&[])),
    }
  }
}

/// Struct representing the first byte of a message.
///
/// ```text
/// CoAP version
/// |
/// |  Message type (request, response, empty)
/// |  |
/// |  |  Length of token, in bytes. (4-bit integer)
/// |  |  |
/// vv vv vvvv
/// 01 00 0000
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub(crate) struct Byte1 {
  pub(crate) ver: Version,
  pub(crate) ty: Type,
  pub(crate) tkl: u8,
}

impl From<u8> for Byte1 {
  fn from(b: u8) -> Self {
    let ver = (b & 0b1100_0000) >> 6;
    let ty = (b & 0b0011_0000) >> 4;
    let tkl = b & 0b0000_1111;

    Byte1 { ver: Version(ver),
            ty: Type::from(ty),
            tkl }
  }
}

/// The fixed 4-byte message header
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |Ver| T |  TKL  |      Code     |          Message ID           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Header {
  /// see [`Version`] for details
  pub ver: Version,
  /// see [`Type`] for details
  pub ty: Type,
  /// Length of the token, in bytes (0-8)
  pub tkl: u8,
  /// see [`Code`] for details
  pub code: Code,
  /// see [`Id`] for details
  pub id: Id,
}

impl Header {
  /// Size of the header on the wire
  pub const SIZE: usize = 4;

  pub(crate) fn extend_bytes(&self, bytes: &mut Writer<'_>) -> Result<(), MessageToBytesError> {
    let byte1: u8 = Byte1 { ver: self.ver,
                            ty: self.ty,
                            tkl: self.tkl }.into();
    let [id_hi, id_lo]: [u8; 2] = self.id.into();

    bytes.extend_from_slice(&[byte1, self.code.into(), id_hi, id_lo])
  }
}

impl<'a> TryConsumeBytes<'a> for Header {
  type Error = MessageParseError;

  fn try_consume_bytes(bytes: &mut Cursor<'a>) -> Result<Self, Self::Error> {
    match bytes.take_exact(Header::SIZE) {
      | Some(&[byte1, code, id_hi, id_lo]) => {
        let Byte1 { ver, ty, tkl } = Byte1::from(byte1);

        if ver != Version(1) {
          return Err(MessageParseError::VersionNotOne(ver.0));
        }

        Ok(Header { ver,
                    ty,
                    tkl,
                    code: Code::from(code),
                    id: Id::from_be_bytes([id_hi, id_lo]) })
      },
      | _ => Err(MessageParseError::HeaderTooShort),
    }
  }
}

impl<'a> TryFromBytes<'a> for Header {
  type Error = MessageParseError;

  fn try_from_bytes(bytes: &'a [u8]) -> Result<Self, Self::Error> {
    Header::try_consume_bytes(&mut Cursor::new(bytes))
  }
}

/// # `Packet` struct
/// Low-level representation of a message that has been parsed from the raw binary format.
///
/// Every variable-length part of a `Packet` ([`Token`], [`OptValue`], [`Payload`])
/// borrows from the buffer the packet was parsed from (or, for packets built
/// in memory, from whatever buffers the caller pointed them at).
/// Packets are cheap, transient values meant to live for the processing of one datagram.
///
/// Packets support both serializing to bytes and from bytes, by using the provided [`TryFromBytes`] and [`TryIntoBytes`](crate::TryIntoBytes) traits.
///
/// <details>
/// <summary><b>RFC7252 - CoAP Messaging Model</b></summary>
#[doc = concat!("\n#", rfc_7252_doc!("2.1"))]
/// </details>
/// <details>
/// <summary><b>RFC7252 - CoAP Message Binary Format</b></summary>
#[doc = concat!("\n#", rfc_7252_doc!("3"))]
/// </details>
#[derive(Clone, Debug, PartialEq)]
pub struct Packet<'a> {
  /// see [`Header`] for details
  pub header: Header,
  /// see [`Token`] for details
  pub token: Token<'a>,
  /// see [`opt::Opt`] for details
  pub opts: Opts<'a>,
  /// see [`Payload`]
  pub payload: Payload<'a>,
}

impl<'a> Packet<'a> {
  /// Get the contiguous run of options with number `number`.
  ///
  /// Options are stored in the order they appeared on the wire,
  /// which for a valid message is non-decreasing by number, so
  /// every occurrence of a repeated option is adjacent.
  ///
  /// ```
  /// use toadlet_msg::*;
  ///
  /// //        Uri-Path "a"   Uri-Path "b"   Content-Format 0
  /// let dgram = [0x40, 1, 0, 1, 0xB1, b'a', 0x01, b'b', 0x10];
  /// let packet = Packet::try_from_bytes(&dgram).unwrap();
  ///
  /// let path = packet.find_options(repeat::PATH);
  /// assert_eq!(path.len(), 2);
  /// assert_eq!(path[1].value, OptValue(b"b"));
  /// assert!(packet.find_options(no_repeat::ACCEPT).is_empty());
  /// ```
  pub fn find_options(&self, number: OptNumber) -> &[Opt<'a>] {
    let opts = self.opts.as_slice();

    match opts.iter().position(|o| o.number == number) {
      | Some(start) => {
        let run = opts[start..].iter()
                               .take_while(|o| o.number == number)
                               .count();
        &opts[start..start + run]
      },
      | None => &[],
    }
  }

  /// Get the first option with number `number`
  pub fn get_option(&self, number: OptNumber) -> Option<&Opt<'a>> {
    self.find_options(number).first()
  }

  /// Iterate over the Uri-Path segments of this message
  pub fn path(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
    self.find_options(repeat::PATH).iter().map(|o| o.value.0)
  }

  /// Get the Block2 option of this message, if present
  pub fn block2(&self) -> Option<Block> {
    self.get_option(no_repeat::BLOCK2)
        .and_then(|o| Block::from_bytes(o.value.0))
  }

  /// Get the Content-Format of this message, if present.
  ///
  /// Values wider than 2 bytes are not Content-Formats and yield `None`.
  pub fn content_format(&self) -> Option<ContentFormat> {
    self.get_option(no_repeat::CONTENT_FORMAT)
        .filter(|o| o.value.0.len() <= 2)
        .and_then(|o| u16::try_from(o.value.as_uint()).ok())
        .map(ContentFormat::from)
  }
}

impl<'a> TryFromBytes<'a> for Packet<'a> {
  type Error = MessageParseError;

  /// Parse a datagram, failing on the first malformed piece.
  ///
  /// Stages run in a fixed order (header, token, options, payload)
  /// and no partially parsed packet is ever returned.
  fn try_from_bytes(bytes: &'a [u8]) -> Result<Self, Self::Error> {
    let mut cursor = Cursor::new(bytes);

    let header = Header::try_consume_bytes(&mut cursor)?;
    let token = Token::try_consume_bytes(header.tkl, &mut cursor)?;
    let opts = Opts::try_consume_bytes(&mut cursor).map_err(MessageParseError::OptParseError)?;
    let payload = Payload::try_consume_bytes(&mut cursor)?;

    Ok(Packet { header,
                token,
                opts,
                payload })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_msg() {
    let (expect, msg) = crate::test_msg();
    assert_eq!(Packet::try_from_bytes(&msg).unwrap(), expect)
  }

  #[test]
  fn parse_byte1() {
    let byte = 0b_01_10_0011u8;
    let byte = Byte1::from(byte);
    assert_eq!(byte,
               Byte1 { ver: Version(1),
                       ty: Type::Ack,
                       tkl: 3 })
  }

  #[test]
  fn header_too_short() {
    [&[][..], &[0x40], &[0x40, 1], &[0x40, 1, 0]].into_iter()
                                                  .for_each(|bytes| {
                                                    assert_eq!(Packet::try_from_bytes(bytes),
                                                               Err(MessageParseError::HeaderTooShort))
                                                  });
  }

  #[test]
  fn version_checked_before_anything_else() {
    // version 2, token length 15 (invalid), but the version is what gets reported
    let bytes = [0b10_00_1111, 1, 0, 1];
    assert_eq!(Packet::try_from_bytes(&bytes),
               Err(MessageParseError::VersionNotOne(2)));

    let bytes = [0b00_00_0000, 1, 0, 1];
    assert_eq!(Packet::try_from_bytes(&bytes),
               Err(MessageParseError::VersionNotOne(0)));
  }

  #[test]
  fn token_too_short() {
    // declares a 2 byte token, has 1
    let bytes = [0b01_00_0010, 1, 0, 1, 0xAA];
    assert_eq!(Packet::try_from_bytes(&bytes),
               Err(MessageParseError::TokenTooShort(2)));

    // declares a 9 byte token
    let bytes = [0b01_00_1001, 1, 0, 1, 1, 2, 3, 4, 5, 6, 7, 8, 9];
    assert_eq!(Packet::try_from_bytes(&bytes),
               Err(MessageParseError::TokenTooShort(9)));
  }

  #[test]
  fn empty_token_is_empty_not_absent() {
    let bytes = [0b01_00_0000, 1, 0, 1];
    let packet = Packet::try_from_bytes(&bytes).unwrap();
    assert_eq!(packet.token, Token(&[]));
    assert!(packet.opts.is_empty());
    assert_eq!(packet.payload, Payload(&[]));
  }

  #[test]
  fn one_byte_payload_is_kept() {
    let bytes = [0x40, 1, 0, 1, PAYLOAD_MARKER, b'x'];
    let packet = Packet::try_from_bytes(&bytes).unwrap();
    assert_eq!(packet.payload, Payload(b"x"));
  }

  #[test]
  fn lone_payload_marker_is_empty_payload() {
    let bytes = [0x40, 1, 0, 1, PAYLOAD_MARKER];
    let packet = Packet::try_from_bytes(&bytes).unwrap();
    assert_eq!(packet.payload, Payload(&[]));
  }

  #[test]
  fn option_cap_truncates_silently() {
    // 20 empty options with delta 1, then a payload
    let mut bytes = vec![0x40, 1, 0, 1];
    bytes.extend(core::iter::repeat(0b0001_0000).take(20));
    bytes.extend([PAYLOAD_MARKER, b'p']);

    let packet = Packet::try_from_bytes(&bytes).unwrap();
    assert_eq!(packet.opts.len(), MAX_OPTS);
    assert_eq!(packet.opts.last().unwrap().number, OptNumber(16));

    // parsing stopped on an option header rather than the marker,
    // so there is no payload.
    assert_eq!(packet.payload, Payload(&[]));
  }

  #[test]
  fn option_errors_abort_parse() {
    let bytes = [0x40, 1, 0, 1, 0b1111_0000];
    assert_eq!(Packet::try_from_bytes(&bytes),
               Err(MessageParseError::OptParseError(OptParseError::OptionDeltaInvalid)));
  }

  #[test]
  fn options_start_after_token() {
    // tkl 2, token [0xB1, 0x61] looks like a Uri-Path option if misread
    let bytes = [0x42, 1, 0, 1, 0xB1, b'a', 0x11, 0x28];
    let packet = Packet::try_from_bytes(&bytes).unwrap();
    assert_eq!(packet.token, Token(&[0xB1, b'a']));
    assert_eq!(packet.opts.len(), 1);
    assert_eq!(packet.opts[0].number, OptNumber(1));
    assert_eq!(packet.path().count(), 0);
  }

  #[test]
  fn wide_content_format_is_not_truncated() {
    // Content-Format (12) with a 3 byte value whose low 2 bytes read as 40
    let bytes = [0x40, 1, 0, 1, 0xC3, 0x01, 0x00, 0x28];
    let packet = Packet::try_from_bytes(&bytes).unwrap();
    assert_eq!(packet.get_option(no_repeat::CONTENT_FORMAT).map(|o| o.value.0.len()),
               Some(3));
    assert_eq!(packet.content_format(), None);

    let bytes = [0x40, 1, 0, 1, 0xC2, 0x00, 0x28];
    let packet = Packet::try_from_bytes(&bytes).unwrap();
    assert_eq!(packet.content_format(), Some(ContentFormat::LinkFormat));
  }

  #[test]
  fn find_options_is_contiguous() {
    let bytes = [0x40, 1, 0, 1, 0xB1, b'a', 0x01, b'b', 0x11, 0, 0x01, b'c'];
    let packet = Packet::try_from_bytes(&bytes).unwrap();
    let path = packet.find_options(repeat::PATH);
    assert_eq!(path.len(), 2);
    assert_eq!(packet.path().collect::<Vec<_>>(), vec![&b"a"[..], &b"b"[..]]);
    assert_eq!(packet.content_format(), Some(ContentFormat::Text));
  }
}
