use tinyvec::ArrayVec;

use crate::*;

/// Trait allowing fallible serialization into a caller-supplied buffer
pub trait TryIntoBytes {
  /// Error type yielded if serialization fails
  type Error;

  /// Try to write `self` into `buf`, returning the number of bytes written.
  ///
  /// On error, the contents of `buf` past the last successful write are unspecified.
  ///
  /// ```
  /// use toadlet_msg::*;
  ///
  /// let packet = Packet { header: Header { ver: Version(1),
  ///                                        ty: Type::Con,
  ///                                        tkl: 0,
  ///                                        code: Code::new(0, 1),
  ///                                        id: Id(1) },
  ///                       token: Token(&[]),
  ///                       opts: Default::default(),
  ///                       payload: Payload(b"hi") };
  ///
  /// let mut buf = [0u8; 16];
  /// let n = packet.try_into_bytes(&mut buf).unwrap();
  /// assert_eq!(&buf[..n], &[0b0100_0000, 1, 0, 1, 0xFF, b'h', b'i']);
  ///
  /// let mut tiny = [0u8; 3];
  /// assert_eq!(packet.try_into_bytes(&mut tiny),
  ///            Err(MessageToBytesError::BufferTooSmall { capacity: 3, size: 4 }));
  /// ```
  fn try_into_bytes(&self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Serialization requests that cannot be represented on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Unsupported {
  /// The header's token length disagrees with the length of the token
  #[allow(missing_docs)]
  TokenLengthMismatch { header: u8, actual: usize },
  /// The token is longer than 8 bytes
  TokenTooLong(usize),
  /// Options must be stored in non-decreasing number order; the codec does not sort.
  #[allow(missing_docs)]
  OptionsOutOfOrder { previous: u32, number: u32 },
  /// An option delta or value length exceeded 65804,
  /// the largest value the extended nibble encoding can express
  OptionTooBig(u32),
  /// More options were added to a response than a packet can hold
  TooManyOptions,
}

/// Errors encounterable serializing to bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MessageToBytesError {
  /// Reserved capacity was not enough for size of message
  #[allow(missing_docs)]
  BufferTooSmall { capacity: usize, size: usize },
  /// The message cannot be represented on the wire.
  ///
  /// See [`Unsupported`] for the reasons this can happen.
  UnsupportedOperation(Unsupported),
}

impl MessageToBytesError {
  /// Stable numeric code for this error, suitable for logging
  ///
  /// ```
  /// use toadlet_msg::{MessageToBytesError, Unsupported};
  ///
  /// assert_eq!(MessageToBytesError::BufferTooSmall { capacity: 0, size: 4 }.code(), 9);
  /// assert_eq!(MessageToBytesError::UnsupportedOperation(Unsupported::TooManyOptions).code(), 10);
  /// ```
  pub fn code(&self) -> u8 {
    match self {
      | Self::BufferTooSmall { .. } => 9,
      | Self::UnsupportedOperation(_) => 10,
    }
  }
}

impl From<Unsupported> for MessageToBytesError {
  fn from(u: Unsupported) -> Self {
    Self::UnsupportedOperation(u)
  }
}

/// A write cursor over a caller-supplied byte buffer.
///
/// Writes past the end of the buffer fail with [`MessageToBytesError::BufferTooSmall`]
/// rather than panicking or growing.
#[derive(Debug)]
pub struct Writer<'b> {
  buf: &'b mut [u8],
  len: usize,
}

impl<'b> Writer<'b> {
  /// Create a writer that writes from the start of `buf`
  pub fn new(buf: &'b mut [u8]) -> Self {
    Self { buf, len: 0 }
  }

  /// Number of bytes written so far
  pub fn len(&self) -> usize {
    self.len
  }

  /// Whether nothing has been written yet
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Total size of the underlying buffer
  pub fn capacity(&self) -> usize {
    self.buf.len()
  }

  /// The bytes written so far
  pub fn as_slice(&self) -> &[u8] {
    &self.buf[..self.len]
  }

  /// Write a single byte
  pub fn push(&mut self, b: u8) -> Result<(), MessageToBytesError> {
    self.extend_from_slice(&[b])
  }

  /// Write a run of bytes, failing without writing anything if they do not fit
  pub fn extend_from_slice(&mut self, bytes: &[u8]) -> Result<(), MessageToBytesError> {
    let size = self.len + bytes.len();
    let capacity = self.buf.len();

    match self.buf.get_mut(self.len..size) {
      | Some(dst) => {
        dst.copy_from_slice(bytes);
        self.len = size;
        Ok(())
      },
      | None => Err(MessageToBytesError::BufferTooSmall { capacity, size }),
    }
  }
}

impl<'a> TryIntoBytes for Packet<'a> {
  type Error = MessageToBytesError;

  fn try_into_bytes(&self, buf: &mut [u8]) -> Result<usize, Self::Error> {
    let token = self.token.0;

    if token.len() > 8 {
      return Err(Unsupported::TokenTooLong(token.len()).into());
    }

    if usize::from(self.header.tkl) != token.len() {
      return Err(Unsupported::TokenLengthMismatch { header: self.header.tkl,
                                                    actual: token.len() }.into());
    }

    let mut bytes = Writer::new(buf);

    self.header.extend_bytes(&mut bytes)?;
    bytes.extend_from_slice(token)?;

    let mut previous = OptNumber(0);
    for opt in self.opts.iter() {
      opt.extend_bytes(previous, &mut bytes)?;
      previous = opt.number;
    }

    if !self.payload.0.is_empty() {
      bytes.push(PAYLOAD_MARKER)?;
      bytes.extend_from_slice(self.payload.0)?;
    }

    Ok(bytes.len())
  }
}

/// Encode an option delta or value length as a header nibble
/// plus 0, 1 or 2 extension bytes.
pub(crate) fn opt_len_or_delta(val: u32) -> Result<(u8, ArrayVec<[u8; 2]>), Unsupported> {
  let mut bytes = ArrayVec::new();

  match val {
    | n if n > 65804 => return Err(Unsupported::OptionTooBig(n)),
    | n if n >= 269 => {
      let ext = (n - 269) as u16;
      bytes.extend(ext.to_be_bytes());
      Ok((14, bytes))
    },
    | n if n >= 13 => {
      bytes.push((n - 13) as u8);
      Ok((13, bytes))
    },
    | n => Ok((n as u8, bytes)),
  }
}

impl From<Id> for [u8; 2] {
  fn from(id: Id) -> [u8; 2] {
    id.0.to_be_bytes()
  }
}

impl From<Type> for u8 {
  fn from(t: Type) -> u8 {
    use Type::*;
    match t {
      | Con => 0,
      | Non => 1,
      | Ack => 2,
      | Reset => 3,
    }
  }
}

impl From<Byte1> for u8 {
  fn from(b: Byte1) -> u8 {
    let ver = (b.ver.0 & 0b11) << 6;
    let ty = u8::from(b.ty) << 4;
    let tkl = b.tkl & 0b1111;

    ver | ty | tkl
  }
}
