/// Trait for converting a sequence of bytes into some data structure
/// that borrows from those bytes.
pub trait TryFromBytes<'a>: Sized {
  /// Error type yielded if conversion fails
  type Error;

  /// Try to convert from some sequence of bytes
  /// into `Self`
  fn try_from_bytes(bytes: &'a [u8]) -> Result<Self, Self::Error>;
}

/// Trait adding the ability for a _piece_ of a data structure to parse itself by mutating a cursor over a byte buffer.
pub(crate) trait TryConsumeBytes<'a>: Sized {
  /// Error type yielded if conversion fails
  type Error;

  /// Try to convert from the bytes under the cursor into `Self`,
  /// advancing the cursor past the bytes that were consumed.
  fn try_consume_bytes(bytes: &mut Cursor<'a>) -> Result<Self, Self::Error>;
}

/// A cursor over a borrowed byte slice.
///
/// Unlike [`std::io::Cursor`], every slice handed out by this cursor
/// borrows from the underlying buffer (lifetime `'a`) rather than from
/// the cursor itself, so parsed views may outlive the cursor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cursor<'a> {
  bytes: &'a [u8],
  cursor: usize,
}

impl<'a> Cursor<'a> {
  /// Creates a new cursor
  pub fn new(bytes: &'a [u8]) -> Cursor<'a> {
    Cursor { bytes, cursor: 0 }
  }

  /// Take the next byte in the cursor, returning None
  /// if the cursor is exhausted.
  ///
  /// Runs in O(1) time.
  pub fn next(&mut self) -> Option<u8> {
    self.take_exact(1).and_then(|a| match a {
                        | &[a] => Some(a),
                        | _ => None,
                      })
  }

  /// Without advancing the position, look at the next byte.
  pub fn peek(&self) -> Option<u8> {
    self.bytes.get(self.cursor).copied()
  }

  /// Take `n` bytes from the cursor, returning None if
  /// fewer than `n` bytes remain.
  ///
  /// Runs in O(1) time.
  pub fn take_exact(&mut self, n: usize) -> Option<&'a [u8]> {
    let bytes: &'a [u8] = self.bytes;
    let end = self.cursor.checked_add(n)?;
    let taken = bytes.get(self.cursor..end)?;
    self.cursor = end;
    Some(taken)
  }

  /// Take every remaining byte, leaving the cursor exhausted.
  pub fn take_until_end(&mut self) -> &'a [u8] {
    let bytes: &'a [u8] = self.bytes;
    let rest = bytes.get(self.cursor..).unwrap_or(&[]);
    self.cursor = bytes.len();
    rest
  }

  /// The number of bytes that have not been consumed yet
  pub fn remaining(&self) -> usize {
    self.bytes.len().saturating_sub(self.cursor)
  }

  /// Whether every byte in the buffer has been consumed.
  pub fn is_exhausted(&self) -> bool {
    self.remaining() == 0
  }

  /// Get the position the cursor points to within
  /// the buffer
  pub fn position(&self) -> usize {
    self.cursor
  }
}
