use toad_macros::rfc_7252_doc;

use super::MessageParseError;
use crate::from_bytes::Cursor;

#[doc = rfc_7252_doc!("5.3.1")]
///
/// # `Token` struct
/// A borrowed view of 0 to 8 bytes of the datagram the message was parsed from.
/// An absent token is represented by an empty slice.
#[derive(Copy, Clone, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Token<'a>(pub &'a [u8]);

impl<'a> Token<'a> {
  /// Largest token allowed on the wire
  pub const MAX_LEN: usize = 8;

  /// Take `tkl` bytes from the cursor.
  ///
  /// Fails with [`MessageParseError::TokenTooShort`] if `tkl` exceeds
  /// [`Token::MAX_LEN`] or fewer than `tkl` bytes remain.
  pub(crate) fn try_consume_bytes(tkl: u8, bytes: &mut Cursor<'a>) -> Result<Self, MessageParseError> {
    if usize::from(tkl) > Self::MAX_LEN {
      return Err(MessageParseError::TokenTooShort(tkl));
    }

    bytes.take_exact(usize::from(tkl))
         .map(Token)
         .ok_or(MessageParseError::TokenTooShort(tkl))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn consume() {
    let mut cur = Cursor::new(&[1, 2, 3]);
    assert_eq!(Token::try_consume_bytes(2, &mut cur), Ok(Token(&[1, 2])));
    assert_eq!(cur.remaining(), 1);
    assert_eq!(Token::try_consume_bytes(2, &mut cur),
               Err(MessageParseError::TokenTooShort(2)));
  }

  #[test]
  fn empty() {
    let mut cur = Cursor::new(&[]);
    assert_eq!(Token::try_consume_bytes(0, &mut cur), Ok(Token(&[])));
  }
}
