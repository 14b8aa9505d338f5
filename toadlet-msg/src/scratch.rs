use crate::MessageToBytesError;

/// A bump allocator over a caller-supplied byte buffer.
///
/// Every region handed out by a `Scratch` is disjoint from every other
/// and borrows from the underlying buffer for `'a`, so values staged
/// here (e.g. the encoded value of an option) may be referenced by a
/// [`Packet<'a>`](crate::Packet) after the `Scratch` is gone.
///
/// Space is never reclaimed; create a new `Scratch` for every datagram.
///
/// ```
/// use toadlet_msg::Scratch;
///
/// let mut buf = [0u8; 4];
/// let mut scratch = Scratch::new(&mut buf);
///
/// let a = scratch.copy_from_slice(&[1, 2]).unwrap();
/// let b = scratch.take(2).unwrap();
/// b.copy_from_slice(&[3, 4]);
///
/// assert_eq!(scratch.remaining(), 0);
/// assert!(scratch.take(1).is_err());
/// assert_eq!(a, &[1, 2]);
/// ```
#[derive(Debug)]
pub struct Scratch<'a> {
  buf: &'a mut [u8],
  used: usize,
}

impl<'a> Scratch<'a> {
  /// Create a scratch arena over `buf`
  pub fn new(buf: &'a mut [u8]) -> Self {
    Self { buf, used: 0 }
  }

  /// Number of bytes not yet handed out
  pub fn remaining(&self) -> usize {
    self.buf.len()
  }

  /// Number of bytes handed out so far
  pub fn used(&self) -> usize {
    self.used
  }

  /// Take the next `n` bytes of the buffer.
  ///
  /// Fails with [`MessageToBytesError::BufferTooSmall`] when fewer than `n` bytes remain;
  /// nothing is consumed in that case.
  pub fn take(&mut self, n: usize) -> Result<&'a mut [u8], MessageToBytesError> {
    if n > self.buf.len() {
      return Err(MessageToBytesError::BufferTooSmall { capacity: self.used + self.buf.len(),
                                                       size: self.used + n });
    }

    let buf = core::mem::take(&mut self.buf);
    let (taken, rest) = buf.split_at_mut(n);
    self.buf = rest;
    self.used += n;
    Ok(taken)
  }

  /// Copy `bytes` into the arena, returning the copy
  pub fn copy_from_slice(&mut self, bytes: &[u8]) -> Result<&'a [u8], MessageToBytesError> {
    let dst = self.take(bytes.len())?;
    dst.copy_from_slice(bytes);
    Ok(dst)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn regions_are_disjoint() {
    let mut buf = [0u8; 8];
    let mut scratch = Scratch::new(&mut buf);

    let a = scratch.take(3).unwrap();
    let b = scratch.take(3).unwrap();
    a.fill(1);
    b.fill(2);

    assert_eq!(a, &[1, 1, 1]);
    assert_eq!(b, &[2, 2, 2]);
    assert_eq!(scratch.used(), 6);
    assert_eq!(scratch.remaining(), 2);
  }

  #[test]
  fn too_small() {
    let mut buf = [0u8; 1];
    let mut scratch = Scratch::new(&mut buf);

    assert_eq!(scratch.copy_from_slice(&[0, 40]),
               Err(MessageToBytesError::BufferTooSmall { capacity: 1, size: 2 }));
    assert_eq!(scratch.remaining(), 1);
    assert_eq!(scratch.take(0).map(|s| s.len()), Ok(0));
  }
}
