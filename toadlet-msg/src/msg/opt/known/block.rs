use tinyvec::ArrayVec;

/// Three items of information may need to be transferred in a
/// Block (Block1 or Block2) option:
/// * the size of the block ([`Block::size`])
/// * whether more blocks are following ([`Block::more`])
/// * the relative number of the block ([`Block::num`]) within a sequence of blocks with the given size.
///
/// On the wire this is an unsigned integer of 0 to 3 bytes:
///
/// ```text
///  0
///  0 1 2 3 4 5 6 7
/// +-+-+-+-+-+-+-+-+
/// |  NUM  |M| SZX |
/// +-+-+-+-+-+-+-+-+
///
///  0                   1
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |          NUM          |M| SZX |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
/// (and so on for 3 bytes / 20 bits of NUM)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Block(u32);

impl Block {
  /// Largest block number expressible in 3 bytes
  pub const MAX_NUM: u32 = (1 << 20) - 1;

  /// Largest meaningful size exponent (1024 byte blocks)
  pub const MAX_SZX: u8 = 6;

  /// Create a block descriptor.
  ///
  /// `szx` is clamped to [`Block::MAX_SZX`] and `num` to [`Block::MAX_NUM`].
  ///
  /// ```
  /// use toadlet_msg::Block;
  ///
  /// let b = Block::new(2, 1, true);
  /// assert_eq!(b.size(), 64);
  /// assert_eq!(b.offset(), 64);
  /// assert!(b.more());
  /// ```
  pub fn new(szx: u8, num: u32, more: bool) -> Self {
    let num = num.min(Self::MAX_NUM) << 4;
    let more = u32::from(more) << 3;
    let szx = u32::from(szx.min(Self::MAX_SZX));

    Self(num | more | szx)
  }

  /// Decode a Block option value of 0 to 3 bytes.
  ///
  /// Returns `None` for values longer than 3 bytes.
  pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
    if bytes.len() > 3 {
      return None;
    }

    Some(Self(bytes.iter().fold(0u32, |n, b| (n << 8) | u32::from(*b))))
  }

  /// Encode this block as the shortest unsigned integer that holds it
  ///
  /// ```
  /// use toadlet_msg::Block;
  ///
  /// assert_eq!(Block::new(0, 0, false).encode().as_slice(), &[]);
  /// assert_eq!(Block::new(2, 15, true).encode().as_slice(), &[0b1111_1010]);
  /// assert_eq!(Block::new(2, 16, false).encode().as_slice(), &[0b0000_0001, 0b0000_0010]);
  /// ```
  pub fn encode(&self) -> ArrayVec<[u8; 3]> {
    let [_, a, b, c] = self.0.to_be_bytes();
    let mut bytes = ArrayVec::new();

    match self.0 {
      | 0 => (),
      | n if n <= 0xFF => bytes.push(c),
      | n if n <= 0xFFFF => bytes.extend([b, c]),
      | _ => bytes.extend([a, b, c]),
    }

    bytes
  }

  /// The size exponent. The reserved value 7 reads as 6.
  pub fn szx(&self) -> u8 {
    ((self.0 & 0b111) as u8).min(Self::MAX_SZX)
  }

  /// The size of the block in bytes, `2 << (szx + 3)`
  pub fn size(&self) -> u16 {
    2u16 << (self.szx() + 3)
  }

  /// Whether more blocks follow this one
  pub fn more(&self) -> bool {
    (self.0 & 0b1000) >> 3 == 1
  }

  /// The number of this block within the sequence
  pub fn num(&self) -> u32 {
    self.0 >> 4
  }

  /// Byte offset of this block within the whole representation
  pub fn offset(&self) -> u32 {
    self.num() * u32::from(self.size())
  }

  /// Copy of this block with the "more" flag set to `more`
  pub fn with_more(&self, more: bool) -> Self {
    Self::new(self.szx(), self.num(), more)
  }

  /// Express this block with a size exponent no larger than `max_szx`,
  /// multiplying the block number so that the byte offset is unchanged.
  ///
  /// ```
  /// use toadlet_msg::Block;
  ///
  /// let big = Block::new(6, 1, false); // bytes 1024..2048
  /// let small = big.with_max_szx(2); // 64 byte blocks
  /// assert_eq!(small.num(), 16);
  /// assert_eq!(small.offset(), big.offset());
  /// ```
  pub fn with_max_szx(&self, max_szx: u8) -> Self {
    let max_szx = max_szx.min(Self::MAX_SZX);

    match self.szx() {
      | szx if szx <= max_szx => *self,
      | szx => {
        let num = self.num()
                      .saturating_mul(1 << (szx - max_szx))
                      .min(Self::MAX_NUM);
        Self::new(max_szx, num, self.more())
      },
    }
  }
}

impl From<Block> for u32 {
  fn from(b: Block) -> Self {
    b.0
  }
}

impl From<u32> for Block {
  fn from(n: u32) -> Self {
    Block(n)
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn block() {
    let b = Block(33);
    assert_eq!(b.size(), 32);
    assert_eq!(b.num(), 2);
    assert_eq!(b.more(), false);

    let b = Block(59);
    assert_eq!(b.size(), 128);
    assert_eq!(b.num(), 3);
    assert_eq!(b.more(), true);

    assert_eq!(Block::new(1, 2, false), Block(33));
    assert_eq!(Block::new(3, 3, true), Block(59));
  }

  #[test]
  fn sizes() {
    assert_eq!(Block::new(0, 0, false).size(), 16);
    assert_eq!(Block::new(2, 0, false).size(), 64);
    assert_eq!(Block::new(6, 0, false).size(), 1024);
    assert_eq!(Block::new(7, 0, false).size(), 1024);
    assert_eq!(Block(0b0111).size(), 1024);
  }

  #[test]
  fn from_bytes() {
    assert_eq!(Block::from_bytes(&[]), Some(Block(0)));
    assert_eq!(Block::from_bytes(&[0b0001_1010]).map(|b| (b.num(), b.more(), b.size())),
               Some((1, true, 64)));
    assert_eq!(Block::from_bytes(&[0x01, 0x02]).map(|b| b.num()), Some(16));
    assert_eq!(Block::from_bytes(&[0xFF, 0xFF, 0xF6]).map(|b| b.num()),
               Some(Block::MAX_NUM));
    assert_eq!(Block::from_bytes(&[0, 0, 0, 0]), None);
  }

  #[test]
  fn encode_widens() {
    let b = Block::new(2, 15, false);
    assert_eq!(b.encode().len(), 1);
    assert_eq!(b.with_more(true).encode().len(), 1);

    let b = Block::new(2, 16, false);
    assert_eq!(b.encode().len(), 2);

    let b = Block::new(2, 4096, false);
    assert_eq!(b.encode().len(), 3);
    assert_eq!(Block::from_bytes(&b.encode()), Some(b));
  }

  #[test]
  fn max_szx() {
    let b = Block::new(2, 3, true);
    assert_eq!(b.with_max_szx(6), b);
    assert_eq!(b.with_max_szx(0), Block::new(0, 12, true));
    assert_eq!(Block::new(6, Block::MAX_NUM, false).with_max_szx(0).num(),
               Block::MAX_NUM);
  }
}
