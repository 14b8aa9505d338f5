//! The `/.well-known/core` document is generated on demand as a stream
//! of small byte "tokens" (`<`, `/`, a path segment, `;ct=`, ...).
//!
//! A [`Window`] is fed every token of the document, in order, and keeps
//! only the bytes that fall within the requested block. The document is
//! never materialized in full.

use core::fmt::Write;

use tinyvec::ArrayVec;
use toad_writable::Writable;
use toadlet_msg::{Block, MessageToBytesError, Scratch};

use crate::server::Route;

/// Keeps the bytes of a token stream that fall in the range
/// `offset..offset + out.len()`, writing them to `out`.
///
/// ```
/// use toadlet::block::Window;
///
/// let mut out = [0u8; 4];
/// let mut window = Window::new(3, &mut out);
///
/// window.emit(b"ab");
/// window.emit(b"cdef");
/// window.emit(b"gh");
///
/// assert_eq!(window.finish(), (&b"defg"[..], true));
/// ```
#[derive(Debug)]
pub struct Window<'o> {
  out: &'o mut [u8],
  len: usize,
  skip: usize,
  truncated: bool,
}

impl<'o> Window<'o> {
  /// Create a window that skips the first `offset` bytes of the stream
  /// and keeps at most `out.len()` bytes after that.
  pub fn new(offset: usize, out: &'o mut [u8]) -> Self {
    Self { out,
           len: 0,
           skip: offset,
           truncated: false }
  }

  /// Feed the next token of the stream through the window
  pub fn emit(&mut self, token: &[u8]) {
    let unskipped = token.len().saturating_sub(self.skip);
    let start = token.len() - unskipped;
    self.skip = self.skip.saturating_sub(token.len());

    if unskipped == 0 {
      return;
    }

    let space = self.out.len() - self.len;
    let n = unskipped.min(space);

    self.out[self.len..self.len + n].copy_from_slice(&token[start..start + n]);
    self.len += n;

    if n < unskipped {
      self.truncated = true;
    }
  }

  /// Number of bytes kept so far
  pub fn len(&self) -> usize {
    self.len
  }

  /// Whether no bytes have been kept
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Whether the window has no space left
  pub fn is_full(&self) -> bool {
    self.len == self.out.len()
  }

  /// Yield the kept bytes, and whether any byte of the stream
  /// after the window was seen (i.e. whether there is a next block).
  pub fn finish(self) -> (&'o [u8], bool) {
    let Window { out,
                 len,
                 truncated,
                 .. } = self;
    (&out[..len], truncated)
  }
}

/// Feed the CoRE link-format document (RFC 6690) describing `routes`
/// through `window`.
///
/// Every route with a [`Link`](crate::server::Link) contributes
/// `<path>;title="title";ct=N`, separated by commas.
pub fn link_format(routes: &[Route], window: &mut Window<'_>) {
  routes.iter()
        .filter_map(|route| route.link.map(|link| (route, link)))
        .enumerate()
        .for_each(|(ix, (route, link))| {
          if ix > 0 {
            window.emit(b",");
          }

          window.emit(b"<");
          route.path.iter().for_each(|seg| {
                             window.emit(b"/");
                             window.emit(seg.as_bytes());
                           });
          window.emit(b">");

          window.emit(b";title=\"");
          window.emit(link.title.as_bytes());
          window.emit(b"\"");

          let mut ct: Writable<ArrayVec<[u8; 5]>> = Default::default();
          write!(ct, "{}", u16::from(&link.content_format)).ok();
          window.emit(b";ct=");
          window.emit(ct.as_slice());
        });
}

/// Generate block `block` of the discovery document for `routes`.
///
/// The bytes are written to `scratch`, which must have at least
/// `block.size()` bytes remaining.
///
/// Yields the payload and the Block2 descriptor to send with it.
pub fn discovery<'a>(routes: &[Route],
                     block: Block,
                     scratch: &mut Scratch<'a>)
                     -> Result<(&'a [u8], Block), MessageToBytesError> {
  let out = scratch.take(usize::from(block.size()))?;
  let offset = usize::try_from(block.offset()).unwrap_or(usize::MAX);

  let mut window = Window::new(offset, out);
  link_format(routes, &mut window);
  let (payload, more) = window.finish();

  log::debug!("discovery block {} ({} bytes, more: {})",
              block.num(),
              payload.len(),
              more);

  Ok((payload, block.with_more(more)))
}

#[cfg(test)]
mod tests {
  use toadlet_msg::{ContentFormat, Packet};

  use super::*;

  fn noop<'a>(_: &mut Scratch<'a>, req: &Packet<'a>) -> Result<Packet<'a>, MessageToBytesError> {
    Ok(req.clone())
  }

  /// 15 tokens of 10 bytes
  fn doc_150(window: &mut Window<'_>) {
    (0..15u8).for_each(|n| window.emit(&[b'a' + n; 10]))
  }

  fn block_of_150(num: usize, size: usize) -> (Vec<u8>, bool) {
    let mut out = vec![0u8; size];
    let mut window = Window::new(num * size, &mut out);
    doc_150(&mut window);
    let (bytes, more) = window.finish();
    (bytes.to_vec(), more)
  }

  #[test]
  fn paginates() {
    let (b0, more0) = block_of_150(0, 64);
    assert_eq!((b0.len(), more0), (64, true));
    assert_eq!(&b0[..11], b"aaaaaaaaaab");

    let (b1, more1) = block_of_150(1, 64);
    assert_eq!((b1.len(), more1), (64, true));
    assert_eq!(b1[0], b'g');

    let (b2, more2) = block_of_150(2, 64);
    assert_eq!((b2.len(), more2), (22, false));
    assert_eq!(b2.last(), Some(&b'o'));

    let whole = [b0, b1, b2].concat();
    let (expected, _) = block_of_150(0, 150);
    assert_eq!(whole, expected);
  }

  #[test]
  fn past_the_end() {
    assert_eq!(block_of_150(3, 64), (vec![], false));
    assert_eq!(block_of_150(1000, 1024), (vec![], false));
  }

  #[test]
  fn ending_on_boundary_has_no_more() {
    assert_eq!(block_of_150(0, 150).1, false);
    assert_eq!(block_of_150(4, 30),
               ([[b'm'; 10], [b'n'; 10], [b'o'; 10]].concat(), false));
  }

  #[test]
  fn empty_tokens_are_harmless() {
    let mut out = [0u8; 2];
    let mut window = Window::new(1, &mut out);
    window.emit(b"");
    window.emit(b"ab");
    window.emit(b"");
    assert!(!window.is_full());
    window.emit(b"c");
    assert!(window.is_full());
    window.emit(b"");
    assert_eq!(window.finish(), (&b"bc"[..], false));
  }

  #[test]
  fn link_format_document() {
    static ROUTES: [Route; 3] = [Route::get(&["hello"], noop).link("Hi", ContentFormat::Text),
                                 Route::put(&["led"], noop),
                                 Route::get(&["sensors", "temp"], noop).link("Temperature",
                                                                            ContentFormat::Json)];

    let mut out = [0u8; 256];
    let mut window = Window::new(0, &mut out);
    link_format(&ROUTES, &mut window);
    let (doc, more) = window.finish();

    assert_eq!(core::str::from_utf8(doc).unwrap(),
               "</hello>;title=\"Hi\";ct=0,</sensors/temp>;title=\"Temperature\";ct=50");
    assert!(!more);
  }

  #[test]
  fn discovery_needs_scratch() {
    let mut buf = [0u8; 63];
    let mut scratch = Scratch::new(&mut buf);
    assert_eq!(discovery(&[], Block::new(2, 0, false), &mut scratch),
               Err(MessageToBytesError::BufferTooSmall { capacity: 63,
                                                         size: 64 }));
  }
}
