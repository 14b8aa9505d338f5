//! Low-level representation of CoAP messages for constrained devices.
//!
//! The most notable item in `toadlet_msg` is [`Packet`];
//! a CoAP message very close to the actual byte layout, that
//! **borrows** every variable-length piece (token, option values, payload)
//! from the datagram it was parsed from.
//!
//! ## Allocation
//! Nothing in this crate allocates.
//!
//! - Parsing a datagram yields a [`Packet<'a>`](Packet) whose token, option values and payload
//!   are slices of the input buffer. The packet can never outlive that buffer.
//! - Options are stored in a fixed-capacity [`tinyvec::ArrayVec`] of [`MAX_OPTS`] entries.
//!   Options past that capacity are **silently ignored**; this is not an error.
//! - Serializing writes into a caller-supplied `&mut [u8]` and fails with
//!   [`MessageToBytesError::BufferTooSmall`] instead of growing anything.
//! - Values that must be *created* while building a response (e.g. the 2 bytes of a Content-Format option)
//!   are staged in a caller-supplied [`Scratch`] buffer.
//!
//! ```
//! use toadlet_msg::*;
//!
//! //                                  ver  type  tkl  code (0.01 GET)  message ID
//! //                                  |    |     |    |                |
//! //                                  vv   vv    vvvv vvvvvvvv         vvvvvvvvvvvvvvvv
//! let header: [u8; 4] = 0b_01_00_0001_00000001_0000000000000001u32.to_be_bytes();
//! let token: [u8; 1] = [254];
//! //               Uri-Path (delta 11, length 5)
//! let path: [u8; 6] = [0b1011_0101, b'h', b'e', b'l', b'l', b'o'];
//! let dgram = [header.as_ref(), token.as_ref(), path.as_ref()].concat();
//!
//! let packet = Packet::try_from_bytes(&dgram).unwrap();
//! assert_eq!(packet.header.code, Code::new(0, 1));
//! assert_eq!(packet.token, Token(&[254]));
//! assert_eq!(packet.path().collect::<Vec<_>>(), vec![b"hello".as_ref()]);
//!
//! let mut out = [0u8; 64];
//! let n = packet.try_into_bytes(&mut out).unwrap();
//! assert_eq!(&out[..n], dgram.as_slice());
//! ```

// x-release-please-start-version
#![doc(html_root_url = "https://docs.rs/toadlet-msg/0.1.0")]
// x-release-please-end
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(not(test), forbid(missing_debug_implementations, unreachable_pub))]
#![cfg_attr(not(test), deny(unsafe_code))]
#![cfg_attr(any(docsrs, feature = "docs"), feature(doc_cfg))]
#![deny(missing_docs)]

#[doc(hidden)]
pub mod from_bytes;

/// Message structs
pub mod msg;

#[doc(hidden)]
pub mod to_bytes;

/// Bump-allocated scratch space for values created while building responses
pub mod scratch;

#[doc(inline)]
pub use from_bytes::{Cursor, TryFromBytes};
#[doc(inline)]
pub use msg::*;
#[doc(inline)]
pub use scratch::Scratch;
#[doc(inline)]
pub use to_bytes::{MessageToBytesError, TryIntoBytes, Unsupported, Writer};

#[cfg(test)]
pub(crate) fn test_msg() -> (Packet<'static>, Vec<u8>) {
  let header: [u8; 4] = 0b0100_0001_0100_0101_0000_0000_0000_0001_u32.to_be_bytes();
  let token: [u8; 1] = [254u8];
  let content_format: &'static [u8] = b"application/json";
  let options: [&[u8]; 2] = [&[0b_1100_1101u8, 0b00000011u8], content_format];
  let payload: [&[u8]; 2] = [&[0b1111_1111_u8], b"hello, world!"];
  let bytes = [header.as_ref(),
               token.as_ref(),
               options.concat().as_ref(),
               payload.concat().as_ref()].concat();

  let mut opts = Opts::default();
  opts.push(Opt { number: OptNumber(12),
                  value: OptValue(content_format) });

  let msg = Packet { header: Header { ver: Version(1),
                                      ty: Type::Con,
                                      tkl: 1,
                                      code: Code { class: 2,
                                                   detail: 5 },
                                      id: Id(1) },
                     token: Token(&[254]),
                     opts,
                     payload: Payload(b"hello, world!") };
  (msg, bytes)
}
