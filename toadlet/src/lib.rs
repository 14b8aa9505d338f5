//! `toadlet` is a tiny CoAP server core for constrained devices.
//!
//! It takes a request already parsed by [`toadlet_msg`], finds the
//! [`Route`](server::Route) it is addressed to and produces a response
//! [`Packet`](toadlet_msg::Packet), without allocating.
//!
//! Receiving & sending datagrams is left to the caller:
//! ```no_run
//! use std::net::UdpSocket;
//!
//! use toadlet::server::{Dispatcher, Route};
//! use toadlet_msg::{Packet, Scratch, TryFromBytes, TryIntoBytes};
//!
//! static ROUTES: [Route; 0] = [];
//!
//! let sock = UdpSocket::bind("0.0.0.0:5683").unwrap();
//! let dispatcher = Dispatcher::new(&ROUTES);
//!
//! let mut inbound = [0u8; 4096];
//! let mut scratch = [0u8; 4096];
//! let mut outbound = [0u8; 4096];
//!
//! loop {
//!   let (n, addr) = sock.recv_from(&mut inbound).unwrap();
//!   let req = match Packet::try_from_bytes(&inbound[..n]) {
//!     | Ok(req) => req,
//!     | Err(_) => continue,
//!   };
//!
//!   let mut scratch = Scratch::new(&mut scratch);
//!   let resp = dispatcher.handle(&mut scratch, &req).unwrap();
//!   let n = resp.try_into_bytes(&mut outbound).unwrap();
//!   sock.send_to(&outbound[..n], addr).unwrap();
//! }
//! ```
//!
//! ## Discovery
//! `GET /.well-known/core` is answered with a CoRE link-format
//! document describing every route that has a [`Link`](server::Link).
//! The document is never held in memory in full; each request is served
//! only the Block2 window it asked for (see [`block`]).

// x-release-please-start-version
#![doc(html_root_url = "https://docs.rs/toadlet/0.1.0")]
// x-release-please-end
#![cfg_attr(any(docsrs, feature = "docs"), feature(doc_cfg))]
// -
// deny
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![cfg_attr(not(test), deny(unsafe_code))]
// -
// warnings
#![cfg_attr(not(test), warn(unreachable_pub))]
// -
// features
#![cfg_attr(not(feature = "std"), no_std)]

/// Helpers for logging messages
pub mod logging;

/// runtime configuration
pub mod config;

/// requests
pub mod req;

/// responses
pub mod resp;

/// routing requests to handlers
pub mod server;

/// Block-wise transfer of generated responses
pub mod block;

macro_rules! code {
  (rfc7252($section:literal) $name:ident = $c:literal.$d:literal) => {
    #[doc = toad_macros::rfc_7252_doc!($section)]
    #[allow(clippy::zero_prefixed_literal)]
    pub const $name: toadlet_msg::Code = toadlet_msg::Code::new($c, $d);
  };
  (rfc7252($section:literal) $name:ident = $newtype:tt($c:literal.$d:literal)) => {
    #[doc = toad_macros::rfc_7252_doc!($section)]
    #[allow(clippy::zero_prefixed_literal)]
    pub const $name: $newtype = $newtype(toadlet_msg::Code::new($c, $d));
  };
}

pub(crate) use code;
