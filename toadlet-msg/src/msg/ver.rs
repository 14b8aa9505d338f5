/// Version of the CoAP protocol that the message adheres to.
///
/// Only version 1 is understood; datagrams carrying any other
/// version are rejected while parsing the header.
///
/// See [RFC7252 - Message Details](https://datatracker.ietf.org/doc/html/rfc7252#section-3) for context
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Version(pub u8);

impl Default for Version {
  fn default() -> Self {
    Version(1)
  }
}
