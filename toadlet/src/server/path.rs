use toadlet_msg::Packet;

/// Path of the CoRE resource discovery document
pub const WELL_KNOWN_CORE: [&str; 2] = [".well-known", "core"];

/// Whether the Uri-Path of `req` is exactly `path`.
///
/// Segments must match byte-for-byte and the number of
/// segments must be equal.
///
/// ```
/// use toadlet::server::path;
/// use toadlet_msg::*;
///
/// //             GET         "a"          "bc"
/// let dgram = [0x40, 1, 0, 1, 0xB1, b'a', 0x02, b'b', b'c'];
/// let req = Packet::try_from_bytes(&dgram).unwrap();
///
/// assert!(path::matches(&["a", "bc"], &req));
/// assert!(!path::matches(&["a"], &req));
/// assert!(!path::matches(&["a", "b"], &req));
/// assert!(!path::matches(&["a", "bc", ""], &req));
/// ```
pub fn matches(path: &[&str], req: &Packet<'_>) -> bool {
  let segments = req.find_options(toadlet_msg::repeat::PATH);

  segments.len() == path.len()
  && segments.iter()
             .zip(path)
             .all(|(seg, expected)| seg.value.0 == expected.as_bytes())
}

/// Whether `req` is addressed to `/.well-known/core`
pub fn is_well_known_core(req: &Packet<'_>) -> bool {
  matches(&WELL_KNOWN_CORE, req)
}
