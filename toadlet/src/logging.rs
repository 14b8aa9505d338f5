use core::fmt::Write;

use tinyvec::ArrayVec;
use toad_writable::Writable;
use toadlet_msg::Packet;

/// Render a one-line summary of a message, e.g. `Ack 2.05 with 11 byte payload`
///
/// Output that does not fit in the buffer is cut short.
///
/// ```
/// use toadlet::logging::msg_summary;
/// use toadlet_msg::*;
///
/// let packet = Packet { header: Header { ver: Version(1),
///                                        ty: Type::Ack,
///                                        tkl: 0,
///                                        code: Code::new(2, 5),
///                                        id: Id(1) },
///                       token: Token(&[]),
///                       opts: Default::default(),
///                       payload: Payload(b"Hello World") };
///
/// assert_eq!(msg_summary(&packet).as_str(), "Ack 2.05 with 11 byte payload");
/// ```
pub fn msg_summary(msg: &Packet<'_>) -> Writable<ArrayVec<[u8; 64]>> {
  let mut buf: Writable<ArrayVec<[u8; 64]>> = Default::default();
  write!(buf,
         "{:?} {} with {} byte payload",
         msg.header.ty,
         msg.header.code,
         msg.payload.0.len()).ok();
  buf
}
