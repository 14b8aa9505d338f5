use toadlet_msg::*;

/// Owned buffers that a [`Packet`] under test borrows from
pub struct Fixture {
  pub ty: Type,
  pub code: Code,
  pub id: u16,
  pub token: Vec<u8>,
  pub opts: Vec<(u32, Vec<u8>)>,
  pub payload: Vec<u8>,
}

impl Fixture {
  pub fn packet(&self) -> Packet<'_> {
    let opts = self.opts
                   .iter()
                   .map(|(n, v)| Opt { number: OptNumber(*n),
                                       value: OptValue(v) })
                   .collect::<Opts>();

    Packet { header: Header { ver: Version(1),
                              ty: self.ty,
                              tkl: self.token.len() as u8,
                              code: self.code,
                              id: Id(self.id) },
             token: Token(&self.token),
             opts,
             payload: Payload(&self.payload) }
  }
}

pub fn to_bytes(packet: &Packet) -> Vec<u8> {
  let mut buf = vec![0u8; 1 << 17];
  let n = packet.try_into_bytes(&mut buf).unwrap();
  buf.truncate(n);
  buf
}
