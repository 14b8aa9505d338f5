use toadlet::req::Method;
use toadlet::resp::{code, Resp};
use toadlet::server::Route;
use toadlet_msg::*;

pub fn hello<'a>(scratch: &mut Scratch<'a>,
                 req: &Packet<'a>)
                 -> Result<Packet<'a>, MessageToBytesError> {
  Resp::for_request(req).code(code::CONTENT)
                        .payload(b"Hello World")
                        .build(scratch)
}

pub fn changed<'a>(scratch: &mut Scratch<'a>,
                   req: &Packet<'a>)
                   -> Result<Packet<'a>, MessageToBytesError> {
  Resp::for_request(req).code(code::CHANGED).build(scratch)
}

pub static ROUTES: [Route; 4] =
  [Route::get(&["hello"], hello).link("Hi", ContentFormat::Text),
   Route::put(&["led"], changed).link("LED", ContentFormat::Text),
   Route::post(&["led"], changed),
   Route::new(&[Method::GET, Method::PUT], &["sensors", "temperature"], hello).link("Temperature",
                                                                                   ContentFormat::Json)];

/// Owned request bytes
pub struct Req {
  pub bytes: Vec<u8>,
}

impl Req {
  pub fn new(ty: Type, method: Method, id: u16, token: &[u8], path: &[&str]) -> Self {
    Self::with_block2(ty, method, id, token, path, None)
  }

  pub fn with_block2(ty: Type,
                     method: Method,
                     id: u16,
                     token: &[u8],
                     path: &[&str],
                     block2: Option<&[u8]>)
                     -> Self {
    let mut opts = path.iter()
                       .map(|seg| Opt { number: repeat::PATH,
                                        value: OptValue(seg.as_bytes()) })
                       .collect::<Opts>();

    if let Some(block2) = block2 {
      opts.push(Opt { number: no_repeat::BLOCK2,
                      value: OptValue(block2) });
    }

    let packet = Packet { header: Header { ver: Version(1),
                                           ty,
                                           tkl: token.len() as u8,
                                           code: method.code(),
                                           id: Id(id) },
                          token: Token(token),
                          opts,
                          payload: Payload(&[]) };

    let mut buf = vec![0u8; 1024];
    let n = packet.try_into_bytes(&mut buf).unwrap();
    buf.truncate(n);
    Req { bytes: buf }
  }

  pub fn packet(&self) -> Packet<'_> {
    Packet::try_from_bytes(&self.bytes).unwrap()
  }
}

/// Serialize a response and parse it back, the way a client would see it
pub fn over_the_wire(resp: &Packet, out: &mut Vec<u8>) {
  out.resize(4096, 0);
  let n = resp.try_into_bytes(out).unwrap();
  out.truncate(n);
}
