use std::net::UdpSocket;
use std::sync::atomic::{AtomicBool, Ordering};

use toadlet::logging::msg_summary;
use toadlet::resp::{code, Resp};
use toadlet::server::{Dispatcher, Route};
use toadlet_msg::{ContentFormat,
                  MessageToBytesError,
                  Packet,
                  Scratch,
                  TryFromBytes,
                  TryIntoBytes};

static LIGHT: AtomicBool = AtomicBool::new(false);

static ROUTES: [Route; 3] = [Route::get(&["hello"], route::hello).link("Hi", ContentFormat::Text),
                             Route::get(&["light"], route::light).link("Light", ContentFormat::Text),
                             Route::put(&["light"], route::toggle)];

mod route {
  use super::*;

  pub fn hello<'a>(scratch: &mut Scratch<'a>,
                   req: &Packet<'a>)
                   -> Result<Packet<'a>, MessageToBytesError> {
    Resp::for_request(req).content_format(ContentFormat::Text)
                          .payload(b"Hello World")
                          .build(scratch)
  }

  pub fn light<'a>(scratch: &mut Scratch<'a>,
                   req: &Packet<'a>)
                   -> Result<Packet<'a>, MessageToBytesError> {
    let state: &'static [u8] = if LIGHT.load(Ordering::Relaxed) {
      b"1"
    } else {
      b"0"
    };

    Resp::for_request(req).content_format(ContentFormat::Text)
                          .payload(state)
                          .build(scratch)
  }

  pub fn toggle<'a>(scratch: &mut Scratch<'a>,
                    req: &Packet<'a>)
                    -> Result<Packet<'a>, MessageToBytesError> {
    let on = req.payload.0 == b"1";
    LIGHT.store(on, Ordering::Relaxed);
    log::info!("light {}", if on { "on" } else { "off" });

    Resp::for_request(req).code(code::CHANGED).build(scratch)
  }
}

fn main() {
  simple_logger::init_with_level(log::Level::Trace).unwrap();

  let sock = UdpSocket::bind("0.0.0.0:5683").unwrap();
  let dispatcher = Dispatcher::new(&ROUTES);
  log::info!("listening on {}", sock.local_addr().unwrap());

  let mut inbound = [0u8; 4096];
  let mut scratch = [0u8; 4096];
  let mut outbound = [0u8; 4096];

  loop {
    let (n, addr) = match sock.recv_from(&mut inbound) {
      | Ok(ok) => ok,
      | Err(e) => {
        log::error!("recv failed: {}", e);
        continue;
      },
    };

    let req = match Packet::try_from_bytes(&inbound[..n]) {
      | Ok(req) => req,
      | Err(e) => {
        log::warn!("dropping malformed datagram from {} (error {}: {:?})",
                   addr,
                   e.code(),
                   e);
        continue;
      },
    };

    let mut scratch = Scratch::new(&mut scratch);
    let sent = dispatcher.handle(&mut scratch, &req)
                         .and_then(|resp| {
                           log::debug!("{} <- {}", addr, msg_summary(&resp).as_str());
                           resp.try_into_bytes(&mut outbound)
                         })
                         .map(|n| sock.send_to(&outbound[..n], addr));

    match sent {
      | Ok(Ok(_)) => (),
      | Ok(Err(e)) => log::error!("send to {} failed: {}", addr, e),
      | Err(e) => log::error!("could not respond to {} (error {}: {:?})", addr, e.code(), e),
    }
  }
}
