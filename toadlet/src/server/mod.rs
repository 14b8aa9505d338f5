use toadlet_msg::{no_repeat,
                  Block,
                  CodeKind,
                  ContentFormat,
                  MessageToBytesError,
                  Packet,
                  Scratch};

use crate::config::Config;
use crate::logging::msg_summary;
use crate::req::Method;
use crate::resp::{code, Resp};

/// Matching requests against route paths
pub mod path;

mod route;
#[doc(inline)]
pub use route::*;

/// Answers requests by routing them to one of a fixed table of [`Route`]s.
///
/// For each request, in order:
/// 1. Empty messages (CoAP ping) and responses (there are no outstanding
///    requests to match them to) are answered with an empty Reset.
/// 2. If [`Config::discovery`] is set, `GET /.well-known/core` is answered with
///    the requested block of the link-format document describing the routes.
/// 3. The first route whose path and methods both match the request handles it.
/// 4. If a route matched the path but none allowed the method, 4.05 Method Not Allowed.
/// 5. Otherwise, 4.04 Not Found.
///
/// ```
/// use toadlet::resp::{code, Resp};
/// use toadlet::server::{Dispatcher, Route};
/// use toadlet_msg::*;
///
/// fn hello<'a>(scratch: &mut Scratch<'a>,
///              req: &Packet<'a>)
///              -> Result<Packet<'a>, MessageToBytesError> {
///   Resp::for_request(req).payload(b"Hello World").build(scratch)
/// }
///
/// static ROUTES: [Route; 1] = [Route::get(&["hello"], hello)];
/// let dispatcher = Dispatcher::new(&ROUTES);
///
/// //           CON GET, id 1     Uri-Path "hello"
/// let dgram = [0x40, 1, 0, 1, 0xB5, b'h', b'e', b'l', b'l', b'o'];
/// let req = Packet::try_from_bytes(&dgram).unwrap();
///
/// let mut buf = [0u8; 64];
/// let mut scratch = Scratch::new(&mut buf);
/// let resp = dispatcher.handle(&mut scratch, &req).unwrap();
///
/// assert_eq!(resp.header.code, code::CONTENT);
/// assert_eq!(resp.payload, Payload(b"Hello World"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'r> {
  routes: &'r [Route],
  config: Config,
}

impl<'r> Dispatcher<'r> {
  /// Create a dispatcher over `routes` with the default [`Config`]
  pub fn new(routes: &'r [Route]) -> Self {
    Self::new_config(routes, Config::default())
  }

  /// Create a dispatcher over `routes`
  pub fn new_config(routes: &'r [Route], config: Config) -> Self {
    Self { routes, config }
  }

  /// The routes this dispatcher routes to
  pub fn routes(&self) -> &'r [Route] {
    self.routes
  }

  /// The runtime config
  pub fn config(&self) -> Config {
    self.config
  }

  /// Answer a request.
  ///
  /// Values created for the response (option values, the discovery document)
  /// are staged in `scratch`; errors are only possible when it is too small
  /// or a handler fails.
  pub fn handle<'a>(&self,
                    scratch: &mut Scratch<'a>,
                    req: &Packet<'a>)
                    -> Result<Packet<'a>, MessageToBytesError> {
    log::trace!("handling {}", msg_summary(req).as_str());

    match req.header.code.kind() {
      | CodeKind::Empty => {
        log::debug!("ping {:?}, sending reset", req.header.id);
        return Resp::reset(req).build(scratch);
      },
      | CodeKind::Response => {
        log::debug!("unexpected response {:?} ({}), sending reset",
                    req.header.id,
                    req.header.code);
        return Resp::reset(req).build(scratch);
      },
      | CodeKind::Request => (),
    }

    let method = Method::of(req);

    if self.config.discovery && method == Method::GET && path::is_well_known_core(req) {
      return self.discovery(scratch, req);
    }

    let mut path_matched = false;
    for route in self.routes.iter().filter(|r| path::matches(r.path, req)) {
      path_matched = true;

      if route.allows(method) {
        log::debug!("{} {:?} matched", method, route.path);
        return (route.handler)(scratch, req).map_err(|e| {
                                             log::warn!("handler for {:?} failed: {:?}", route.path, e);
                                             e
                                           });
      }
    }

    let code = if path_matched {
      code::METHOD_NOT_ALLOWED
    } else {
      code::NOT_FOUND
    };

    log::debug!("{} {} unroutable, responding {}", method, req.header.id.0, code);
    Resp::for_request(req).code(code).build(scratch)
  }

  fn discovery<'a>(&self,
                   scratch: &mut Scratch<'a>,
                   req: &Packet<'a>)
                   -> Result<Packet<'a>, MessageToBytesError> {
    let block = req.block2()
                   .unwrap_or_else(|| Block::new(self.config.block.default_szx, 0, false))
                   .with_max_szx(self.config.block.max_szx)
                   .with_more(false);

    let (payload, block) = crate::block::discovery(self.routes, block, scratch)?;
    let block = scratch.copy_from_slice(&block.encode())?;

    Resp::for_request(req).code(code::CONTENT)
                          .content_format(ContentFormat::LinkFormat)
                          .option(no_repeat::BLOCK2, block)
                          .payload(payload)
                          .build(scratch)
  }
}

#[cfg(test)]
mod tests {
  use toadlet_msg::{Header, Id, Token, Type, Version};

  use super::*;

  fn ok<'a>(scratch: &mut Scratch<'a>, req: &Packet<'a>) -> Result<Packet<'a>, MessageToBytesError> {
    Resp::for_request(req).code(code::CHANGED).build(scratch)
  }

  fn fails<'a>(_: &mut Scratch<'a>, _: &Packet<'a>) -> Result<Packet<'a>, MessageToBytesError> {
    Err(MessageToBytesError::BufferTooSmall { capacity: 0,
                                              size: 1 })
  }

  fn ping() -> Packet<'static> {
    Packet { header: Header { ver: Version(1),
                              ty: Type::Con,
                              tkl: 0,
                              code: code::EMPTY,
                              id: Id(3) },
             token: Token(&[]),
             opts: Default::default(),
             payload: Default::default() }
  }

  #[test]
  fn ping_is_reset_without_routing() {
    static ROUTES: [Route; 1] = [Route::new(&[Method::EMPTY], &[], fails)];
    let mut buf = [0u8; 0];
    let mut scratch = Scratch::new(&mut buf);

    let resp = Dispatcher::new(&ROUTES).handle(&mut scratch, &ping()).unwrap();
    assert_eq!(resp.header.ty, Type::Reset);
    assert_eq!(resp.header.code, code::EMPTY);
    assert_eq!(resp.header.id, Id(3));
  }

  #[test]
  fn responses_are_reset_without_routing() {
    static ROUTES: [Route; 1] = [Route::new(&[Method(code::CONTENT)], &[], fails)];
    let mut req = ping();
    req.header.ty = Type::Ack;
    req.header.code = code::CONTENT;

    let mut buf = [0u8; 0];
    let mut scratch = Scratch::new(&mut buf);
    let resp = Dispatcher::new(&ROUTES).handle(&mut scratch, &req).unwrap();
    assert_eq!(resp.header.ty, Type::Reset);
    assert_eq!(resp.header.code, code::EMPTY);
    assert_eq!(resp.header.id, Id(3));
  }

  #[test]
  fn handler_errors_propagate() {
    static ROUTES: [Route; 2] = [Route::get(&[], fails), Route::get(&[], ok)];
    let mut req = ping();
    req.header.code = Method::GET.code();

    let mut buf = [0u8; 0];
    let mut scratch = Scratch::new(&mut buf);
    assert_eq!(Dispatcher::new(&ROUTES).handle(&mut scratch, &req),
               Err(MessageToBytesError::BufferTooSmall { capacity: 0,
                                                         size: 1 }));
  }

  #[test]
  fn first_matching_route_wins() {
    static ROUTES: [Route; 2] = [Route::post(&[], fails), Route::post(&[], ok)];
    let mut req = ping();
    req.header.code = Method::POST.code();

    let mut buf = [0u8; 0];
    let mut scratch = Scratch::new(&mut buf);
    assert!(Dispatcher::new(&ROUTES).handle(&mut scratch, &req).is_err());
  }
}
