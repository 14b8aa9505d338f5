use core::fmt::{self, Debug, Formatter};

use toadlet_msg::{ContentFormat, MessageToBytesError, Packet, Scratch};

use crate::req::Method;

/// A function that answers a request.
///
/// Values created while building the response
/// (e.g. with [`Resp::build`](crate::resp::Resp::build)) are staged in
/// the scratch buffer, so the response may borrow from it as well as from
/// the request.
///
/// Handlers may have side-effects (toggling a pin, writing to storage);
/// they are invoked exactly once per matching request.
pub type Handler =
  for<'a> fn(&mut Scratch<'a>, &Packet<'a>) -> Result<Packet<'a>, MessageToBytesError>;

/// How a route is described in the `/.well-known/core` discovery document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Link {
  /// Human-readable `title` attribute
  pub title: &'static str,
  /// `ct` attribute; the content format of the resource
  pub content_format: ContentFormat,
}

/// A resource that requests can be routed to
///
/// ```
/// use toadlet::req::Method;
/// use toadlet::resp::Resp;
/// use toadlet::server::Route;
/// use toadlet_msg::*;
///
/// fn hello<'a>(scratch: &mut Scratch<'a>,
///              req: &Packet<'a>)
///              -> Result<Packet<'a>, MessageToBytesError> {
///   Resp::for_request(req).payload(b"Hello World").build(scratch)
/// }
///
/// static ROUTES: [Route; 2] =
///   [Route::get(&["hello"], hello).link("Hi", ContentFormat::Text),
///    Route::new(&[Method::PUT, Method::POST], &["led", "0"], hello)];
///
/// assert!(ROUTES[0].allows(Method::GET));
/// assert!(!ROUTES[1].allows(Method::GET));
/// ```
#[derive(Clone, Copy)]
pub struct Route {
  /// Methods this route answers
  pub methods: &'static [Method],
  /// Path segments, e.g. `&["sensors", "temp"]` for `/sensors/temp`
  pub path: &'static [&'static str],
  /// See [`Handler`]
  pub handler: Handler,
  /// Routes without a link are left out of discovery
  pub link: Option<Link>,
}

impl Route {
  /// Create a route answering any of `methods` at `path`
  pub const fn new(methods: &'static [Method],
                   path: &'static [&'static str],
                   handler: Handler)
                   -> Self {
    Route { methods,
            path,
            handler,
            link: None }
  }

  /// Create a route answering GET requests at `path`
  pub const fn get(path: &'static [&'static str], handler: Handler) -> Self {
    Self::new(&[Method::GET], path, handler)
  }

  /// Create a route answering PUT requests at `path`
  pub const fn put(path: &'static [&'static str], handler: Handler) -> Self {
    Self::new(&[Method::PUT], path, handler)
  }

  /// Create a route answering POST requests at `path`
  pub const fn post(path: &'static [&'static str], handler: Handler) -> Self {
    Self::new(&[Method::POST], path, handler)
  }

  /// Create a route answering DELETE requests at `path`
  pub const fn delete(path: &'static [&'static str], handler: Handler) -> Self {
    Self::new(&[Method::DELETE], path, handler)
  }

  /// List this route in the discovery document
  pub const fn link(mut self, title: &'static str, content_format: ContentFormat) -> Self {
    self.link = Some(Link { title,
                            content_format });
    self
  }

  /// Whether this route answers requests with method `method`
  pub fn allows(&self, method: Method) -> bool {
    self.methods.contains(&method)
  }
}

impl Debug for Route {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.debug_struct("Route")
     .field("methods", &self.methods)
     .field("path", &self.path)
     .field("handler", &(self.handler as *const ()))
     .field("link", &self.link)
     .finish()
  }
}
