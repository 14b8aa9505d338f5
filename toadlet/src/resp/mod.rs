use toadlet_msg::{no_repeat,
                  ContentFormat,
                  Header,
                  MessageToBytesError,
                  Opt,
                  OptNumber,
                  OptValue,
                  Opts,
                  Packet,
                  Payload,
                  Scratch,
                  Token,
                  Type,
                  Unsupported,
                  Version};

/// Response codes
pub mod code;

/// Builder for a response to a request.
///
/// The response always echoes the request's message ID and token.
///
/// Errors (e.g. adding more options than a [`Packet`] can hold) are
/// remembered and yielded by [`Resp::build`].
///
/// ```
/// use toadlet::resp::{code, Resp};
/// use toadlet_msg::*;
///
/// //           CON GET, tkl 1, id 7      token
/// let dgram = [0b0100_0001, 1, 0, 7, 0xAB];
/// let req = Packet::try_from_bytes(&dgram).unwrap();
///
/// let mut buf = [0u8; 8];
/// let mut scratch = Scratch::new(&mut buf);
/// let resp = Resp::for_request(&req).code(code::CONTENT)
///                                   .content_format(ContentFormat::Text)
///                                   .payload(b"hi")
///                                   .build(&mut scratch)
///                                   .unwrap();
///
/// assert_eq!(resp.header.ty, Type::Ack);
/// assert_eq!(resp.header.id, Id(7));
/// assert_eq!(resp.token, Token(&[0xAB]));
/// assert_eq!(resp.content_format(), Some(ContentFormat::Text));
/// assert_eq!(resp.payload, Payload(b"hi"));
/// ```
#[derive(Debug, Clone)]
pub struct Resp<'a> {
  inner: Result<Packet<'a>, MessageToBytesError>,
  content_format: Option<ContentFormat>,
}

impl<'a> Resp<'a> {
  fn new(req: &Packet<'a>, ty: Type) -> Self {
    let header = Header { ver: Version::default(),
                          ty,
                          tkl: req.header.tkl,
                          code: code::CONTENT,
                          id: req.header.id };

    Self { inner: Ok(Packet { header,
                              token: req.token,
                              opts: Opts::default(),
                              payload: Payload(&[]) }),
           content_format: None }
  }

  /// Start a 2.05 Content response to `req`.
  ///
  /// Confirmable requests are answered with a piggybacked
  /// Acknowledgement, Non-confirmable requests with a Non-confirmable response.
  pub fn for_request(req: &Packet<'a>) -> Self {
    let ty = match req.header.ty {
      | Type::Non => Type::Non,
      | _ => Type::Ack,
    };

    Self::new(req, ty)
  }

  /// Start an empty Reset in reply to `req`
  ///
  /// The Reset is an Empty message: it carries only the message ID
  /// of `req`, with no token, options or payload.
  pub fn reset(req: &Packet<'a>) -> Self {
    let mut resp = Self::new(req, Type::Reset).code(code::EMPTY);
    if let Ok(p) = resp.inner.as_mut() {
      p.header.tkl = 0;
      p.token = Token(&[]);
    }
    resp
  }

  /// Set the message type
  pub fn ty(mut self, ty: Type) -> Self {
    if let Ok(p) = self.inner.as_mut() {
      p.header.ty = ty;
    }
    self
  }

  /// Set the response code
  pub fn code(mut self, code: code::Code) -> Self {
    if let Ok(p) = self.inner.as_mut() {
      p.header.code = code;
    }
    self
  }

  /// Add a Content-Format option.
  ///
  /// The 2-byte value is written to the [`Scratch`] buffer passed to [`Resp::build`].
  pub fn content_format(mut self, format: ContentFormat) -> Self {
    self.content_format = Some(format);
    self
  }

  /// Add an option.
  ///
  /// The option is inserted after any options with
  /// a number less than or equal to `number`, so options
  /// stay in the order the wire format requires.
  pub fn option(mut self, number: OptNumber, value: &'a [u8]) -> Self {
    self.inner = self.inner.and_then(|mut p| {
                             insert(&mut p.opts,
                                    Opt { number,
                                          value: OptValue(value) })?;
                             Ok(p)
                           });
    self
  }

  /// Set the payload
  pub fn payload(mut self, payload: &'a [u8]) -> Self {
    if let Ok(p) = self.inner.as_mut() {
      p.payload = Payload(payload);
    }
    self
  }

  /// Finish the response, staging any values it needs to create in `scratch`
  pub fn build(self, scratch: &mut Scratch<'a>) -> Result<Packet<'a>, MessageToBytesError> {
    let mut packet = self.inner?;

    if let Some(format) = self.content_format {
      let value = scratch.copy_from_slice(&format.bytes())?;
      insert(&mut packet.opts,
             Opt { number: no_repeat::CONTENT_FORMAT,
                   value: OptValue(value) })?;
    }

    Ok(packet)
  }
}

fn insert<'a>(opts: &mut Opts<'a>, opt: Opt<'a>) -> Result<(), MessageToBytesError> {
  if opts.len() == opts.capacity() {
    return Err(Unsupported::TooManyOptions.into());
  }

  let ix = opts.iter()
               .position(|o| o.number > opt.number)
               .unwrap_or(opts.len());
  opts.insert(ix, opt);
  Ok(())
}
