use core::fmt::{self, Display, Formatter};

use toadlet_msg::{Code, Packet};

use crate::code;

/// Request method
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Method(pub(crate) Code);

impl Display for Method {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self.0 {
      | Code { class: 0, detail: 0 } => f.write_str("EMPTY"),
      | Code { class: 0, detail: 1 } => f.write_str("GET"),
      | Code { class: 0, detail: 2 } => f.write_str("POST"),
      | Code { class: 0, detail: 3 } => f.write_str("PUT"),
      | Code { class: 0, detail: 4 } => f.write_str("DELETE"),
      | c => write!(f, "{}", c),
    }
  }
}

impl Method {
  /// Get the method of a request
  ///
  /// ```
  /// use toadlet::req::Method;
  /// use toadlet_msg::*;
  ///
  /// let dgram = [0b0101_0000, 3, 0, 1];
  /// let req = Packet::try_from_bytes(&dgram).unwrap();
  /// assert_eq!(Method::of(&req), Method::PUT);
  /// assert_eq!(Method::of(&req).to_string(), "PUT");
  /// ```
  pub fn of(req: &Packet<'_>) -> Self {
    Method(req.header.code)
  }

  /// Get the code of this method
  pub fn code(&self) -> Code {
    self.0
  }

  code!(rfc7252("4.1")   EMPTY  = Method(0 . 00));
  code!(rfc7252("5.8.1") GET    = Method(0 . 01));
  code!(rfc7252("5.8.2") POST   = Method(0 . 02));
  code!(rfc7252("5.8.3") PUT    = Method(0 . 03));
  code!(rfc7252("5.8.4") DELETE = Method(0 . 04));
}

impl From<Code> for Method {
  fn from(code: Code) -> Self {
    Method(code)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display() {
    assert_eq!(Method::GET.to_string(), "GET");
    assert_eq!(Method::POST.to_string(), "POST");
    assert_eq!(Method::DELETE.to_string(), "DELETE");
    assert_eq!(Method::EMPTY.to_string(), "EMPTY");
    assert_eq!(Method(Code::new(0, 7)).to_string(), "0.07");
  }
}
