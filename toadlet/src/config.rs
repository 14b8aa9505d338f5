/// Configuration options related to Block-wise transfer of responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Block {
  /// Size exponent used when a request does not
  /// include a Block2 option.
  ///
  /// Block size is `2 << (szx + 3)`, so this defaults to 64 byte blocks:
  /// ```
  /// use toadlet::config::Block;
  ///
  /// assert_eq!(Block::default().default_szx, 2);
  /// ```
  pub default_szx: u8,
  /// Largest size exponent the server will respond with.
  ///
  /// Requests for larger blocks are answered with blocks of this size,
  /// with the block number scaled up so the requested byte offset is kept.
  ///
  /// Defaults to 1024 byte blocks:
  /// ```
  /// use toadlet::config::Block;
  ///
  /// assert_eq!(Block::default().max_szx, 6);
  /// ```
  pub max_szx: u8,
}

impl Default for Block {
  fn default() -> Self {
    Block { default_szx: 2,
            max_szx: 6 }
  }
}

/// Runtime config
///
/// ```
/// use toadlet::config::Config;
///
/// let config = Config::default();
/// assert!(config.discovery);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Config {
  /// See [`Block`]
  pub block: Block,
  /// Whether `GET /.well-known/core` should be answered
  /// with a link-format document describing the routes.
  ///
  /// When `false`, requests to that path are routed like any other.
  ///
  /// Defaults to `true`.
  pub discovery: bool,
}

impl Default for Config {
  fn default() -> Self {
    Config { block: Block::default(),
             discovery: true }
  }
}
