/// Request methods
pub mod method;

#[doc(inline)]
pub use method::Method;
