//! Implementations of the [`Connection`](super::Connection) traits for common
//! transport types.

#[cfg(feature = "std")]
mod tcpstream;
