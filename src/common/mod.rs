//! Common types shared by the stub and its users.

mod signal;

pub use self::signal::Signal;
