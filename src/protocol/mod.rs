//! Wire-level protocol: packet framing, hex encoding and command parsing.

mod common;
mod recv_packet;
mod response_writer;

pub mod commands;

pub use common::WordCodec;
pub use recv_packet::{RecvPacket, RecvPacketBlocking, INTERRUPT};
pub use response_writer::{Error as ResponseWriterError, ResponseWriter};

pub(crate) use common::decode_hex_byte;
