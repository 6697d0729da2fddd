mod hex;
mod word;

pub use hex::*;
pub use word::WordCodec;
