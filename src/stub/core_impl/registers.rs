use super::prelude::*;
use crate::protocol::commands::G;
use crate::protocol::{decode_hex_byte, WordCodec};

impl<T: Target, C> GdbStubImpl<'_, T, C> {
    fn word_codec(&self, target: &T) -> WordCodec {
        WordCodec::new(self.word_size, target.is_big_endian())
    }

    pub(crate) fn handle_read_registers(
        &mut self,
        res: &mut ResponseWriter<'_, '_>,
        target: &mut T,
    ) -> Result<HandlerStatus, NonFatalError> {
        let codec = self.word_codec(target);

        for idx in 0..target.register_count() {
            let mut buf = [0; 8];
            let len = codec.to_wire(target.read_register(idx), &mut buf);
            res.write_hex_buf(&buf[..len]);
        }

        Ok(HandlerStatus::Handled)
    }

    pub(crate) fn handle_write_registers(
        &mut self,
        target: &mut T,
        cmd: G<'_>,
    ) -> Result<HandlerStatus, NonFatalError> {
        let codec = self.word_codec(target);
        let count = target.register_count();
        let needed = count * codec.hex_len();

        // validate everything up-front, so a bad packet doesn't leave the
        // register file half-written
        let vals = cmd.vals.get(..needed).ok_or_else(|| {
            warn!(
                "'G' packet carries {} hex digits, {} registers need {}",
                cmd.vals.len(),
                count,
                needed
            );
            NonFatalError::MALFORMED
        })?;
        if !vals.iter().all(u8::is_ascii_hexdigit) {
            return Err(NonFatalError::MALFORMED);
        }

        for (idx, word) in vals.chunks_exact(codec.hex_len()).enumerate() {
            let mut buf = [0; 8];
            for (b, pair) in buf.iter_mut().zip(word.chunks_exact(2)) {
                // infallible, validated above
                *b = decode_hex_byte(pair[0], pair[1]).unwrap_or(0);
            }
            target.write_register(idx, codec.from_wire(&buf[..codec.size()]));
        }

        Ok(HandlerStatus::NeedsOk)
    }
}
