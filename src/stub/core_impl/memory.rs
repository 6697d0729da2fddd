use super::prelude::*;
use crate::protocol::commands::{m, M};
use crate::protocol::decode_hex_byte;

impl<T: Target, C> GdbStubImpl<'_, T, C> {
    pub(crate) fn handle_read_memory(
        &mut self,
        res: &mut ResponseWriter<'_, '_>,
        target: &mut T,
        cmd: m,
    ) -> Result<HandlerStatus, NonFatalError> {
        // leave room for the hex-encoded data plus a terminator
        let capacity = res.capacity();
        let mut len = cmd.len;
        if len.saturating_mul(2).saturating_add(1) >= capacity {
            len = (capacity / 2).saturating_sub(1);
            debug!("'m' length {:#x} clamped to {:#x}", cmd.len, len);
        }

        let mut addr = cmd.addr;
        for _ in 0..len {
            res.write_hex(target.read_byte(addr));
            addr = addr.wrapping_add(1);
        }

        Ok(HandlerStatus::Handled)
    }

    pub(crate) fn handle_write_memory(
        &mut self,
        target: &mut T,
        cmd: M<'_>,
    ) -> Result<HandlerStatus, NonFatalError> {
        // never trust the length beyond what the packet buffer could hold
        let mut len = cmd.len;
        let header_len = cmd.header_len;
        if len
            .saturating_mul(2)
            .saturating_add(1)
            .saturating_add(header_len)
            >= self.packet_buffer_size
        {
            len = (self.packet_buffer_size.saturating_sub(header_len) / 2).saturating_sub(1);
            debug!("'M' length {:#x} clamped to {:#x}", cmd.len, len);
        }

        let data = match cmd.val.get(..len * 2) {
            Some(data) if data.iter().all(u8::is_ascii_hexdigit) => data,
            _ => {
                warn!(
                    "'M' packet declares {:#x} bytes but carries {} valid hex digits",
                    len,
                    cmd.val.iter().take_while(|b| b.is_ascii_hexdigit()).count()
                );
                return Err(NonFatalError::BAD_DATA);
            }
        };

        let mut addr = cmd.addr;
        for pair in data.chunks_exact(2) {
            // infallible, validated above
            let val = decode_hex_byte(pair[0], pair[1]).unwrap_or(0);
            target.write_byte(addr, val);
            addr = addr.wrapping_add(1);
        }

        Ok(HandlerStatus::NeedsOk)
    }
}
