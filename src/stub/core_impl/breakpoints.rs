use super::prelude::*;
use crate::protocol::commands::breakpoint::BasicBreakpoint;
use crate::protocol::commands::{z, Z};

enum CmdKind {
    Add,
    Remove,
}

impl<T: Target, C> GdbStubImpl<'_, T, C> {
    fn handle_breakpoint_common(
        &mut self,
        cmd: BasicBreakpoint,
        cmd_kind: CmdKind,
    ) -> Result<HandlerStatus, NonFatalError> {
        match cmd.type_ {
            0 => {
                let res = match cmd_kind {
                    CmdKind::Add => self.breakpoints.add(cmd.addr),
                    CmdKind::Remove => self.breakpoints.remove(cmd.addr),
                };
                match res {
                    Ok(()) => Ok(HandlerStatus::NeedsOk),
                    Err(e) => {
                        debug!("breakpoint at {:#x}: {}", cmd.addr, e);
                        Err(NonFatalError::BREAKPOINT)
                    }
                }
            }
            // hardware breakpoints and write/read/access watchpoints are not
            // supported, which is signaled with an empty reply
            1 | 2 | 3 | 4 => Ok(HandlerStatus::Handled),
            other => {
                warn!("unknown breakpoint type: {}", other);
                Ok(HandlerStatus::Handled)
            }
        }
    }

    pub(crate) fn handle_add_breakpoint(&mut self, cmd: Z) -> Result<HandlerStatus, NonFatalError> {
        self.handle_breakpoint_common(cmd.0, CmdKind::Add)
    }

    pub(crate) fn handle_remove_breakpoint(
        &mut self,
        cmd: z,
    ) -> Result<HandlerStatus, NonFatalError> {
        self.handle_breakpoint_common(cmd.0, CmdKind::Remove)
    }
}
