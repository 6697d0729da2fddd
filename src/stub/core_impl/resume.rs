use super::prelude::*;
use super::ExecMode;
use crate::protocol::commands::{c, s};

impl<T: Target, C> GdbStubImpl<'_, T, C> {
    pub(crate) fn handle_continue(
        &mut self,
        target: &mut T,
        cmd: c,
    ) -> Result<HandlerStatus, NonFatalError> {
        if let Some(addr) = cmd.addr {
            target.set_pc(addr);
        }
        self.exec_mode = ExecMode::Run;
        Ok(HandlerStatus::Resume)
    }

    pub(crate) fn handle_step(
        &mut self,
        target: &mut T,
        cmd: s,
    ) -> Result<HandlerStatus, NonFatalError> {
        if let Some(addr) = cmd.addr {
            target.set_pc(addr);
        }
        self.exec_mode = ExecMode::Step;
        Ok(HandlerStatus::Resume)
    }
}
