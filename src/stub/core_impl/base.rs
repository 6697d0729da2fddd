use super::prelude::*;
use crate::common::Signal;

impl<T: Target, C> GdbStubImpl<'_, T, C> {
    pub(crate) fn handle_question_mark(
        &mut self,
        res: &mut ResponseWriter<'_, '_>,
    ) -> Result<HandlerStatus, NonFatalError> {
        res.write(b'S');
        res.write_hex(Signal::SIGTRAP.0);
        Ok(HandlerStatus::Handled)
    }

    pub(crate) fn handle_kill(&mut self, target: &mut T) -> Result<HandlerStatus, NonFatalError> {
        info!("kill request, stopping the simulation");
        target.stop_simulation();
        Ok(HandlerStatus::Handled)
    }
}
