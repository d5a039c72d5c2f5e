// Maintenance command dispatch
//
// One command per system serial. The caller owns pacing and failure
// isolation; this method is a single fire-and-check call.

use tracing::debug;

use crate::auth::AccessToken;
use crate::client::MaintClient;
use crate::error::Error;
use crate::models::{CommandRequest, CommandSpec};

impl MaintClient {
    /// Issue the maintenance command to a single system.
    ///
    /// `POST /ESSMainTain/ActualESSCmdModel`. Succeeds only when the
    /// envelope `code` is 200; the response payload is not inspected
    /// further.
    pub async fn send_command(
        &self,
        token: &AccessToken,
        sys_sn: &str,
        cmd: &CommandSpec,
    ) -> Result<(), Error> {
        let body = CommandRequest::new(sys_sn, cmd);

        self.post_envelope("ESSMainTain/ActualESSCmdModel", &body, Some(token))
            .await?;

        debug!(sys_sn, "command sent");
        Ok(())
    }
}
