// System listing
//
// One `GetSystems` query per state bucket. The payload shape varies by
// service version (bare array vs. pager object); both decode through
// `SystemsPayload` into the same serial list.

use tracing::debug;

use crate::auth::AccessToken;
use crate::client::MaintClient;
use crate::error::Error;
use crate::models::{SystemState, SystemsPayload, SystemsQuery};

impl MaintClient {
    /// List the serials of systems currently in the given state.
    ///
    /// `POST /ESS/GetSystems`, single page. A null/absent `data` means no
    /// systems in that bucket; a present payload that matches neither
    /// accepted shape fails with [`Error::Schema`].
    pub async fn list_systems(
        &self,
        token: &AccessToken,
        state: SystemState,
        page_size: u32,
    ) -> Result<Vec<String>, Error> {
        let query = SystemsQuery::for_state(state, page_size);

        let data = self
            .post_envelope("ESS/GetSystems", &query, Some(token))
            .await?;

        let Some(data) = data else {
            debug!(%state, "no data returned");
            return Ok(Vec::new());
        };

        let payload: SystemsPayload =
            serde_json::from_value(data).map_err(|_| Error::Schema {
                context: format!("GetSystems payload for state {state}"),
            })?;

        let serials: Vec<String> = payload
            .into_records()
            .into_iter()
            .map(|record| record.sys_sn)
            .collect();

        debug!(%state, count = serials.len(), "retrieved systems");
        Ok(serials)
    }
}
