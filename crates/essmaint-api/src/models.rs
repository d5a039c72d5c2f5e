// Wire types for the ESS management API
//
// Every endpoint wraps its payload in the `{ code, data }` envelope. The
// `GetSystems` payload is polymorphic: depending on service version the
// record list arrives either nested under a pager object or as a bare
// array. `SystemsPayload` models both shapes as an untagged variant.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Response envelope ────────────────────────────────────────────────

/// Standard management API response envelope.
///
/// ```json
/// { "code": 200, "data": ... }
/// ```
///
/// `code` 200 means success; `data` may be absent, null, or any of the
/// endpoint-specific payload shapes, so it is kept as a raw value and
/// decoded per endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

// ── Login ────────────────────────────────────────────────────────────

/// Payload of a successful `/Account/Login` response.
#[derive(Debug, Deserialize)]
pub struct LoginData {
    #[serde(rename = "AccessToken")]
    pub access_token: String,
}

// ── Systems ──────────────────────────────────────────────────────────

/// Status bucket reported by the service. Each state is queried
/// independently; the service treats them as mutually exclusive but the
/// poller does not rely on that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemState {
    Normal,
    Protection,
    Fault,
}

impl SystemState {
    /// The fixed set of states polled every cycle.
    pub const ALL: [SystemState; 3] = [
        SystemState::Normal,
        SystemState::Protection,
        SystemState::Fault,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SystemState::Normal => "normal",
            SystemState::Protection => "protection",
            SystemState::Fault => "fault",
        }
    }
}

impl fmt::Display for SystemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body for `/ESS/GetSystems`.
///
/// Sort/search/keyword are fixed -- the poller always asks for one large
/// page per state, ordered by registration time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemsQuery {
    pub sort_by: &'static str,
    pub search_by: &'static str,
    pub state: SystemState,
    pub keyword: &'static str,
    pub page_index: u32,
    pub page_size: u32,
}

impl SystemsQuery {
    /// Single-page query for one state bucket.
    pub fn for_state(state: SystemState, page_size: u32) -> Self {
        Self {
            sort_by: "registrationtime",
            search_by: "sn",
            state,
            keyword: "",
            page_index: 1,
            page_size,
        }
    }
}

/// One system record from `GetSystems`. The service returns many more
/// fields per record; only the serial is needed, everything else lands
/// in `extra`.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemRecord {
    pub sys_sn: String,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The two accepted shapes of the `GetSystems` payload.
///
/// Older service versions return the record list bare; newer ones nest it
/// under a pager object. Both normalize to the same record sequence.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SystemsPayload {
    Paged { data: Vec<SystemRecord> },
    Flat(Vec<SystemRecord>),
}

impl SystemsPayload {
    /// Normalize either shape into the ordered record list.
    pub fn into_records(self) -> Vec<SystemRecord> {
        match self {
            SystemsPayload::Paged { data } | SystemsPayload::Flat(data) => data,
        }
    }
}

// ── Maintenance command ──────────────────────────────────────────────

/// The command parameters sent with every maintenance dispatch.
///
/// These are service-side magic values; the defaults match the command
/// the fleet has always been sent, but operators can override them in
/// configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandSpec {
    pub cmd_code: String,
    pub language_code: String,
    pub start_time: String,
    pub remark: String,
}

impl Default for CommandSpec {
    fn default() -> Self {
        Self {
            cmd_code: "Extra".into(),
            language_code: "zh-CN".into(),
            start_time: "4".into(),
            remark: "6".into(),
        }
    }
}

/// Request body for `/ESSMainTain/ActualESSCmdModel`.
#[derive(Debug, Serialize)]
pub struct CommandRequest<'a> {
    pub sys_sn: &'a str,
    pub cmd_code: &'a str,
    pub language_code: &'a str,
    pub start_time: &'a str,
    pub remark: &'a str,
}

impl<'a> CommandRequest<'a> {
    pub fn new(sys_sn: &'a str, cmd: &'a CommandSpec) -> Self {
        Self {
            sys_sn,
            cmd_code: &cmd.cmd_code,
            language_code: &cmd.language_code,
            start_time: &cmd.start_time,
            remark: &cmd.remark,
        }
    }
}
