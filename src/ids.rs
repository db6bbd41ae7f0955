// SPDX-License-Identifier: PMPL-1.0-or-later

//! Random identifier generation.

use uuid::Uuid;

/// Length of a short `xid`.
const XID_LEN: usize = 16;

/// Generate a 32-character lowercase hex UUID (v4, without dashes).
pub fn gen_uuid() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Generate a 16-character short identifier.
///
/// Derived from a fresh UUID v4, so ids are collision-resistant enough for
/// document keys while staying compact.
pub fn gen_xid() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    hex[..XID_LEN].to_owned()
}
