//! Cable termination resolution
//!
//! Finds the far end of a physical link relative to the device the query
//! started from.

use crate::models::{Cable, CableTermination};

/// Resolve the endpoint on the opposite side of `cable` from `query_device_id`.
///
/// Which side of a cable is "a" vs "b" is arbitrary relative to the querying
/// device, so both termination sets are scanned in order and the first entry
/// belonging to a different device wins. Multi-termination (trunk/MPO) cables
/// may list several remote endpoints; only the first match is reported, a
/// known simplification for fan-out cables.
///
/// Returns `None` when neither set contains an opposite-device termination
/// (unterminated cable, wall plate, or malformed data). Callers render this
/// as "N/A".
pub fn remote_termination(query_device_id: i64, cable: &Cable) -> Option<&CableTermination> {
    cable
        .a_terminations
        .iter()
        .chain(cable.b_terminations.iter())
        .find(|t| t.object.device.id != query_device_id)
}
