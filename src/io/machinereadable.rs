//! Parser for `VBoxManage showvminfo --machinereadable`.
//!
//! One `key=value` per line; either side may be wrapped in double quotes,
//! e.g. `"SATA-0-0"="/vms/web_disk.vdi"` or `memory=1024`.

use serde_json::{Map, Value};

/// Flatten a dump into a JSON object whose keys keep the dump's order.
/// Lines without `=` are skipped; a repeated key keeps its first position and
/// the last value.
pub fn parse(text: &str) -> Map<String, Value> {
    let mut out = Map::new();
    for line in text.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        out.insert(
            key.trim_matches('"').to_string(),
            Value::String(value.trim_matches('"').to_string()),
        );
    }
    out
}
