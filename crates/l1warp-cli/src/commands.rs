//! Command implementations. Each returns the text written to stdout.

use std::error::Error;

use l1warp_codec::wire::read_u32_at;
use l1warp_codec::{
    bootstrap_validation_id, calculate_validation_id, conversion_id, pack_warp_payload_message,
    validation_id_of_payload, warp_storage_keys, PayloadKind, UnsignedMessage, WarpPayload,
};
use l1warp_types::{BlockchainId, SubnetId, SubnetToL1ConversionData, ValidationPeriod};
use serde_json::{json, Value};

pub type CommandResult<T> = Result<T, Box<dyn Error>>;

/// Payload type ID sits right after the 2-byte codec version.
const PAYLOAD_TYPE_ID_OFFSET: usize = 2;

pub fn validation_id(period: &ValidationPeriod) -> String {
    let id = calculate_validation_id(period);
    format!("{id}\n{}", id.to_cb58())
}

pub fn bootstrap_id(subnet_id: &SubnetId, index: u32) -> String {
    let id = bootstrap_validation_id(subnet_id.as_bytes(), index);
    format!("{id}\n{}", id.to_cb58())
}

pub fn pack(
    network_id: u32,
    source_chain_id: &BlockchainId,
    payload: &WarpPayload,
    payload_only: bool,
) -> String {
    let bytes = if payload_only {
        payload.encode()
    } else {
        pack_warp_payload_message(network_id, source_chain_id, payload)
    };
    format!("0x{}", hex::encode(bytes))
}

/// Strictly decodes an unsigned Warp message and renders it as JSON.
///
/// Type ID 0 is shared by two payload kinds, so it needs `kind`.
pub fn decode(message_hex: &str, kind: Option<PayloadKind>) -> CommandResult<String> {
    let bytes = parse_hex(message_hex)?;
    let message = UnsignedMessage::decode(&bytes)?;
    let call = message.addressed_call()?;

    let kind = match kind {
        Some(kind) => kind,
        None => infer_kind(&call.payload)?,
    };
    let payload = WarpPayload::decode(kind, &call.payload)?;

    let mut out = json!({
        "network_id": message.network_id,
        "source_chain_id": message.source_chain_id,
        "source_address": format!("0x{}", hex::encode(&call.source_address)),
        "kind": kind.name(),
        "payload": payload_json(&payload)?,
    });
    if kind == PayloadKind::RegisterL1Validator {
        out["validation_id"] = json!(validation_id_of_payload(&call.payload));
    }
    Ok(serde_json::to_string_pretty(&out)?)
}

pub fn access_list(message_hex: &str) -> CommandResult<String> {
    let bytes = parse_hex(message_hex)?;
    let keys: Vec<String> = warp_storage_keys(&bytes)
        .iter()
        .map(|key| format!("0x{}", hex::encode(key)))
        .collect();
    Ok(keys.join("\n"))
}

/// Conversion ID of a JSON-encoded [`SubnetToL1ConversionData`].
pub fn conversion(json_text: &str) -> CommandResult<String> {
    let data: SubnetToL1ConversionData = serde_json::from_str(json_text)?;
    let id = conversion_id(&data);
    Ok(format!("{id}\n{}", id.to_cb58()))
}

fn infer_kind(payload: &[u8]) -> CommandResult<PayloadKind> {
    let type_id = read_u32_at(payload, PAYLOAD_TYPE_ID_OFFSET)?;
    match PayloadKind::candidates(type_id).as_slice() {
        [] => Err(format!("unknown payload type ID {type_id}").into()),
        [kind] => Ok(*kind),
        several => {
            let names: Vec<&str> = several.iter().map(|kind| kind.name()).collect();
            Err(format!(
                "payload type ID {type_id} is shared by {}; pass --kind",
                names.join(", ")
            )
            .into())
        }
    }
}

fn payload_json(payload: &WarpPayload) -> serde_json::Result<Value> {
    match payload {
        WarpPayload::SubnetToL1Conversion(msg) => serde_json::to_value(msg),
        WarpPayload::RegisterL1Validator(period) => serde_json::to_value(period),
        WarpPayload::L1ValidatorRegistration(msg) => serde_json::to_value(msg),
        WarpPayload::L1ValidatorWeight(msg) => serde_json::to_value(msg),
        WarpPayload::ValidationUptime(msg) => serde_json::to_value(msg),
    }
}

pub fn parse_hex(text: &str) -> Result<Vec<u8>, String> {
    let stripped = text.trim().strip_prefix("0x").unwrap_or(text.trim());
    hex::decode(stripped).map_err(|e| format!("invalid hex: {e}"))
}
