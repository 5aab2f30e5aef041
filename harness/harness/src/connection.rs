use crate::id::{ConnectorId, PinId, WireId};

/// The pin-to-pin link realized by a wire.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct Connection {
    pub wire_id: WireId,
    pub from_connector_id: ConnectorId,
    pub from_pin_id: PinId,
    pub to_connector_id: ConnectorId,
    pub to_pin_id: PinId,
}
