use crate::id::{ConnectorId, PinId};

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct Pin {
    pub id: PinId,
}

impl Pin {
    pub fn new(id: impl Into<PinId>) -> Self {
        Self {
            id: id.into(),
        }
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct Connector {
    pub id: ConnectorId,
    pub manufacturer: String,
    pub part_number: String,
    pub pins: Vec<Pin>,
}

impl Connector {
    pub fn has_pin(&self, pin_id: &PinId) -> bool {
        self.pins
            .iter()
            .any(|pin| pin.id.eq(pin_id))
    }
}
