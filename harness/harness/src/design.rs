use serde_with::skip_serializing_none;
use thiserror::Error;

use crate::connection::Connection;
use crate::connector::Connector;
use crate::id::{ConnectorId, HarnessId, PinId, WireId};
use crate::wire::Wire;

/// The wiring design, as persisted by the remote store.
///
/// The order of the collections carries no meaning.
#[skip_serializing_none]
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Default)]
pub struct Harness {
    #[serde(default)]
    pub id: Option<HarnessId>,
    pub name: String,
    pub connectors: Vec<Connector>,
    pub wires: Vec<Wire>,
    pub connections: Vec<Connection>,
}

impl Harness {
    pub fn connector(&self, id: &ConnectorId) -> Option<&Connector> {
        self.connectors
            .iter()
            .find(|connector| connector.id.eq(id))
    }

    pub fn wire(&self, id: &WireId) -> Option<&Wire> {
        self.wires
            .iter()
            .find(|wire| wire.id.eq(id))
    }

    /// Check that every connection references connectors, pins and wires that exist.
    ///
    /// Stops and returns on the first dangling reference.
    pub fn check_references(&self) -> Result<(), ReferenceError> {
        for connection in &self.connections {
            for (connector_id, pin_id) in [
                (&connection.from_connector_id, &connection.from_pin_id),
                (&connection.to_connector_id, &connection.to_pin_id),
            ] {
                let connector = self
                    .connector(connector_id)
                    .ok_or_else(|| ReferenceError::UnknownConnector(connector_id.clone()))?;

                if !connector.has_pin(pin_id) {
                    return Err(ReferenceError::UnknownPin(connector_id.clone(), pin_id.clone()));
                }
            }

            if self.wire(&connection.wire_id).is_none() {
                return Err(ReferenceError::UnknownWire(connection.wire_id.clone()));
            }
        }

        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReferenceError {
    #[error("Unknown connector. connector: {0}")]
    UnknownConnector(ConnectorId),
    #[error("Unknown pin. connector: {0}, pin: {1}")]
    UnknownPin(ConnectorId, PinId),
    #[error("Unknown wire. wire: {0}")]
    UnknownWire(WireId),
}
