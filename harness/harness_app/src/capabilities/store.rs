use std::future::Future;

use crux_core::capability::Operation;
use crux_core::command::RequestBuilder;
use crux_core::{Command, Request};
use harness::design::Harness;
use harness::id::{HarnessId, WireId};
use harness::library::LibraryComponent;
use harness::point::PathPoint;
use thiserror::Error;

/// Requests to the remote harness store, performed by the shell.
#[derive(Clone, serde::Serialize, serde::Deserialize, Debug, PartialEq)]
pub enum HarnessStoreOperation {
    GetHarness {
        harness_id: HarnessId,
    },
    /// Upsert of the full harness, the store echoes what it stored.
    PutHarness {
        harness_id: HarnessId,
        harness: Harness,
    },
    GetComponents,
    /// The store computes and returns the authoritative length, applying the margin.
    PutWirePath {
        harness_id: HarnessId,
        wire_id: WireId,
        points: Vec<PathPoint>,
        manufacturing_margin: f64,
    },
}

impl Operation for HarnessStoreOperation {
    type Output = StoreResult;
}

#[derive(Clone, serde::Serialize, serde::Deserialize, Debug, PartialEq)]
pub enum StoreResult {
    Ok { response: StoreResponse },
    Err { error: StoreError },
}

#[derive(Clone, serde::Serialize, serde::Deserialize, Debug, PartialEq)]
pub enum StoreResponse {
    Harness { harness: Harness },
    Components { components: Vec<LibraryComponent> },
    WireLength { length: f64 },
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, Error)]
#[serde(rename_all = "camelCase")]
pub enum StoreError {
    #[error("network failure: {message}")]
    NetworkFailure { message: String },
    #[error("unexpected response, expected: {expected}")]
    UnexpectedResponse { expected: String },
}

impl StoreResult {
    pub fn into_harness(self) -> Result<Harness, StoreError> {
        match self.into_response()? {
            StoreResponse::Harness {
                harness,
            } => Ok(harness),
            _ => Err(Self::unexpected("harness")),
        }
    }

    pub fn into_components(self) -> Result<Vec<LibraryComponent>, StoreError> {
        match self.into_response()? {
            StoreResponse::Components {
                components,
            } => Ok(components),
            _ => Err(Self::unexpected("components")),
        }
    }

    pub fn into_wire_length(self) -> Result<f64, StoreError> {
        match self.into_response()? {
            StoreResponse::WireLength {
                length,
            } => Ok(length),
            _ => Err(Self::unexpected("wire length")),
        }
    }

    fn into_response(self) -> Result<StoreResponse, StoreError> {
        match self {
            StoreResult::Ok {
                response,
            } => Ok(response),
            StoreResult::Err {
                error,
            } => Err(error),
        }
    }

    fn unexpected(expected: &str) -> StoreError {
        StoreError::UnexpectedResponse {
            expected: expected.to_string(),
        }
    }
}

pub fn get_harness<Effect, Event>(
    harness_id: HarnessId,
) -> RequestBuilder<Effect, Event, impl Future<Output = StoreResult>>
where
    Effect: From<Request<HarnessStoreOperation>> + Send + 'static,
    Event: Send + 'static,
{
    Command::request_from_shell(HarnessStoreOperation::GetHarness {
        harness_id,
    })
}

pub fn put_harness<Effect, Event>(
    harness_id: HarnessId,
    harness: Harness,
) -> RequestBuilder<Effect, Event, impl Future<Output = StoreResult>>
where
    Effect: From<Request<HarnessStoreOperation>> + Send + 'static,
    Event: Send + 'static,
{
    Command::request_from_shell(HarnessStoreOperation::PutHarness {
        harness_id,
        harness,
    })
}

pub fn get_components<Effect, Event>() -> RequestBuilder<Effect, Event, impl Future<Output = StoreResult>>
where
    Effect: From<Request<HarnessStoreOperation>> + Send + 'static,
    Event: Send + 'static,
{
    Command::request_from_shell(HarnessStoreOperation::GetComponents)
}

pub fn put_wire_path<Effect, Event>(
    harness_id: HarnessId,
    wire_id: WireId,
    points: Vec<PathPoint>,
    manufacturing_margin: f64,
) -> RequestBuilder<Effect, Event, impl Future<Output = StoreResult>>
where
    Effect: From<Request<HarnessStoreOperation>> + Send + 'static,
    Event: Send + 'static,
{
    Command::request_from_shell(HarnessStoreOperation::PutWirePath {
        harness_id,
        wire_id,
        points,
        manufacturing_margin,
    })
}
