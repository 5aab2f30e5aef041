use std::time::Duration;

use harness::api::{COMPONENTS_PATH, WireLengthBody, WirePathBody, harness_path, wire_path_3d_path};
use harness::design::Harness;
use harness::library::LibraryComponent;
use harness_app::capabilities::store::{HarnessStoreOperation, StoreError, StoreResponse, StoreResult};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Performs store operations on behalf of the core.
pub trait HarnessStore {
    fn execute(&self, operation: &HarnessStoreOperation) -> StoreResult;
}

/// The remote store, over HTTP.
pub struct HttpStore {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpStore {
    pub fn new(base_url: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(30))
            .build();

        Self {
            base_url: base_url
                .trim_end_matches('/')
                .to_string(),
            agent,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn try_execute(&self, operation: &HarnessStoreOperation) -> Result<StoreResponse, ureq::Error> {
        match operation {
            HarnessStoreOperation::GetHarness {
                harness_id,
            } => {
                let harness: Harness = read_json(
                    self.agent
                        .get(&self.url(&harness_path(harness_id)))
                        .call()?,
                )?;
                Ok(StoreResponse::Harness {
                    harness,
                })
            }
            HarnessStoreOperation::PutHarness {
                harness_id,
                harness,
            } => {
                let harness: Harness = read_json(
                    self.agent
                        .put(&self.url(&harness_path(harness_id)))
                        .send_json(harness)?,
                )?;
                Ok(StoreResponse::Harness {
                    harness,
                })
            }
            HarnessStoreOperation::GetComponents => {
                let components: Vec<LibraryComponent> = read_json(
                    self.agent
                        .get(&self.url(COMPONENTS_PATH))
                        .call()?,
                )?;
                Ok(StoreResponse::Components {
                    components,
                })
            }
            HarnessStoreOperation::PutWirePath {
                harness_id,
                wire_id,
                points,
                manufacturing_margin,
            } => {
                let body: WireLengthBody = read_json(
                    self.agent
                        .put(&self.url(&wire_path_3d_path(harness_id, wire_id)))
                        .query("manufacturing_margin", &manufacturing_margin.to_string())
                        .send_json(WirePathBody {
                            points: points.clone(),
                        })?,
                )?;
                Ok(StoreResponse::WireLength {
                    length: body.length,
                })
            }
        }
    }
}

impl HarnessStore for HttpStore {
    fn execute(&self, operation: &HarnessStoreOperation) -> StoreResult {
        debug!("store request. operation: {:?}", operation);

        match self.try_execute(operation) {
            Ok(response) => StoreResult::Ok {
                response,
            },
            Err(error) => {
                warn!("store request failed. error: {}", error);
                StoreResult::Err {
                    error: StoreError::NetworkFailure {
                        message: error.to_string(),
                    },
                }
            }
        }
    }
}

fn read_json<T: DeserializeOwned>(response: ureq::Response) -> Result<T, ureq::Error> {
    Ok(response.into_json()?)
}
