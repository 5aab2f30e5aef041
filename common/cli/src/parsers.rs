use std::collections::HashMap;
use std::ffi::OsStr;

use clap::builder::TypedValueParser;
use clap::error::ErrorKind;
use clap::{Arg, Command, Error};
use harness::id::{NodeId, PinId};
use nalgebra::Point3;

/// A pin on a connector node, e.g. `CONN1:2`.
#[derive(Debug, Clone, PartialEq)]
pub struct PinReference {
    pub node_id: NodeId,
    pub pin_id: PinId,
}

#[derive(Clone, Default)]
pub struct PinReferenceParser {}

impl TypedValueParser for PinReferenceParser {
    type Value = PinReference;

    /// Parses a value in the format '<CONNECTOR>:<PIN>', e.g. 'CONN1:2'
    fn parse_ref(&self, _cmd: &Command, _arg: Option<&Arg>, value: &OsStr) -> Result<Self::Value, Error> {
        let value = value
            .to_str()
            .ok_or_else(|| Error::raw(ErrorKind::InvalidValue, "Invalid argument encoding"))?;

        match value.split_once(':') {
            Some((connector, pin)) if !connector.is_empty() && !pin.is_empty() && !pin.contains(':') => {
                Ok(PinReference {
                    node_id: NodeId::from(connector),
                    pin_id: PinId::from(pin),
                })
            }
            _ => Err(Error::raw(
                ErrorKind::InvalidValue,
                format!(
                    "Invalid argument. Required format: '<CONNECTOR>:<PIN>', found: '{}'",
                    value
                ),
            )),
        }
    }
}

pub fn point3_parser(s: &str) -> Result<Point3<f64>, String> {
    let mut values = HashMap::new();
    let mut errors = Vec::new();
    let required_keys = ["x", "y", "z"];

    for chunk in s.split(',') {
        let chunk_chunks: Vec<_> = chunk.split('=').collect();
        if chunk_chunks.len() != 2 {
            errors.push(format!(
                "Expected exactly 1 equal sign in '{}', found {}",
                chunk,
                chunk_chunks.len() - 1
            ));
            continue;
        }

        let key = chunk_chunks[0].trim();
        let value_str = chunk_chunks[1].trim();

        if !required_keys.contains(&key) {
            errors.push(format!("Invalid key: '{}'", key));
            continue;
        }

        match value_str.parse::<f64>() {
            Ok(value) if value.is_finite() => {
                values.insert(key, value);
            }
            Ok(value) => {
                errors.push(format!("Non-finite value for key '{}': {}", key, value));
            }
            Err(e) => {
                errors.push(format!("Failed to parse value for key '{}': {}", key, e));
            }
        }
    }

    let missing = required_keys
        .iter()
        .filter(|key| !values.contains_key(*key))
        .copied()
        .collect::<Vec<_>>();

    if !missing.is_empty() {
        errors.push(format!(
            "Missing/invalid keys: {}, expected keys: {}",
            missing.join(", "),
            required_keys.join(", ")
        ));
    }

    if !errors.is_empty() {
        return Err(errors.join("; "));
    }

    Ok(Point3::new(values["x"], values["y"], values["z"]))
}
