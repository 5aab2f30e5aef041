/// Declares a string identifier newtype.
///
/// Identifiers are opaque, they are compared and displayed verbatim.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            serde::Serialize,
            serde::Deserialize,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.0.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Identifier of a harness in the remote store.
    HarnessId
);
string_id!(
    /// User-defined logical identifier of a connector, unique within a harness, e.g. 'CONN1'.
    ConnectorId
);
string_id!(
    /// Identifier of a pin, unique within its connector, e.g. '1' or 'A1'.
    PinId
);
string_id!(
    /// User-defined logical identifier of a wire, unique within a harness, e.g. 'W-001'.
    WireId
);
string_id!(NodeId);
string_id!(
    /// Graph-local edge identifier, independent of any domain identifier.
    EdgeId
);

impl From<&ConnectorId> for NodeId {
    fn from(value: &ConnectorId) -> Self {
        Self(value.0.clone())
    }
}

impl From<&NodeId> for ConnectorId {
    fn from(value: &NodeId) -> Self {
        Self(value.0.clone())
    }
}
