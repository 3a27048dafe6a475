/// Identifies the client a request originates from, used as the rate limit
/// key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientIdentifier(String);

impl ClientIdentifier {
    /// Shared bucket for clients that could not be identified.
    pub const UNKNOWN: &'static str = "unknown";

    pub fn new(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        let identifier = identifier.trim();
        if identifier.is_empty() {
            Self::unknown()
        } else {
            Self(identifier.to_owned())
        }
    }

    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.into())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClientIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
