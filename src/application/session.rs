// Credential provider trait for authenticated calls

/// Source of the bearer token attached to outbound requests.
///
/// Read once per request; implementations return a snapshot.
pub trait CredentialProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}
