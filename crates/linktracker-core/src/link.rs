use std::fmt;

/// Identifier assigned to a [`Link`] by the repository.
pub type LinkId = u64;

/// A one-way password digest produced by a [`CredentialHasher`](crate::CredentialHasher).
///
/// The digest is opaque to everything but the hasher that produced it. It has
/// no serializer and its `Debug` output is redacted, so it never ends up in a
/// response or a log line.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}

/// A tracked URL with statistics on how it is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Assigned by the repository on save, `0` until then.
    pub id: LinkId,
    pub url: String,
    pub password_hash: PasswordDigest,
    /// Number of successful authenticated redirects.
    pub redirect_count: u64,
    pub inactive: bool,
}

impl Link {
    /// Creates a new, unsaved, active link with no redirects.
    pub fn new(url: impl Into<String>, password_hash: PasswordDigest) -> Self {
        Self {
            id: 0,
            url: url.into(),
            password_hash,
            redirect_count: 0,
            inactive: false,
        }
    }
}
