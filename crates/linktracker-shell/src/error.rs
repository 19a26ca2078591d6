use linktracker_core::LinkError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShellError>;

/// Coarse classification of a [`ShellError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required field is missing or malformed.
    Validation,
    /// The command line itself could not be understood.
    Parse,
    /// The referenced link does not exist (or can no longer be used).
    NotFound,
    /// The password does not match.
    Authentication,
    /// The hashing primitive failed.
    Hashing,
    /// Storage failures and response encoding failures.
    Internal,
    /// The input or output stream failed. Terminates the shell.
    FatalIo,
}

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("could not handle empty input")]
    EmptyInput,
    #[error("could not handle param")]
    MalformedParam(String),
    #[error("could not handle input: handler not found")]
    HandlerNotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("could not decode request: {0}")]
    Decode(String),
    #[error(transparent)]
    Link(#[from] LinkError),
    #[error("could not encode response: {0}")]
    Encode(String),
    #[error("could not read input: {0}")]
    Input(#[source] std::io::Error),
    #[error("could not write output: {0}")]
    Output(#[source] std::io::Error),
}

impl ShellError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput | Self::MalformedParam(_) | Self::HandlerNotFound(_) => {
                ErrorKind::Parse
            }
            Self::Validation(_) | Self::Decode(_) => ErrorKind::Validation,
            Self::Link(LinkError::NotFound(_) | LinkError::Inactive(_)) => ErrorKind::NotFound,
            Self::Link(LinkError::Authentication) => ErrorKind::Authentication,
            Self::Link(LinkError::Hashing(_)) => ErrorKind::Hashing,
            Self::Link(LinkError::Storage(_)) | Self::Encode(_) => ErrorKind::Internal,
            Self::Input(_) | Self::Output(_) => ErrorKind::FatalIo,
        }
    }

    /// Whether the error ends the shell's run loop.
    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::FatalIo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linktracker_core::StorageError;

    #[test]
    fn kinds() {
        let cases = [
            (ShellError::EmptyInput, ErrorKind::Parse),
            (ShellError::MalformedParam("x".into()), ErrorKind::Parse),
            (ShellError::HandlerNotFound("BOGUS".into()), ErrorKind::Parse),
            (ShellError::validation("id is missing"), ErrorKind::Validation),
            (ShellError::Decode("bad".into()), ErrorKind::Validation),
            (LinkError::NotFound(1).into(), ErrorKind::NotFound),
            (LinkError::Inactive(1).into(), ErrorKind::NotFound),
            (LinkError::Authentication.into(), ErrorKind::Authentication),
            (LinkError::Hashing("x".into()).into(), ErrorKind::Hashing),
            (
                LinkError::Storage(StorageError::Operation("x".into())).into(),
                ErrorKind::Internal,
            ),
            (
                ShellError::Input(std::io::Error::other("gone")),
                ErrorKind::FatalIo,
            ),
        ];

        for (error, kind) in cases {
            assert_eq!(error.kind(), kind, "{}", error);
        }
    }

    #[test]
    fn only_stream_failures_are_fatal() {
        assert!(ShellError::Output(std::io::Error::other("closed")).is_fatal());
        assert!(!ShellError::EmptyInput.is_fatal());
        assert!(!ShellError::from(LinkError::Authentication).is_fatal());
    }

    #[test]
    fn domain_messages_pass_through() {
        assert_eq!(
            ShellError::from(LinkError::NotFound(3)).to_string(),
            "link not found"
        );
        assert_eq!(
            ShellError::from(LinkError::Authentication).to_string(),
            "authentication failed"
        );
    }
}
