use std::error::Error as StdError;
use std::fmt::{self, Display};

use deep_agent_model::{ErrorKind as ModelErrorKind, ModelProviderError};

/// The error type for [`crate::Agent::invoke`].
#[derive(Debug)]
pub enum Error {
    /// The model provider failed to produce a reply.
    Model(Box<dyn ModelProviderError>),
    /// The model kept calling tools for more turns than allowed.
    TurnLimitExceeded(usize),
}

impl Error {
    /// Returns the provider's error kind, if the model request failed.
    #[inline]
    pub fn model_error_kind(&self) -> Option<ModelErrorKind> {
        match self {
            Error::Model(err) => Some(err.kind()),
            Error::TurnLimitExceeded(_) => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Model(err) => {
                write!(f, "model request failed ({}): {err}", err.kind())
            }
            Error::TurnLimitExceeded(turns) => {
                write!(f, "agent did not finish within {turns} turns")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Model(err) => Some(err.as_ref()),
            Error::TurnLimitExceeded(_) => None,
        }
    }
}
