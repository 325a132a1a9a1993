use std::fmt::{self, Debug, Display, Formatter};

/// A configuration error raised while registering routes.
///
/// Registration errors are fatal: they are surfaced by
/// [`RouterBuilder::build`](crate::RouterBuilder::build) before the router
/// ever serves a request, never deferred to request time.
pub struct Error {
    msg: String,
}

impl Error {
    pub(crate) fn new<M: Into<String>>(msg: M) -> Error {
        Error { msg: msg.into() }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "chainroute: {}", self.msg)
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Error({:?})", self.msg)
    }
}

impl std::error::Error for Error {}
