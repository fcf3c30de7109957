use std::fmt::{Debug, Display, Formatter};

/// Failure of a single http request: transport, dns, timeout or an error status.
pub struct RequestError {
    details: String,
}

impl RequestError {
    pub fn new(msg: &str) -> RequestError {
        return RequestError { details: msg.to_string() };
    }

    pub fn message(&self) -> &str {
        return &self.details;
    }
}

impl Display for RequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.details)
    }
}

impl Debug for RequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.details)
    }
}

impl std::error::Error for RequestError {}

impl From<reqwest::Error> for RequestError {
    fn from(e: reqwest::Error) -> Self {
        return RequestError::new(&e.to_string());
    }
}

/// Reading the url list failed; the message is ready to show to the user.
pub struct FileIoError(pub String);

impl Display for FileIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Debug for FileIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for FileIoError {}
