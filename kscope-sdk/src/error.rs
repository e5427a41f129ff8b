use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GvrError {
    /// The path portion did not split into one to three `/` separated tokens.
    #[error("can't parse GVR {input:?}: expected 1 to 3 path segments, found {tokens}")]
    Malformed { input: String, tokens: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("no standard verb for {0:?}")]
    UnknownAction(String),
}
