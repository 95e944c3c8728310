//! Errors raised at the JSON boundary. The layout engine itself is infallible.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid resource snapshot: {0}")]
    Snapshot(#[source] serde_json::Error),
    #[error("invalid collapse set: {0}")]
    CollapseSet(#[source] serde_json::Error),
    #[error("invalid layout config: {0}")]
    Config(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    fn json(&self) -> &serde_json::Error {
        match self {
            Error::Snapshot(e) | Error::CollapseSet(e) | Error::Config(e) => e,
        }
    }

    /// 1-based line of the offending input, 0 when unknown.
    pub fn line(&self) -> usize {
        self.json().line()
    }

    /// 1-based column of the offending input, 0 when unknown.
    pub fn column(&self) -> usize {
        self.json().column()
    }
}
