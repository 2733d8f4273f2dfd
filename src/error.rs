use thiserror::Error;

pub type Result<T> = std::result::Result<T, RevstatsError>;

#[derive(Error, Debug)]
pub enum RevstatsError {
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Commit decode error: {0}")]
    CommitDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Signature time error: {0}")]
    SignatureTime(#[from] gix::date::parse::Error),
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("{backend} command failed: {message}")]
    Backend { backend: &'static str, message: String },
}

// gix errors are large; keep them boxed so `Result` stays small
impl From<gix::discover::Error> for RevstatsError {
    fn from(err: gix::discover::Error) -> Self {
        RevstatsError::GitDiscover(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for RevstatsError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        RevstatsError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for RevstatsError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        RevstatsError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for RevstatsError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        RevstatsError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for RevstatsError {
    fn from(err: gix::objs::decode::Error) -> Self {
        RevstatsError::CommitDecode(Box::new(err))
    }
}
