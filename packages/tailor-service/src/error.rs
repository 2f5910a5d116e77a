pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl Error {
	pub(crate) fn invalid(message: impl Into<String>) -> Self {
		Self::InvalidRequest { message: message.into() }
	}
}

impl From<tailor_storage::Error> for Error {
	fn from(err: tailor_storage::Error) -> Self {
		match err {
			tailor_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			tailor_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
		}
	}
}
