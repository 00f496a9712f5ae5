use std::{
	fmt,
	path::Path,
	time::{Duration, SystemTime, UNIX_EPOCH},
};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::app::Error;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secret(pub [u8; 32]);

impl AsRef<[u8]> for Secret {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

impl fmt::Debug for Secret {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Secret(..)")
	}
}

impl TryFrom<&str> for Secret {
	type Error = Error;

	fn try_from(value: &str) -> Result<Self, Self::Error> {
		let key: [u8; 32] = value
			.as_bytes()
			.try_into()
			.map_err(|_| Error::InvalidAuthSecret)?;
		Ok(Secret(key))
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Authorization {
	pub username: String,
	/// Expiry as seconds since the unix epoch.
	pub exp: u64,
}

/// Expiry is carried by the payload, the Branca timestamp is not checked.
pub fn decode_auth_token(auth_token: &Token, auth_secret: &Secret) -> Result<Authorization, Error> {
	let Token(data) = auth_token;
	let authorization =
		branca::decode(data.trim(), auth_secret.as_ref(), 0).map_err(|_| Error::InvalidAuthToken)?;
	serde_json::from_slice(&authorization[..]).map_err(|_| Error::InvalidAuthToken)
}

/// Who is logged in and until when. Built once and handed to whatever needs it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionContext {
	username: String,
	expires_at: SystemTime,
}

impl SessionContext {
	pub fn new<S: Into<String>>(username: S, expires_at: SystemTime) -> Self {
		Self {
			username: username.into(),
			expires_at,
		}
	}

	pub fn username(&self) -> &str {
		&self.username
	}

	pub fn expires_at(&self) -> SystemTime {
		self.expires_at
	}

	pub fn is_valid(&self) -> bool {
		self.is_valid_at(SystemTime::now())
	}

	pub fn is_valid_at(&self, now: SystemTime) -> bool {
		self.expires_at > now
	}
}

impl TryFrom<Authorization> for SessionContext {
	type Error = Error;

	fn try_from(authorization: Authorization) -> Result<Self, Self::Error> {
		let expires_at = UNIX_EPOCH
			.checked_add(Duration::from_secs(authorization.exp))
			.ok_or(Error::InvalidAuthToken)?;
		Ok(Self::new(authorization.username, expires_at))
	}
}

/// Missing or unreadable tokens mean nobody is logged in.
pub fn read_session(token_path: &Path, auth_secret: &Secret) -> Option<SessionContext> {
	let data = match std::fs::read_to_string(token_path) {
		Ok(d) => d,
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
		Err(e) => {
			warn!(
				"Could not read session token `{}`: {}",
				token_path.to_string_lossy(),
				e
			);
			return None;
		}
	};
	match decode_auth_token(&Token(data), auth_secret).and_then(SessionContext::try_from) {
		Ok(session) => Some(session),
		Err(e) => {
			warn!("Ignoring session token: {}", e);
			None
		}
	}
}

pub fn logout(token_path: &Path) -> Result<(), Error> {
	match std::fs::remove_file(token_path) {
		Ok(()) => {
			info!("Logged out");
			Ok(())
		}
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
		Err(e) => Err(Error::Io(token_path.to_owned(), e)),
	}
}
