use std::{
	io::{Cursor, Read},
	path::Path,
};

use log::{error, info};
use multipart::client::lazy::Multipart;
use serde::{Deserialize, Serialize};

use crate::{
	app::{auth::SessionContext, config::Config, Error},
	utils::{get_audio_format, AudioFormat},
};

pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Upload {
	pub file_name: String,
	pub content: Vec<u8>,
}

impl Upload {
	/// Only MP3 files are accepted.
	pub fn from_path(path: &Path) -> Result<Self, Error> {
		if get_audio_format(path) != Some(AudioFormat::Mp3) {
			return Err(Error::UnsupportedUploadFormat(path.to_owned()));
		}
		let file_name = path
			.file_name()
			.map(|n| n.to_string_lossy().into_owned())
			.ok_or_else(|| Error::UnsupportedUploadFormat(path.to_owned()))?;
		let content = std::fs::read(path).map_err(|e| Error::Io(path.to_owned(), e))?;
		Ok(Self { file_name, content })
	}

	/// Form body with the file in a `file` field, and the matching content type.
	pub fn multipart_body(&self) -> Result<(String, Vec<u8>), Error> {
		let mime = "audio/mpeg"
			.parse::<mime::Mime>()
			.map_err(|_| Error::UploadEncoding(std::io::ErrorKind::InvalidInput.into()))?;
		let mut form = Multipart::new();
		form.add_stream(
			"file",
			Cursor::new(&self.content[..]),
			Some(self.file_name.as_str()),
			Some(mime),
		);
		let mut fields = form.prepare().map_err(|e| Error::UploadEncoding(e.error))?;
		let content_type = format!("multipart/form-data; boundary={}", fields.boundary());
		let mut body = Vec::new();
		fields
			.read_to_end(&mut body)
			.map_err(Error::UploadEncoding)?;
		Ok((content_type, body))
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Registration {
	pub name: String,
	pub email: String,
	pub password: String,
}

impl Registration {
	pub fn new(name: &str, email: &str, password: &str) -> Result<Self, Error> {
		if name.is_empty() || email.is_empty() || password.is_empty() {
			return Err(Error::MissingRegistrationField);
		}
		if password.chars().count() < MIN_PASSWORD_LENGTH {
			return Err(Error::PasswordTooShort(MIN_PASSWORD_LENGTH));
		}
		Ok(Self {
			name: name.to_owned(),
			email: email.to_owned(),
			password: password.to_owned(),
		})
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
	Upload(Upload),
	Registration(Registration),
}

/// Sends a payload somewhere outside this program.
pub trait Submitter {
	fn submit(&self, payload: &Payload) -> Result<(), Error>;
}

#[derive(Clone, Debug, Default)]
pub struct HttpSubmitter {
	upload_url: Option<String>,
	register_url: Option<String>,
}

impl HttpSubmitter {
	pub fn new(config: &Config) -> Self {
		Self {
			upload_url: config.upload_url.clone(),
			register_url: config.register_url.clone(),
		}
	}
}

impl Submitter for HttpSubmitter {
	fn submit(&self, payload: &Payload) -> Result<(), Error> {
		let response = match payload {
			Payload::Upload(upload) => {
				let url = self
					.upload_url
					.as_deref()
					.ok_or(Error::ServerUrlNotConfigured("upload"))?;
				let (content_type, body) = upload.multipart_body()?;
				ureq::post(url)
					.set("Content-Type", &content_type)
					.send_bytes(&body)
			}
			Payload::Registration(registration) => {
				let url = self
					.register_url
					.as_deref()
					.ok_or(Error::ServerUrlNotConfigured("registration"))?;
				let body = serde_json::to_string(registration)
					.map_err(|_| Error::RegistrationEncoding)?;
				ureq::post(url)
					.set("Content-Type", "application/json")
					.send_string(&body)
			}
		};

		match response {
			Ok(_) => Ok(()),
			Err(ureq::Error::Status(code, response)) => {
				let status_text = response.status_text().to_owned();
				let message = response
					.into_string()
					.ok()
					.and_then(|body| rejection_message(&body))
					.unwrap_or(status_text);
				Err(Error::SubmissionRejected(code, message))
			}
			Err(e) => Err(Error::SubmissionTransport(e.to_string())),
		}
	}
}

#[derive(Deserialize)]
struct Rejection {
	message: Option<String>,
}

/// Servers explain failures as `{ "message": ... }`.
fn rejection_message(body: &str) -> Option<String> {
	serde_json::from_str::<Rejection>(body)
		.ok()
		.and_then(|r| r.message)
		.filter(|m| !m.is_empty())
}

pub fn upload<S: Submitter>(
	submitter: &S,
	session: Option<&SessionContext>,
	path: &Path,
) -> Result<(), Error> {
	if !session.is_some_and(SessionContext::is_valid) {
		return Err(Error::NotLoggedIn);
	}
	let upload = Upload::from_path(path)?;
	let file_name = upload.file_name.clone();
	match submitter.submit(&Payload::Upload(upload)) {
		Ok(()) => {
			info!("Uploaded `{}`", file_name);
			Ok(())
		}
		Err(e) => {
			error!("Upload of `{}` failed: {}", file_name, e);
			Err(e)
		}
	}
}

pub fn register<S: Submitter>(submitter: &S, registration: Registration) -> Result<(), Error> {
	let name = registration.name.clone();
	match submitter.submit(&Payload::Registration(registration)) {
		Ok(()) => {
			info!("Registered `{}`", name);
			Ok(())
		}
		Err(e) => {
			error!("Registration of `{}` failed: {}", name, e);
			Err(e)
		}
	}
}

#[cfg(test)]
mod test {
	use std::{
		cell::RefCell,
		io::Write,
		net::TcpListener,
		thread,
		time::{Duration, SystemTime},
	};

	use super::*;
	use crate::test::{prepare_test_directory, write_test_file};
	use crate::test_name;

	#[derive(Default)]
	struct RecordingSubmitter {
		payloads: RefCell<Vec<Payload>>,
	}

	impl Submitter for RecordingSubmitter {
		fn submit(&self, payload: &Payload) -> Result<(), Error> {
			self.payloads.borrow_mut().push(payload.clone());
			Ok(())
		}
	}

	fn valid_session() -> SessionContext {
		SessionContext::new("ana", SystemTime::now() + Duration::from_secs(3600))
	}

	#[test]
	fn uploads_mp3_files() {
		let directory = prepare_test_directory(test_name!());
		let path = write_test_file(&directory, "Kai.mp3", b"ID3fake");
		let submitter = RecordingSubmitter::default();
		upload(&submitter, Some(&valid_session()), &path).unwrap();
		assert_eq!(
			submitter.payloads.borrow().as_slice(),
			&[Payload::Upload(Upload {
				file_name: "Kai.mp3".to_owned(),
				content: b"ID3fake".to_vec(),
			})]
		);
	}

	#[test]
	fn upload_requires_valid_session() {
		let directory = prepare_test_directory(test_name!());
		let path = write_test_file(&directory, "Kai.mp3", b"ID3fake");
		let submitter = RecordingSubmitter::default();
		let expired = SessionContext::new("ana", SystemTime::UNIX_EPOCH);
		assert!(matches!(
			upload(&submitter, None, &path),
			Err(Error::NotLoggedIn)
		));
		assert!(matches!(
			upload(&submitter, Some(&expired), &path),
			Err(Error::NotLoggedIn)
		));
		assert!(submitter.payloads.borrow().is_empty());
	}

	#[test]
	fn upload_rejects_other_formats() {
		let directory = prepare_test_directory(test_name!());
		let path = write_test_file(&directory, "Kai.flac", b"fLaC");
		let submitter = RecordingSubmitter::default();
		assert!(matches!(
			upload(&submitter, Some(&valid_session()), &path),
			Err(Error::UnsupportedUploadFormat(_))
		));
	}

	#[test]
	fn registration_is_validated() {
		assert!(matches!(
			Registration::new("", "ana@example.com", "hunter22"),
			Err(Error::MissingRegistrationField)
		));
		assert!(matches!(
			Registration::new("ana", "ana@example.com", "12345"),
			Err(Error::PasswordTooShort(6))
		));
		assert!(Registration::new("ana", "ana@example.com", "123456").is_ok());
	}

	#[test]
	fn registers_through_submitter() {
		let submitter = RecordingSubmitter::default();
		let registration = Registration::new("ana", "ana@example.com", "hunter22").unwrap();
		register(&submitter, registration.clone()).unwrap();
		assert_eq!(
			submitter.payloads.borrow().as_slice(),
			&[Payload::Registration(registration)]
		);
	}

	fn submitter_for(url: String) -> HttpSubmitter {
		HttpSubmitter {
			upload_url: Some(url.clone()),
			register_url: Some(url),
		}
	}

	/// Answers a single request with the given status line and JSON body.
	fn serve_once(status: &'static str, body: &'static str) -> String {
		let listener = TcpListener::bind("127.0.0.1:0").unwrap();
		let address = listener.local_addr().unwrap();
		thread::spawn(move || {
			let (mut stream, _) = listener.accept().unwrap();
			let mut request = Vec::new();
			let mut buffer = [0; 4096];
			loop {
				let n = stream.read(&mut buffer).unwrap();
				request.extend_from_slice(&buffer[..n]);
				let text = String::from_utf8_lossy(&request);
				if let Some(end) = text.find("\r\n\r\n") {
					let length = text[..end]
						.lines()
						.find_map(|l| {
							let (name, value) = l.split_once(':')?;
							name.eq_ignore_ascii_case("content-length")
								.then(|| value.trim().parse::<usize>().ok())?
						})
						.unwrap_or(0);
					if request.len() >= end + 4 + length || n == 0 {
						break;
					}
				}
				if n == 0 {
					break;
				}
			}
			let response = format!(
				"HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
				status,
				body.len(),
				body
			);
			stream.write_all(response.as_bytes()).unwrap();
		});
		format!("http://{}/", address)
	}

	#[test]
	fn upload_is_sent_as_form_data() {
		let upload = Upload {
			file_name: "Kai.mp3".to_owned(),
			content: b"ID3fake".to_vec(),
		};
		let (content_type, body) = upload.multipart_body().unwrap();
		let boundary = content_type
			.strip_prefix("multipart/form-data; boundary=")
			.unwrap();
		let body = String::from_utf8_lossy(&body);
		assert!(body.contains(boundary));
		assert!(body.contains("name=\"file\""));
		assert!(body.contains("filename=\"Kai.mp3\""));
		assert!(body.contains("audio/mpeg"));
		assert!(body.contains("ID3fake"));
	}

	#[test]
	fn rejection_carries_server_message() {
		let url = serve_once("400 Bad Request", r#"{"message":"File too large"}"#);
		let registration = Registration::new("ana", "ana@example.com", "hunter22").unwrap();
		match submitter_for(url).submit(&Payload::Registration(registration)) {
			Err(Error::SubmissionRejected(400, message)) => assert_eq!(message, "File too large"),
			other => panic!("unexpected result: {:?}", other),
		}
	}

	#[test]
	fn rejection_without_message_uses_status_text() {
		let url = serve_once("503 Service Unavailable", "oops");
		let upload = Upload {
			file_name: "Kai.mp3".to_owned(),
			content: b"ID3fake".to_vec(),
		};
		match submitter_for(url).submit(&Payload::Upload(upload)) {
			Err(Error::SubmissionRejected(503, message)) => {
				assert_eq!(message, "Service Unavailable")
			}
			other => panic!("unexpected result: {:?}", other),
		}
	}

	#[test]
	fn unreachable_server_is_a_transport_error() {
		let address = TcpListener::bind("127.0.0.1:0")
			.unwrap()
			.local_addr()
			.unwrap();
		let registration = Registration::new("ana", "ana@example.com", "hunter22").unwrap();
		assert!(matches!(
			submitter_for(format!("http://{}/", address))
				.submit(&Payload::Registration(registration)),
			Err(Error::SubmissionTransport(_))
		));
	}

	#[test]
	fn reads_rejection_messages() {
		assert_eq!(
			rejection_message(r#"{"message":"Email taken"}"#).as_deref(),
			Some("Email taken")
		);
		assert_eq!(rejection_message(r#"{"message":""}"#), None);
		assert_eq!(rejection_message("<html>"), None);
	}

	#[test]
	fn http_submitter_needs_urls() {
		let submitter = HttpSubmitter::default();
		let registration = Registration::new("ana", "ana@example.com", "hunter22").unwrap();
		assert!(matches!(
			submitter.submit(&Payload::Registration(registration)),
			Err(Error::ServerUrlNotConfigured("registration"))
		));
	}
}
