use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioFormat {
	Flac,
	Mp3,
	Mp4,
	Ogg,
	Opus,
	Wav,
}

pub fn get_audio_format(path: &Path) -> Option<AudioFormat> {
	let extension = path.extension()?.to_str()?;
	match extension.to_lowercase().as_str() {
		"flac" => Some(AudioFormat::Flac),
		"mp3" => Some(AudioFormat::Mp3),
		"m4a" => Some(AudioFormat::Mp4),
		"ogg" => Some(AudioFormat::Ogg),
		"opus" => Some(AudioFormat::Opus),
		"wav" => Some(AudioFormat::Wav),
		_ => None,
	}
}

#[test]
fn test_get_audio_format() {
	assert_eq!(get_audio_format(Path::new("animals/🐷/my🐖file.jpg")), None);
	assert_eq!(get_audio_format(Path::new("no_extension")), None);
	assert_eq!(
		get_audio_format(Path::new("animals/🐷/my🐖file.MP3")),
		Some(AudioFormat::Mp3)
	);
	assert_eq!(
		get_audio_format(Path::new("albums/live.flac")),
		Some(AudioFormat::Flac)
	);
}
