//! Filename policy for uploaded images
//!
//! Only the final extension governs acceptance: `a.exe.png` is allowed while
//! `a.png.exe` is not. Sanitizing produces the single path component that is
//! both reported back to the client and used for the write.

use sanitize_filename::Options;

/// Extensions accepted for upload (compared lower-cased)
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Return the lower-cased text after the last `.`, if the name has one
pub fn extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// Check whether `filename` carries an allowed final extension
pub fn allowed_file(filename: &str) -> bool {
    extension(filename).is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// Reduce a client-supplied filename to a safe single path component.
///
/// Path separators, reserved characters and reserved device names are
/// replaced, runs of whitespace collapse to `_`, and leading or trailing
/// `.`/`_` are stripped so the result can never name a parent directory or a
/// hidden file. Returns `None` when nothing usable remains.
pub fn sanitize(filename: &str) -> Option<String> {
    let options = Options {
        windows: true,
        truncate: true,
        replacement: "_",
    };
    let cleaned = sanitize_filename::sanitize_with_options(filename, options);
    let joined = cleaned.split_whitespace().collect::<Vec<_>>().join("_");
    let trimmed = joined.trim_matches(|c: char| c == '.' || c == '_');

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
