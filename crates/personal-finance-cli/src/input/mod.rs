pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Resolve a structured input from `--input <file.json>` or piped stdin.
/// Returns `None` when neither is available so callers can fall back to flags.
pub fn from_file_or_stdin<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_json(path)?));
    }
    match stdin::read_stdin()? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Like `from_file_or_stdin`, but the input is mandatory.
pub fn require<T: DeserializeOwned>(
    path: Option<&str>,
    what: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    from_file_or_stdin(path)?
        .ok_or_else(|| format!("--input <file.json> or stdin required for {what}").into())
}
