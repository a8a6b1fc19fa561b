use tracing::error;
use url::Url;

use crate::app::{AppError, Result};
use crate::config::AlbumConfig;

/// Parse `candidate` and check it points at an album page.
pub fn check_album_url(candidate: &str, rules: &AlbumConfig) -> Result<Url> {
    let url = Url::parse(candidate)?;

    let host = match url.host_str() {
        Some(host) if !url.scheme().is_empty() => host,
        _ => {
            return Err(AppError::InvalidInput(format!(
                "URL has no host: {}",
                candidate
            )))
        }
    };

    if !host.contains(&rules.domain) {
        return Err(AppError::InvalidInput(format!(
            "URL is not on {}: {}",
            rules.domain, candidate
        )));
    }

    if !url.path().contains(&rules.path_marker) {
        return Err(AppError::InvalidInput(format!(
            "URL path does not contain {}: {}",
            rules.path_marker, candidate
        )));
    }

    Ok(url)
}

/// Whether `candidate` is an album page URL. Parse failures are logged and
/// reported as invalid.
pub fn validate_album_url(candidate: &str, rules: &AlbumConfig) -> bool {
    match check_album_url(candidate, rules) {
        Ok(_) => true,
        Err(AppError::InvalidUrl(e)) => {
            error!("URL validation failed for {:?}: {}", candidate, e);
            false
        }
        Err(_) => false,
    }
}
