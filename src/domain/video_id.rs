use std::fmt;

/// YouTube video identifier parsed from a watch or short-link URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoId(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid YouTube URL format: {0}")]
pub struct InvalidVideoUrl(pub String);

impl VideoId {
    /// `v=` takes precedence over `youtu.be/`, matching watch URLs that carry
    /// both a playlist and a video parameter.
    pub fn parse(url: &str) -> Result<Self, InvalidVideoUrl> {
        let url = url.trim();

        let id = if let Some((_, rest)) = url.rsplit_once("v=") {
            rest.split('&').next().unwrap_or_default()
        } else if let Some((_, rest)) = url.rsplit_once("youtu.be/") {
            rest.split('?').next().unwrap_or_default()
        } else {
            return Err(InvalidVideoUrl(url.to_string()));
        };

        let id = id.trim_end_matches('/');
        if id.is_empty() {
            return Err(InvalidVideoUrl(url.to_string()));
        }

        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
