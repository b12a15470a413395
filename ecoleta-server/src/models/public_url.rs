//! Public image URLs
//!
//! Rows store only the image filename; responses carry the absolute URL
//! clients load it from.

/// Default public base, matching the server's default port.
pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:3333";

/// Path prefix uploaded images are served under.
pub const UPLOADS_PATH: &str = "/uploads";

/// Public base URL of the server, e.g. `http://192.168.0.10:3333`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicUrl(String);

impl PublicUrl {
    pub fn new(base: &str) -> Self {
        Self(base.trim_end_matches('/').to_owned())
    }

    /// Build `<base>/uploads/<filename>` for a stored image.
    ///
    /// # Example
    /// ```
    /// use ecoleta_server::models::PublicUrl;
    ///
    /// let base = PublicUrl::new("http://localhost:3333/");
    /// assert_eq!(base.image_url("oleo.svg"), "http://localhost:3333/uploads/oleo.svg");
    /// ```
    pub fn image_url(&self, filename: &str) -> String {
        format!(
            "{}{}/{}",
            self.0,
            UPLOADS_PATH,
            filename.trim_start_matches('/')
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PublicUrl {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLIC_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_base_and_filename() {
        let base = PublicUrl::new("http://10.0.0.5:3333");
        assert_eq!(
            base.image_url("a1b2c3-photo.jpg"),
            "http://10.0.0.5:3333/uploads/a1b2c3-photo.jpg"
        );
    }

    #[test]
    fn normalizes_slashes() {
        let base = PublicUrl::new("http://example.com//");
        assert_eq!(base.image_url("/x.png"), "http://example.com/uploads/x.png");
    }

    #[test]
    fn default_base() {
        assert_eq!(PublicUrl::default().as_str(), DEFAULT_PUBLIC_URL);
    }
}
