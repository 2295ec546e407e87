//! Source platform classification.

/// Hostname fragments that identify the service's own deployment, not a
/// video source. Users occasionally paste the app's own page URL back in.
const SELF_HOST_PATTERNS: [&str; 4] = ["onrender.com", "railway.app", "localhost", "127.0.0.1"];

/// Recognized source platform classes.
///
/// Instagram gets its own class because its CDN frequently rejects default
/// clients; everything else shares one download configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Instagram,
    Generic,
}

impl Platform {
    /// Classify a URL by hostname substring.
    pub fn classify(url: &str) -> Self {
        if url.to_lowercase().contains("instagram.com") {
            Platform::Instagram
        } else {
            Platform::Generic
        }
    }
}

/// Check whether a URL points back at the service's own deployment host.
pub fn is_self_reference(url: &str) -> bool {
    let lower = url.to_lowercase();
    SELF_HOST_PATTERNS.iter().any(|p| lower.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_instagram() {
        assert_eq!(
            Platform::classify("https://www.instagram.com/reel/abc/"),
            Platform::Instagram
        );
        assert_eq!(
            Platform::classify("https://www.Instagram.com/p/xyz"),
            Platform::Instagram
        );
    }

    #[test]
    fn test_classify_generic() {
        assert_eq!(
            Platform::classify("https://www.tiktok.com/@x/video/123"),
            Platform::Generic
        );
        assert_eq!(
            Platform::classify("https://youtube.com/watch?v=abc"),
            Platform::Generic
        );
    }

    #[test]
    fn test_self_reference_detection() {
        assert!(is_self_reference("https://athena.onrender.com/analyze"));
        assert!(is_self_reference("http://localhost:5000/"));
        assert!(is_self_reference("http://127.0.0.1:8000/index.html"));
        assert!(is_self_reference("https://myapp.railway.app/watch"));
        assert!(!is_self_reference("https://www.facebook.com/watch/?v=1"));
    }
}
