//! Per-platform download strategies.
//!
//! Each strategy is one yt-dlp invocation profile. Instagram gets an ordered
//! fallback list of impersonation variants; every other platform uses a
//! single quality-ascending profile sized for a memory-constrained host.

use crate::platform::Platform;

const UA_MOBILE_SAFARI: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 14_6 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0.3 Mobile/15E148 Safari/604.1";
const UA_DESKTOP_CHROME: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const UA_INSTAGRAM_APP: &str = "Instagram 219.0.0.12.117 Android";

/// 10 MiB HTTP chunks keep peak memory bounded on small hosts.
const CHUNK_SIZE: u64 = 10 * 1024 * 1024;

/// Per-attempt socket timeout. Generous because the deployment target's
/// outbound network can be slow.
const SOCKET_TIMEOUT_SECS: u32 = 60;

/// One yt-dlp invocation profile.
#[derive(Debug, Clone)]
pub struct DownloadStrategy {
    /// Human-readable label for logs.
    pub label: &'static str,
    /// Format selector string.
    pub format: &'static str,
    pub user_agent: &'static str,
    /// Referer header; `None` means "use the video URL itself".
    pub referer: Option<&'static str>,
    pub socket_timeout_secs: u32,
    pub http_chunk_size: u64,
    /// Bounded retries within a single strategy attempt.
    pub retries: u32,
    /// Extra `Header:Value` pairs passed via `--add-header`.
    pub extra_headers: &'static [&'static str],
}

/// Full browser header set for the mobile-Safari impersonation profile.
const INSTAGRAM_BROWSER_HEADERS: [&str; 8] = [
    "Accept:*/*",
    "Accept-Language:en-US,en;q=0.9",
    "Accept-Encoding:gzip, deflate, br",
    "Origin:https://www.instagram.com",
    "Connection:keep-alive",
    "Sec-Fetch-Dest:empty",
    "Sec-Fetch-Mode:cors",
    "Sec-Fetch-Site:same-origin",
];

/// Build the ordered strategy list for a platform.
///
/// Instagram variants are tried first-to-last until one succeeds. The
/// generic profile orders formats quality-ascending: transcription does not
/// need source-quality video and the host has little memory to spare.
pub fn strategies_for(platform: Platform) -> Vec<DownloadStrategy> {
    match platform {
        Platform::Instagram => vec![
            DownloadStrategy {
                label: "instagram-mobile-safari",
                format: "best",
                user_agent: UA_MOBILE_SAFARI,
                referer: Some("https://www.instagram.com/"),
                socket_timeout_secs: SOCKET_TIMEOUT_SECS,
                http_chunk_size: CHUNK_SIZE,
                retries: 0,
                extra_headers: &INSTAGRAM_BROWSER_HEADERS,
            },
            DownloadStrategy {
                label: "instagram-desktop-worst",
                format: "worst[ext=mp4]/worst",
                user_agent: UA_DESKTOP_CHROME,
                referer: Some("https://www.instagram.com/"),
                socket_timeout_secs: SOCKET_TIMEOUT_SECS,
                http_chunk_size: CHUNK_SIZE,
                retries: 0,
                extra_headers: &[],
            },
            DownloadStrategy {
                label: "instagram-app-720p",
                format: "best[height<=720]/best",
                user_agent: UA_INSTAGRAM_APP,
                referer: Some("https://www.instagram.com/"),
                socket_timeout_secs: SOCKET_TIMEOUT_SECS,
                http_chunk_size: CHUNK_SIZE,
                retries: 0,
                extra_headers: &[],
            },
        ],
        Platform::Generic => vec![DownloadStrategy {
            label: "generic-low-first",
            format: "worst[ext=mp4]/best[height<=480]/best",
            user_agent: UA_DESKTOP_CHROME,
            referer: None,
            socket_timeout_secs: SOCKET_TIMEOUT_SECS,
            http_chunk_size: CHUNK_SIZE,
            retries: 2,
            extra_headers: &[],
        }],
    }
}

impl DownloadStrategy {
    /// Build the yt-dlp argument list for this strategy.
    pub fn build_args(&self, url: &str, output_path: &str) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "--quiet".into(),
            "--no-warnings".into(),
            "--no-playlist".into(),
            "-f".into(),
            self.format.into(),
            "--user-agent".into(),
            self.user_agent.into(),
            "--referer".into(),
            self.referer.unwrap_or(url).into(),
            "--socket-timeout".into(),
            self.socket_timeout_secs.to_string(),
            "--http-chunk-size".into(),
            self.http_chunk_size.to_string(),
            "--retries".into(),
            self.retries.to_string(),
            "-o".into(),
            output_path.into(),
        ];
        for header in self.extra_headers {
            args.push("--add-header".into());
            args.push((*header).into());
        }
        args.push(url.into());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instagram_has_three_ordered_variants() {
        let strategies = strategies_for(Platform::Instagram);
        assert_eq!(strategies.len(), 3);
        assert_eq!(strategies[0].label, "instagram-mobile-safari");
        assert_eq!(strategies[1].format, "worst[ext=mp4]/worst");
        assert_eq!(strategies[2].user_agent, UA_INSTAGRAM_APP);
    }

    #[test]
    fn test_generic_prefers_low_quality_first() {
        let strategies = strategies_for(Platform::Generic);
        assert_eq!(strategies.len(), 1);
        assert!(strategies[0].format.starts_with("worst"));
        assert_eq!(strategies[0].retries, 2);
    }

    #[test]
    fn test_build_args_referer_defaults_to_url() {
        let strategy = &strategies_for(Platform::Generic)[0];
        let args = strategy.build_args("https://youtu.be/abc", "/tmp/out.mp4");
        let pos = args.iter().position(|a| a == "--referer").unwrap();
        assert_eq!(args[pos + 1], "https://youtu.be/abc");
        assert_eq!(args.last().unwrap(), "https://youtu.be/abc");
    }

    #[test]
    fn test_build_args_includes_extra_headers() {
        let strategy = &strategies_for(Platform::Instagram)[0];
        let args = strategy.build_args("https://www.instagram.com/reel/a/", "/tmp/out.mp4");
        assert!(args.iter().any(|a| a == "Origin:https://www.instagram.com"));
    }
}
