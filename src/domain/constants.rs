//! Site characteristics and domain constants
//!
//! Everything that identifies the 90phut27 streaming site lives here so that
//! configuration defaults and tests agree on the same values.

/// Source site constants
pub mod site {
    /// Site base URL
    pub const BASE_URL: &str = "https://st.90phut27.com";

    /// Path of the page listing all matches
    pub const LIST_PATH: &str = "/home";

    /// Value written to `MatchRecord::source`
    pub const SOURCE_NAME: &str = "90phut27";

    /// Literal substring that marks an href as a match detail link
    pub const MATCH_PATH_MARKER: &str = "/truc-tiep/";
}

/// Status normalization constants
pub mod status {
    /// Substring (compared case-insensitively) that turns a status label into `live`
    pub const LIVE_INDICATOR: &str = "live";

    /// Serialized form of `MatchStatus::Upcoming`
    pub const UPCOMING_LABEL: &str = "upcoming";

    /// Serialized form of `MatchStatus::Live`
    pub const LIVE_LABEL: &str = "live";
}

/// Browser session constants
pub mod browser {
    /// Fixed user agent presented to the site
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

    /// Viewport width in pixels
    pub const WINDOW_WIDTH: u32 = 1920;

    /// Viewport height in pixels
    pub const WINDOW_HEIGHT: u32 = 1080;

    /// Unconditional wait after navigation, before looking for match links
    pub const SETTLE_DELAY_MS: u64 = 3000;

    /// Upper bound for the readiness wait; expiry is not an error
    pub const READY_TIMEOUT_SECS: u64 = 10;
}

/// Number of records echoed to the console after a list crawl
pub const SUMMARY_PREVIEW_COUNT: usize = 5;
