#[derive(Clone, Debug)]
pub struct Config {
    pub username: String,
    pub repo: String,
    pub branch: String,
    pub contributions_base: String,
    pub github_api_base: String,
    pub video_folder: String,
    pub picture_folder: String,
    pub grid_surface_id: String,
    pub backdrop_surface_id: String,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            username: std::env::var("GH_USERNAME").unwrap_or_else(|_| "silentflarecom".to_string()),
            repo: std::env::var("GH_REPO").unwrap_or_else(|_| "SilentFlare.com".to_string()),
            branch: std::env::var("GH_BRANCH").unwrap_or_else(|_| "main".to_string()),
            contributions_base: std::env::var("CONTRIB_API_BASE")
                .unwrap_or_else(|_| "https://github-contributions-api.jogruber.de/v4".to_string()),
            github_api_base: std::env::var("GITHUB_API_BASE")
                .unwrap_or_else(|_| "https://api.github.com".to_string()),
            video_folder: std::env::var("VIDEO_FOLDER").unwrap_or_else(|_| "vid".to_string()),
            picture_folder: std::env::var("PICTURE_FOLDER").unwrap_or_else(|_| "pic".to_string()),
            grid_surface_id: std::env::var("GRID_SURFACE").unwrap_or_else(|_| "contrib-grid".to_string()),
            backdrop_surface_id: std::env::var("BACKDROP_SURFACE")
                .unwrap_or_else(|_| "media-container".to_string()),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(10),
        }
    }
}
