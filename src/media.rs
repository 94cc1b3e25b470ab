use std::time::Duration;

use anyhow::Result;
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::config::Config;
use crate::logging::{log, obj, v_str, Domain, Level};

/// Media listings fetched once per page session. Owned by the caller,
/// never invalidated, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaCache {
    pub videos: Option<Vec<String>>,
    pub pictures: Option<Vec<String>>,
}

/// What the page puts behind everything else. The payload is the relative
/// path the presentation layer loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backdrop {
    Video(String),
    Picture(String),
}

#[derive(Deserialize)]
struct ContentsEntry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Lists repository media folders through the public contents API.
pub struct MediaLibrary {
    client: Client,
    api_base: String,
    username: String,
    repo: String,
    branch: String,
    video_folder: String,
    picture_folder: String,
}

impl MediaLibrary {
    pub fn new(cfg: &Config) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(cfg.http_timeout_secs))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_base: cfg.github_api_base.clone(),
            username: cfg.username.clone(),
            repo: cfg.repo.clone(),
            branch: cfg.branch.clone(),
            video_folder: cfg.video_folder.clone(),
            picture_folder: cfg.picture_folder.clone(),
        }
    }

    fn contents_url(&self, folder: &str) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base.trim_end_matches('/'),
            self.username,
            self.repo,
            folder
        ))?;
        url.query_pairs_mut().append_pair("ref", &self.branch);
        Ok(url)
    }

    /// File names under one repository folder. Any failure degrades to an
    /// empty list, logged.
    pub async fn file_list(&self, folder: &str) -> Vec<String> {
        match self.fetch_entries(folder).await {
            Ok(names) => names,
            Err(err) => {
                log(
                    Level::Warn,
                    Domain::Media,
                    "folder_listing_failed",
                    obj(&[("folder", v_str(folder)), ("cause", v_str(&err.to_string()))]),
                );
                Vec::new()
            }
        }
    }

    async fn fetch_entries(&self, folder: &str) -> Result<Vec<String>> {
        let url = self.contents_url(folder)?;
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            anyhow::bail!("status {}", resp.status().as_u16());
        }
        let entries: Vec<ContentsEntry> = resp.json().await?;
        Ok(entries
            .into_iter()
            .filter(|e| e.kind == "file")
            .map(|e| e.name)
            .collect())
    }

    /// Fill the cache where it is still empty, then pick a backdrop. Fields
    /// already populated are reused untouched.
    pub async fn choose_backdrop<R: Rng>(
        &self,
        cache: &mut MediaCache,
        rng: &mut R,
    ) -> Option<Backdrop> {
        if cache.videos.is_none() {
            cache.videos = Some(self.file_list(&self.video_folder).await);
        }
        if cache.pictures.is_none() {
            cache.pictures = Some(self.file_list(&self.picture_folder).await);
        }
        let chosen = choose_from_cache(cache, rng, &self.video_folder, &self.picture_folder);
        if chosen.is_none() {
            log(
                Level::Warn,
                Domain::Media,
                "no_media_found",
                obj(&[
                    ("video_folder", v_str(&self.video_folder)),
                    ("picture_folder", v_str(&self.picture_folder)),
                ]),
            );
        }
        chosen
    }

    /// A video failed to load: swap in a random picture when any are cached.
    pub fn fallback_picture<R: Rng>(&self, cache: &MediaCache, rng: &mut R) -> Option<Backdrop> {
        let pictures = cache.pictures.as_deref().unwrap_or(&[]);
        pick(pictures, rng).map(|name| Backdrop::Picture(format!("{}/{}", self.picture_folder, name)))
    }
}

/// Selection rules: video vs picture is a coin flip when both folders have
/// entries, the populated side otherwise, nothing when both are empty.
pub fn choose_from_cache<R: Rng>(
    cache: &MediaCache,
    rng: &mut R,
    video_folder: &str,
    picture_folder: &str,
) -> Option<Backdrop> {
    let videos = cache.videos.as_deref().unwrap_or(&[]);
    let pictures = cache.pictures.as_deref().unwrap_or(&[]);
    let show_video = match (videos.is_empty(), pictures.is_empty()) {
        (false, false) => rng.gen_bool(0.5),
        (false, true) => true,
        (true, false) => false,
        (true, true) => return None,
    };
    if show_video {
        pick(videos, rng).map(|name| Backdrop::Video(format!("{}/{}", video_folder, name)))
    } else {
        pick(pictures, rng).map(|name| Backdrop::Picture(format!("{}/{}", picture_folder, name)))
    }
}

fn pick<'a, R: Rng>(items: &'a [String], rng: &mut R) -> Option<&'a String> {
    if items.is_empty() {
        None
    } else {
        items.get(rng.gen_range(0..items.len()))
    }
}
