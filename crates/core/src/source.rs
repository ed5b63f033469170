use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::{fs, process::Command};

use crate::{
    types::{Captions, VideoMetadata},
    vtt::vtt_to_text,
};

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Metadata request failed for {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("yt-dlp failed for {url}: {reason}")]
    YtDlp { url: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Where video metadata and captions come from.
///
/// `Ok(None)` means the video has no such data; callers treat errors the same
/// way but may log them.
#[async_trait]
pub trait VideoSource: Send + Sync {
    async fn fetch_metadata(&self, url: &str) -> Result<Option<VideoMetadata>, SourceError>;

    async fn fetch_captions(
        &self,
        url: &str,
        languages: &[String],
    ) -> Result<Option<Captions>, SourceError>;
}

/// oEmbed for metadata, `yt-dlp` for captions
#[derive(Debug, Clone)]
pub struct YouTubeSource {
    http: reqwest::Client,
    oembed_url: String,
    ytdlp: PathBuf,
}

impl Default for YouTubeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl YouTubeSource {
    const OEMBED_URL: &str = "https://www.youtube.com/oembed";

    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            oembed_url: Self::OEMBED_URL.into(),
            ytdlp: PathBuf::from("yt-dlp"),
        }
    }

    pub fn with_ytdlp(mut self, program: impl Into<PathBuf>) -> Self {
        self.ytdlp = program.into();
        self
    }

    pub fn with_oembed_url(mut self, url: impl Into<String>) -> Self {
        self.oembed_url = url.into();
        self
    }
}

#[async_trait]
impl VideoSource for YouTubeSource {
    #[tracing::instrument(skip(self))]
    async fn fetch_metadata(&self, url: &str) -> Result<Option<VideoMetadata>, SourceError> {
        let request_error = |source| SourceError::Request {
            url: url.to_string(),
            source,
        };

        let resp = self
            .http
            .get(&self.oembed_url)
            .query(&[("url", url), ("format", "json")])
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(request_error)?;

        if !resp.status().is_success() {
            tracing::debug!(status = resp.status().as_u16(), "No oEmbed data for video");
            return Ok(None);
        }

        let fields = resp
            .json::<Map<String, Value>>()
            .await
            .map_err(request_error)?;

        Ok(Some(VideoMetadata::new(fields)).filter(|m| !m.is_empty()))
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_captions(
        &self,
        url: &str,
        languages: &[String],
    ) -> Result<Option<Captions>, SourceError> {
        let workdir = tempfile::tempdir()?;
        let output_template = workdir.path().join("%(id)s.%(ext)s");

        let output = Command::new(&self.ytdlp)
            .arg("--skip-download")
            .arg("--write-subs")
            .arg("--write-auto-subs")
            .arg("--sub-langs")
            .arg(languages.join(","))
            .arg("--sub-format")
            .arg("vtt")
            .arg("--no-warnings")
            .arg("-o")
            .arg(&output_template)
            .arg(url)
            .output()
            .await?;

        if !output.status.success() {
            return Err(SourceError::YtDlp {
                url: url.to_string(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let files = list_subtitle_files(workdir.path()).await?;
        let Some((path, language)) = select_subtitle(&files, languages) else {
            tracing::debug!(?languages, "yt-dlp produced no subtitles");
            return Ok(None);
        };

        let vtt = fs::read_to_string(&path).await?;
        Ok(Captions::new(vtt_to_text(&vtt), language))
    }
}

async fn list_subtitle_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("vtt")) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Language tag of `<id>.<lang>.vtt`
fn subtitle_language(path: &Path) -> Option<String> {
    let stem = path.file_stem()?;
    Path::new(stem)
        .extension()
        .map(|lang| lang.to_string_lossy().into_owned())
}

/// Pick the file for the earliest preferred language, else the first one
fn select_subtitle(files: &[PathBuf], languages: &[String]) -> Option<(PathBuf, String)> {
    let tagged: Vec<(&PathBuf, String)> = files
        .iter()
        .map(|path| (path, subtitle_language(path).unwrap_or_default()))
        .collect();

    languages
        .iter()
        .find_map(|wanted| {
            tagged
                .iter()
                .find(|(_, lang)| lang.eq_ignore_ascii_case(wanted))
        })
        .or_else(|| tagged.first())
        .map(|(path, lang)| ((*path).clone(), lang.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| PathBuf::from("/tmp/subs").join(n)).collect()
    }

    #[test]
    fn language_comes_from_second_extension() {
        assert_eq!(
            subtitle_language(Path::new("/tmp/zjkBMFhNj_g.en-US.vtt")).as_deref(),
            Some("en-US")
        );
        assert_eq!(subtitle_language(Path::new("/tmp/plain.vtt")), None);
    }

    #[test]
    fn prefers_languages_in_order() {
        let files = paths(&["abc.de.vtt", "abc.en.vtt", "abc.fr.vtt"]);
        let langs = vec!["fr".to_string(), "en".to_string()];

        let (path, lang) = select_subtitle(&files, &langs).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/subs/abc.fr.vtt"));
        assert_eq!(lang, "fr");
    }

    #[test]
    fn falls_back_to_first_file() {
        let files = paths(&["abc.de.vtt", "abc.es.vtt"]);
        let (_, lang) = select_subtitle(&files, &["en".to_string()]).unwrap();
        assert_eq!(lang, "de");

        assert!(select_subtitle(&[], &["en".to_string()]).is_none());
    }

    #[tokio::test]
    async fn lists_only_vtt_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["vid.en.vtt", "vid.info.json", "vid.de.VTT"] {
            fs::write(dir.path().join(name), "WEBVTT\n").await.unwrap();
        }

        let files = list_subtitle_files(dir.path()).await.unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["vid.de.VTT", "vid.en.vtt"]);
    }
}
