use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("could not determine cache directory")]
    NoCacheDir,
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write model to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 when the server sent no Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// Locates a model file by name, downloading it on a cache miss.
///
/// Checked in order: the per-user cache, then `bundled_dir` (packaged
/// installs), then a fresh download into the cache.
pub fn resolve(
    name: &str,
    url: &str,
    bundled_dir: Option<&Path>,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    let cache_dir = model_cache_dir()?;
    let cached = cache_dir.join(name);
    if cached.exists() {
        return Ok(cached);
    }

    if let Some(dir) = bundled_dir {
        let bundled = dir.join(name);
        if bundled.exists() {
            return Ok(bundled);
        }
    }

    fs::create_dir_all(&cache_dir).map_err(ModelResolveError::CacheDir)?;
    log::info!("downloading model {name} from {url}");
    fetch_to(url, &cached, progress)?;
    Ok(cached)
}

/// Per-user model cache.
///
/// - macOS: `~/Library/Application Support/MoodTune/models/`
/// - Linux: `$XDG_CACHE_HOME/MoodTune/models/` or `~/.cache/MoodTune/models/`
/// - Windows: `%LOCALAPPDATA%/MoodTune/models/`
pub fn model_cache_dir() -> Result<PathBuf, ModelResolveError> {
    #[cfg(target_os = "macos")]
    let base = dirs::data_dir();
    #[cfg(not(target_os = "macos"))]
    let base = dirs::cache_dir();

    base.map(|d| d.join("MoodTune").join("models"))
        .ok_or(ModelResolveError::NoCacheDir)
}

/// Downloads `url` into `dest`, staging through a `.part` file so an
/// interrupted transfer never leaves a truncated model behind.
fn fetch_to(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), ModelResolveError> {
    let staging = dest.with_extension("part");
    let result = stream_body(url, &staging, progress)
        .and_then(|()| {
            fs::rename(&staging, dest).map_err(|e| ModelResolveError::Write {
                path: dest.to_path_buf(),
                source: e,
            })
        });
    if result.is_err() {
        let _ = fs::remove_file(&staging);
    }
    result
}

fn stream_body(
    url: &str,
    staging: &Path,
    progress: Option<ProgressFn>,
) -> Result<(), ModelResolveError> {
    let write_err = |e: std::io::Error| ModelResolveError::Write {
        path: staging.to_path_buf(),
        source: e,
    };

    let mut response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| ModelResolveError::Download {
            url: url.to_string(),
            source: e,
        })?;

    let total = response.content_length().unwrap_or(0);
    let mut file = fs::File::create(staging).map_err(write_err)?;

    // Stream in chunks; models can be large and Content-Length is only
    // advisory, so progress is reported from actual bytes received.
    let mut buf = vec![0u8; 256 * 1024];
    let mut received: u64 = 0;
    loop {
        let n = response.read(&mut buf).map_err(write_err)?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n]).map_err(write_err)?;
        received += n as u64;
        if let Some(ref cb) = progress {
            cb(received, total);
        }
    }
    file.flush().map_err(write_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// A model name no cache could plausibly already contain.
    fn unique_name(tag: &str) -> String {
        format!("{}_{}_{}.onnx", tag, std::process::id(), line!())
    }

    #[test]
    fn test_resolve_prefers_bundled_over_download() {
        let tmp = TempDir::new().unwrap();
        let name = unique_name("bundled");
        let bundled_path = tmp.path().join(&name);
        fs::write(&bundled_path, b"bundled model").unwrap();

        // The URL is unreachable; resolution must not get that far.
        let resolved = resolve(
            &name,
            "http://invalid.nonexistent.example.com/model.onnx",
            Some(tmp.path()),
            None,
        )
        .unwrap();
        assert_eq!(resolved, bundled_path);
    }

    #[test]
    fn test_resolve_missing_everywhere_fails() {
        let tmp = TempDir::new().unwrap();
        let result = resolve(
            &unique_name("missing"),
            "http://invalid.nonexistent.example.com/model.onnx",
            Some(tmp.path()),
            None,
        );
        assert!(matches!(
            result,
            Err(ModelResolveError::Download { .. })
        ));
    }

    #[test]
    fn test_model_cache_dir_is_app_scoped() {
        let dir = model_cache_dir().unwrap();
        assert!(dir.to_string_lossy().contains("MoodTune"));
        assert!(dir.ends_with("models") || dir.to_string_lossy().contains("models"));
    }

    #[test]
    fn test_fetch_failure_leaves_no_files() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("model.onnx");
        let result = fetch_to(
            "http://invalid.nonexistent.example.com/model",
            &dest,
            None,
        );
        assert!(result.is_err());
        assert!(!dest.exists());
        assert!(!dest.with_extension("part").exists());
    }

    #[test]
    fn test_fetch_reports_progress() {
        // Needs outbound network; skip under CI.
        if std::env::var("CI").is_ok() {
            return;
        }
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("robots.txt");

        let calls = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = calls.clone();
        let result = fetch_to(
            "https://www.google.com/robots.txt",
            &dest,
            Some(Box::new(move |received, _total| {
                assert!(received > 0);
                counter.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            })),
        );
        assert!(result.is_ok(), "fetch failed: {:?}", result.err());
        assert!(dest.exists());
        assert!(calls.load(std::sync::atomic::Ordering::Relaxed) > 0);
    }
}
