use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::error::{DownloadError, FetchError};

/// Downloads images and keeps only those that look real.
pub struct Downloader {
    client: Client,
    timeout: Duration,
    min_bytes: usize,
}

impl Downloader {
    pub fn new(client: Client, timeout: Duration, min_bytes: usize) -> Self {
        Self {
            client,
            timeout,
            min_bytes,
        }
    }

    /// Downloads `url` into `dest`, overwriting it. Returns the number of
    /// bytes written.
    pub async fn save(&self, url: &str, dest: &Path) -> Result<u64, DownloadError> {
        let bytes = self.fetch(url).await?;
        debug!(url, len = bytes.len(), "downloaded");
        store_if_large_enough(&bytes, dest, self.min_bytes).await
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let url = url::Url::parse(url)?;
        let response = self.client.get(url).timeout(self.timeout).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Writes `bytes` to `dest` when there are more than `min_bytes` of them.
/// Otherwise `dest` is left exactly as it was.
pub async fn store_if_large_enough(
    bytes: &[u8],
    dest: &Path,
    min_bytes: usize,
) -> Result<u64, DownloadError> {
    if bytes.len() <= min_bytes {
        return Err(DownloadError::TooSmall {
            len: bytes.len(),
            min: min_bytes,
        });
    }
    if let Some(dir) = dest.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }
    tokio::fs::write(dest, bytes).await?;
    Ok(bytes.len() as u64)
}

/// Size of the file at `path`, `None` when it does not exist.
pub fn existing_size(path: &Path) -> Option<u64> {
    std::fs::metadata(path).ok().map(|meta| meta.len())
}

/// Whether `path` already holds a downloaded image rather than a placeholder.
pub fn has_real_image(path: &Path, real_image_bytes: u64) -> bool {
    existing_size(path).is_some_and(|len| len > real_image_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn small_payload_keeps_existing_file() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("lineal.jpg");
        std::fs::write(&dest, b"placeholder").unwrap();

        for len in [0, 1, 1999, 2000] {
            let err = store_if_large_enough(&vec![7u8; len], &dest, 2000)
                .await
                .unwrap_err();
            assert!(matches!(err, DownloadError::TooSmall { min: 2000, .. }));
            assert_eq!(std::fs::read(&dest).unwrap(), b"placeholder");
        }
    }

    #[tokio::test]
    async fn small_payload_does_not_create_file() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("bumerang.jpg");
        assert!(store_if_large_enough(b"GIF89a", &dest, 2000).await.is_err());
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn large_payload_overwrites() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("nested").join("fueller.jpg");
        let written = store_if_large_enough(&[1u8; 2001], &dest, 2000).await.unwrap();
        assert_eq!(written, 2001);
        assert_eq!(existing_size(&dest), Some(2001));
        assert!(has_real_image(&dest, 2000));
        assert!(!has_real_image(&dest, 50_000));
        assert!(!has_real_image(&dir.path().join("missing.jpg"), 0));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn payload_up_to_minimum_never_touches_file(
            (min, len) in (1usize..8192).prop_flat_map(|min| (Just(min), 0..=min)),
            fill in any::<u8>(),
        ) {
            let dir = tempdir().unwrap();
            let dest = dir.path().join("kugelschreiber.jpg");
            std::fs::write(&dest, b"placeholder").unwrap();

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            let result = runtime.block_on(store_if_large_enough(&vec![fill; len], &dest, min));

            prop_assert!(
                matches!(result, Err(DownloadError::TooSmall { len: got, min: m }) if got == len && m == min),
                "expected TooSmall {{ len: {}, min: {} }}, got {:?}", len, min, result
            );
            prop_assert_eq!(std::fs::read(&dest).unwrap(), b"placeholder".to_vec());
        }
    }
}
