use crate::download::host::{Anchor, Blob, DownloadHost, ObjectUrl};
use crate::prelude::{WaveError, WaveResult};
use crate::telemetry::log::LogManager;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

/// Upper bound on ` (n)` suffixes tried before giving up on a filename.
const MAX_RENAMES: u32 = 9_999;

/// Saves downloads into a directory. A second `wave.csv` lands as `wave (1).csv`.
pub struct DirectoryHost {
    root: PathBuf,
    next_id: u64,
    urls: HashMap<ObjectUrl, Blob>,
    anchors: Vec<Anchor>,
    saved: Vec<PathBuf>,
    logger: LogManager,
}

impl DirectoryHost {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            next_id: 0,
            urls: HashMap::new(),
            anchors: Vec::new(),
            saved: Vec::new(),
            logger: LogManager::new("directory-host"),
        }
    }

    pub fn saved(&self) -> &[PathBuf] {
        &self.saved
    }

    pub fn live_urls(&self) -> usize {
        self.urls.len()
    }

    fn save(&mut self, filename: &str, bytes: &[u8]) -> WaveResult<PathBuf> {
        let name = sanitize_filename(filename)?;
        fs::create_dir_all(&self.root)?;

        for attempt in 0..=MAX_RENAMES {
            let candidate = self.root.join(numbered_name(&name, attempt));
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&candidate)
            {
                Ok(mut file) => {
                    file.write_all(bytes)?;
                    return Ok(candidate);
                }
                Err(err) if err.kind() == ErrorKind::AlreadyExists => continue,
                Err(err) => return Err(err.into()),
            }
        }

        Err(WaveError::Download(format!(
            "no free filename for {} in {}",
            name,
            self.root.display()
        )))
    }
}

impl DownloadHost for DirectoryHost {
    fn create_object_url(&mut self, blob: Blob) -> WaveResult<ObjectUrl> {
        self.next_id += 1;
        let url = ObjectUrl::new(format!("blob:file/{}", self.next_id));
        self.urls.insert(url.clone(), blob);
        Ok(url)
    }

    fn append_anchor(&mut self, anchor: &Anchor) -> WaveResult<()> {
        self.anchors.push(anchor.clone());
        Ok(())
    }

    fn click(&mut self, anchor: &Anchor) -> WaveResult<()> {
        if !self.anchors.contains(anchor) {
            return Err(WaveError::Download(format!(
                "anchor for {} is not attached",
                anchor.download
            )));
        }
        let bytes = self
            .urls
            .get(&anchor.href)
            .map(|blob| blob.bytes.clone())
            .ok_or_else(|| {
                WaveError::Download(format!("object url {} is not registered", anchor.href))
            })?;
        let path = self.save(&anchor.download, &bytes)?;
        self.logger
            .record(&format!("saved {} ({} bytes)", path.display(), bytes.len()));
        self.saved.push(path);
        Ok(())
    }

    fn remove_anchor(&mut self, anchor: &Anchor) {
        self.anchors.retain(|attached| attached != anchor);
    }

    fn revoke_object_url(&mut self, url: &ObjectUrl) {
        self.urls.remove(url);
    }
}

/// Keeps only the final path component so a download cannot escape the root.
fn sanitize_filename(filename: &str) -> WaveResult<String> {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if name.is_empty() || name == "." || name == ".." {
        return Err(WaveError::Download(format!(
            "unusable download filename {:?}",
            filename
        )));
    }
    Ok(name.to_string())
}

/// `wave.csv` -> `wave (n).csv`; attempt 0 keeps the name unchanged.
fn numbered_name(name: &str, attempt: u32) -> String {
    if attempt == 0 {
        return name.to_string();
    }
    match name.rfind('.') {
        Some(dot) if dot > 0 => format!("{} ({}){}", &name[..dot], attempt, &name[dot..]),
        _ => format!("{} ({})", name, attempt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::trigger::download_csv;
    use tempfile::tempdir;

    #[test]
    fn click_writes_the_blob_into_the_root() {
        let dir = tempdir().unwrap();
        let mut host = DirectoryHost::new(dir.path());
        download_csv(&mut host, "a1,a2,a3,a4\n", "wave.csv").unwrap();

        let written = fs::read_to_string(dir.path().join("wave.csv")).unwrap();
        assert_eq!(written, "a1,a2,a3,a4\n");
        assert_eq!(host.live_urls(), 0);
    }

    #[test]
    fn collisions_get_numbered_suffixes() {
        let dir = tempdir().unwrap();
        let mut host = DirectoryHost::new(dir.path());
        download_csv(&mut host, "first", "wave.csv").unwrap();
        download_csv(&mut host, "second", "wave.csv").unwrap();

        assert_eq!(host.saved().len(), 2);
        assert_eq!(
            fs::read_to_string(dir.path().join("wave (1).csv")).unwrap(),
            "second"
        );
    }

    #[test]
    fn path_components_are_stripped() {
        let dir = tempdir().unwrap();
        let mut host = DirectoryHost::new(dir.path());
        download_csv(&mut host, "x", "../escape/wave.csv").unwrap();
        assert!(dir.path().join("wave.csv").exists());
    }

    #[test]
    fn empty_filename_is_rejected_and_released() {
        let dir = tempdir().unwrap();
        let mut host = DirectoryHost::new(dir.path());
        assert!(download_csv(&mut host, "x", "  ").is_err());
        assert_eq!(host.live_urls(), 0);
    }

    #[test]
    fn numbered_name_handles_missing_extension() {
        assert_eq!(numbered_name("wave.csv", 2), "wave (2).csv");
        assert_eq!(numbered_name("wave", 1), "wave (1)");
        assert_eq!(numbered_name(".hidden", 1), ".hidden (1)");
    }
}
