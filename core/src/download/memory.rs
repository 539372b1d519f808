use crate::download::host::{Anchor, Blob, DownloadHost, ObjectUrl};
use crate::prelude::{WaveError, WaveResult};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDownload {
    pub filename: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Keeps downloads in memory and tracks live URLs and anchors.
#[derive(Debug, Default)]
pub struct MemoryHost {
    next_id: u64,
    urls: BTreeMap<ObjectUrl, Blob>,
    anchors: Vec<Anchor>,
    downloads: Vec<SavedDownload>,
    revoked: usize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn downloads(&self) -> &[SavedDownload] {
        &self.downloads
    }

    pub fn live_urls(&self) -> usize {
        self.urls.len()
    }

    pub fn attached_anchors(&self) -> usize {
        self.anchors.len()
    }

    pub fn revoked(&self) -> usize {
        self.revoked
    }
}

impl DownloadHost for MemoryHost {
    fn create_object_url(&mut self, blob: Blob) -> WaveResult<ObjectUrl> {
        self.next_id += 1;
        let url = ObjectUrl::new(format!("blob:memory/{}", self.next_id));
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
        let blob = self.urls.get(&anchor.href).ok_or_else(|| {
            WaveError::Download(format!("object url {} is not registered", anchor.href))
        })?;
        self.downloads.push(SavedDownload {
            filename: anchor.download.clone(),
            mime: blob.mime.clone(),
            bytes: blob.bytes.clone(),
        });
        Ok(())
    }

    fn remove_anchor(&mut self, anchor: &Anchor) {
        self.anchors.retain(|attached| attached != anchor);
    }

    fn revoke_object_url(&mut self, url: &ObjectUrl) {
        if self.urls.remove(url).is_some() {
            self.revoked += 1;
        }
    }
}
