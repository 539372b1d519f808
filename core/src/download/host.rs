use crate::prelude::WaveResult;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub bytes: Vec<u8>,
    pub mime: String,
}

impl Blob {
    pub fn new(bytes: impl Into<Vec<u8>>, mime: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            mime: mime.into(),
        }
    }
}

/// Opaque handle to a blob registered with a host. Valid until revoked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: ObjectUrl,
    pub download: String,
}

impl Anchor {
    pub fn new(href: ObjectUrl, download: impl Into<String>) -> Self {
        Self {
            href,
            download: download.into(),
        }
    }
}

/// Release calls cannot fail; they run from drop guards.
pub trait DownloadHost {
    fn create_object_url(&mut self, blob: Blob) -> WaveResult<ObjectUrl>;
    fn append_anchor(&mut self, anchor: &Anchor) -> WaveResult<()>;
    fn click(&mut self, anchor: &Anchor) -> WaveResult<()>;
    fn remove_anchor(&mut self, anchor: &Anchor);
    fn revoke_object_url(&mut self, url: &ObjectUrl);
}
