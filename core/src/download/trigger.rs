use crate::download::host::{Anchor, Blob, DownloadHost, ObjectUrl};
use crate::prelude::WaveResult;
use crate::telemetry::log::LogManager;

pub const DEFAULT_FILENAME: &str = "sine_wave.csv";
pub const CSV_MIME: &str = "text/csv";

/// Revokes the object URL when dropped.
struct UrlGuard<'h, H: DownloadHost + ?Sized> {
    host: &'h mut H,
    url: ObjectUrl,
}

impl<H: DownloadHost + ?Sized> Drop for UrlGuard<'_, H> {
    fn drop(&mut self) {
        self.host.revoke_object_url(&self.url);
    }
}

/// Detaches the anchor when dropped.
struct AnchorGuard<'h, H: DownloadHost + ?Sized> {
    host: &'h mut H,
    anchor: Anchor,
}

impl<H: DownloadHost + ?Sized> Drop for AnchorGuard<'_, H> {
    fn drop(&mut self) {
        self.host.remove_anchor(&self.anchor);
    }
}

/// Offers `csv` to the host as a `text/csv` download named `filename`.
///
/// The anchor is removed and the object URL revoked on every path out of this
/// function, including host errors and panics inside the host.
pub fn download_csv<H: DownloadHost + ?Sized>(
    host: &mut H,
    csv: &str,
    filename: &str,
) -> WaveResult<()> {
    let logger = LogManager::new("download");
    let blob = Blob::new(csv.as_bytes(), CSV_MIME);
    let size = blob.bytes.len();

    let url = host.create_object_url(blob)?;
    let mut url_guard = UrlGuard {
        host,
        url: url.clone(),
    };
    logger.trace_step(&format!("registered {} ({} bytes)", url, size));

    let anchor = Anchor::new(url, filename);
    url_guard.host.append_anchor(&anchor)?;
    let mut anchor_guard = AnchorGuard {
        host: &mut *url_guard.host,
        anchor,
    };
    anchor_guard.host.click(&anchor_guard.anchor)?;

    logger.record(&format!("offered {} ({} bytes)", filename, size));
    Ok(())
}

/// [`download_csv`] with the default `sine_wave.csv` filename.
pub fn download_csv_default<H: DownloadHost + ?Sized>(
    host: &mut H,
    csv: &str,
) -> WaveResult<()> {
    download_csv(host, csv, DEFAULT_FILENAME)
}
