//! # Session Store
//!
//! Holds the last rendered artifact for one user session, keyed by a
//! value-compared fingerprint of the inputs that produced it. When the
//! inputs change, the stale artifact is dropped before the next render;
//! unrelated option changes (colors, scale, format) keep it alive.

use crate::model::{Artifact, Fingerprint};

/// Per-session artifact cache. One store per user session; mutated only
/// by the handler serving that session's current interaction.
#[derive(Default)]
pub struct SessionStore {
    artifact: Option<Artifact>,
    fingerprint: Option<Fingerprint>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile the store with the current inputs. If the fingerprint
    /// differs from the one the stored artifact was generated from, the
    /// artifact is cleared so a stale download is never offered.
    ///
    /// Returns true when an artifact survived the sync.
    pub fn sync(&mut self, current: Fingerprint) -> bool {
        if self.fingerprint.as_ref() != Some(&current) {
            self.artifact = None;
            self.fingerprint = Some(current);
        }
        self.artifact.is_some()
    }

    /// Store a freshly generated artifact together with the fingerprint
    /// of the inputs that produced it.
    pub fn store(&mut self, artifact: Artifact, fingerprint: Fingerprint) {
        self.artifact = Some(artifact);
        self.fingerprint = Some(fingerprint);
    }

    pub fn artifact(&self) -> Option<&Artifact> {
        self.artifact.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OutputFormat, QrPayload, QrRequest};

    fn artifact() -> Artifact {
        Artifact {
            bytes: vec![1, 2, 3],
            mime: OutputFormat::Png.mime(),
            extension: OutputFormat::Png.extension(),
            preview: None,
        }
    }

    fn request(text: &str) -> QrRequest {
        QrRequest::new(QrPayload::TextUrl { text: text.into() })
    }

    #[test]
    fn test_store_then_sync_same_inputs_keeps_artifact() {
        let mut store = SessionStore::new();
        let req = request("https://example.com");
        store.store(artifact(), Fingerprint::of(&req));

        assert!(store.sync(Fingerprint::of(&req)));
        assert!(store.artifact().is_some());
    }

    #[test]
    fn test_changed_inputs_clear_artifact() {
        let mut store = SessionStore::new();
        store.store(artifact(), Fingerprint::of(&request("one")));

        assert!(!store.sync(Fingerprint::of(&request("two"))));
        assert!(store.artifact().is_none());
    }

    #[test]
    fn test_styling_changes_keep_artifact() {
        let mut store = SessionStore::new();
        let mut req = request("stable");
        store.store(artifact(), Fingerprint::of(&req));

        // Format and scale are not part of the fingerprint.
        req.format = OutputFormat::Svg;
        req.scale = 9;
        assert!(store.sync(Fingerprint::of(&req)));
    }

    #[test]
    fn test_logo_presence_clears_artifact() {
        let mut store = SessionStore::new();
        let mut req = request("logo");
        store.store(artifact(), Fingerprint::of(&req));

        req.logo = Some(image::DynamicImage::new_rgba8(2, 2));
        assert!(!store.sync(Fingerprint::of(&req)));
    }

    #[test]
    fn test_empty_store_sync_reports_no_artifact() {
        let mut store = SessionStore::new();
        assert!(!store.sync(Fingerprint::of(&request("fresh"))));
    }
}
