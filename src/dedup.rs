use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Hex SHA-256 of the content
pub fn digest(content: &str) -> String {
    format!("{:x}", Sha256::digest(content.as_bytes()))
}

/// A digest that passed the gate but is not recorded yet
#[derive(Debug)]
pub struct Pending {
    digest: String,
    state_path: PathBuf,
}

impl Pending {
    /// Record the digest, replacing whatever was stored.
    pub fn commit(self) {
        if let Some(parent) = self.state_path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                debug!(path = %parent.display(), error = %e, "failed to create dedup state dir");
            }
        }
        match fs::write(&self.state_path, &self.digest) {
            Ok(()) => info!(hash = %self.digest, "updated dedup state"),
            Err(e) => {
                warn!(path = %self.state_path.display(), error = %e, "failed to write dedup state")
            }
        }
    }
}

/// Some when `content` differs from what was last recorded at `state_path`.
/// Nothing is written until the returned `Pending` is committed, so callers
/// commit only once the action it guards has happened.
pub fn should_proceed(content: &str, state_path: &Path) -> Option<Pending> {
    let current = digest(content);
    // Missing or unreadable state is "never seen"
    let last = fs::read_to_string(state_path).unwrap_or_default();

    if current == last.trim() {
        return None;
    }

    Some(Pending {
        digest: current,
        state_path: state_path.to_path_buf(),
    })
}
