use std::path::Path;

use crate::loader::load_all;
use crate::repository::ResearcherWriter;

/// Handle a full-reload trigger: clear the store and reload both rosters,
/// logging the resulting counters.
pub async fn process_load_message<R>(repo: R, internal_path: &Path, external_path: &Path)
where
    R: ResearcherWriter,
{
    log::info!(
        "Received roster load: internal={}, external={}",
        internal_path.display(),
        external_path.display()
    );

    let summary = match load_all(&repo, internal_path, external_path) {
        Ok(summary) => summary,
        Err(error) => {
            log::error!("Roster load failed: {error}");
            return;
        }
    };

    log::info!(
        "Finished roster load: internal_inserted={}, external_inserted={}, skipped_missing={}, skipped_duplicates={}",
        summary.internal_inserted,
        summary.external_inserted,
        summary.skipped_missing,
        summary.skipped_duplicates
    );
    if !summary.failed_files.is_empty() {
        log::warn!(
            "Roster load left the store partial; failed files: {}",
            summary.failed_files.join(", ")
        );
    }
}
