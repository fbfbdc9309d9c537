//! Breadth-first search for the nearest benchmarked ancestor

use perfgate_vcs::ParentLookup;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{error::Result, model::ResultSet, source::ResultSource};

/// Result set of the nearest ancestor that has one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    /// Ancestry distance from the target (1 = immediate parent)
    pub depth: usize,
    pub results: ResultSet,
}

impl Baseline {
    pub fn commit(&self) -> &str {
        &self.results.commit
    }
}

/// Find the nearest ancestor of `target` with stored results
///
/// The target itself is never considered. Levels are scanned left to right
/// and the first hit wins, so ties at equal distance go to the earlier
/// parent. Commits reachable along several paths are queried again rather
/// than tracked. At most `max_depth` levels are examined and the parents of
/// the last level are never requested.
pub async fn find_baseline<S, L>(
    source: &S,
    lookup: &L,
    target: &str,
    max_depth: usize,
) -> Result<Option<Baseline>>
where
    S: ResultSource + ?Sized,
    L: ParentLookup + ?Sized,
{
    if max_depth == 0 {
        return Ok(None);
    }

    let mut frontier = lookup.parents(target).await?;

    for depth in 1..=max_depth {
        if frontier.is_empty() {
            debug!(start = %target, depth, "Ran out of ancestors");
            return Ok(None);
        }

        trace!(depth, frontier = ?frontier, "Scanning ancestry level");

        for commit in &frontier {
            if let Some(results) = source.find_results(commit).await? {
                debug!(start = %target, baseline = %commit, depth, "Found baseline");
                return Ok(Some(Baseline { depth, results }));
            }
        }

        if depth == max_depth {
            break;
        }

        let mut next = Vec::new();
        for commit in &frontier {
            next.extend(lookup.parents(commit).await?);
        }
        frontier = next;
    }

    debug!(start = %target, max_depth, "No baseline within search depth");
    Ok(None)
}
