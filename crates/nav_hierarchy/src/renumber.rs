//! Derive top-level `nav_order` values from numbered section directories.
//!
//! A tree laid out as `01 Testing/`, `02 DI/`, ... gets each section landing page ordered by its
//! directory number plus an offset, leaving room for the home page in front.

use crate::corpus::{read_dir_sorted, ScanError, ScanOptions};
use crate::correct::Correction;
use crate::header::NAV_ORDER_KEY;
use serde::{Deserialize, Serialize};

/// Renumbering knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenumberPolicy {
    /// Order assigned to the root landing page.
    pub home_order: i64,
    /// Added to each directory number.
    pub offset: i64,
}

impl Default for RenumberPolicy {
    fn default() -> Self {
        Self {
            home_order: 1,
            offset: 1,
        }
    }
}

/// Plan `nav_order` corrections for the root landing page and every numbered section.
///
/// Landing pages are not checked for existence here; missing ones come back as
/// [`CorrectionStatus::NotFound`](crate::correct::CorrectionStatus::NotFound) when applied.
pub fn plan_renumbering(
    options: &ScanOptions,
    policy: &RenumberPolicy,
) -> Result<Vec<Correction>, ScanError> {
    let landing = options.conventions.landing_file_name();
    let mut corrections =
        vec![Correction::new(landing.clone()).set(NAV_ORDER_KEY, policy.home_order.to_string())];

    let entries = read_dir_sorted(&options.root).map_err(|source| ScanError::ReadDir {
        path: options.root.clone(),
        source,
    })?;
    for path in entries {
        if !path.is_dir() {
            continue;
        }
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        if options.is_excluded(&name) {
            continue;
        }
        let Some(number) = section_number(&name) else {
            tracing::debug!(dir = %name, "no numeric prefix; not renumbered");
            continue;
        };
        let Some(order) = number.checked_add(policy.offset) else {
            tracing::warn!(dir = %name, offset = policy.offset, "section number out of range; not renumbered");
            continue;
        };
        corrections.push(
            Correction::new(format!("{name}/{landing}")).set(NAV_ORDER_KEY, order.to_string()),
        );
    }
    Ok(corrections)
}

/// Leading number of a directory name: the first space-separated token, if all ASCII digits.
fn section_number(name: &str) -> Option<i64> {
    let token = name.split(' ').next()?;
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}
