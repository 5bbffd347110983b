use crate::reference::{Site, SITES};
use anyhow::{anyhow, bail, Result};

/// Resolves which sites to generate based on include/exclude filters.
/// The result always follows the fixed site order.
pub fn resolve_sites(
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
) -> Result<Vec<Site>> {
    match (include, exclude) {
        (Some(_), Some(_)) => {
            bail!("Cannot use both --include and --exclude at the same time");
        }
        (Some(include_list), None) => {
            let requested = parse_sites(&include_list)?;
            Ok(SITES
                .iter()
                .copied()
                .filter(|s| requested.contains(s))
                .collect())
        }
        (None, Some(exclude_list)) => {
            let excluded = parse_sites(&exclude_list)?;
            let sites: Vec<Site> = SITES
                .iter()
                .copied()
                .filter(|s| !excluded.contains(s))
                .collect();
            if sites.is_empty() {
                bail!("All sites excluded, nothing to generate");
            }
            Ok(sites)
        }
        (None, None) => Ok(SITES.to_vec()),
    }
}

fn parse_sites(names: &[String]) -> Result<Vec<Site>> {
    names
        .iter()
        .map(|name| name.parse::<Site>().map_err(|e| anyhow!(e)))
        .collect()
}
