//! Listings of the PIK and CMP products available for a PST.

use crate::error::Result;
use crate::params::Params;
use glob::{MatchOptions, Pattern};
use log::{debug, trace, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// How CMP listings leave out `.meta` side files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetaFilter {
    /// The historical `*[!.meta]` glob: drops any name whose last character is one of
    /// `.`, `m`, `e`, `t` or `a`, which is not the same as dropping `.meta` files.
    #[default]
    CharacterClass,
    /// Drops exactly the names ending in `.meta`.
    Suffix,
}

fn options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    }
}

/// Sorted names of the files in `dir` matching the glob `file_pattern`.
///
/// Names that aren't valid UTF-8 are matched and returned lossily, with a warning. A
/// missing directory lists as empty.
fn list_names(dir: &Path, file_pattern: &str) -> Result<Vec<String>> {
    let pattern = Pattern::new(file_pattern)?;
    trace!("listing {}/{file_pattern}", dir.display());

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut names = Vec::new();
    for entry in entries {
        let file_name = entry?.file_name();
        let name = match file_name.to_str() {
            Some(name) => name.to_string(),
            None => {
                let lossy = file_name.to_string_lossy().into_owned();
                warn!("{}: {file_name:?} is not valid UTF-8, listing it as {lossy}", dir.display());
                lossy
            }
        };
        if pattern.matches_with(&name, options()) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Product directory `<base>/<process>/<pst>`, falling back to the season's own process.
fn product_dir(base: &Path, params: &Params, pst: &str, process: Option<&str>) -> PathBuf {
    base.join(process.unwrap_or(&params.process)).join(pst)
}

/// Split a PIK file name at its first `.` into `(product, pik_type)`.
pub fn split_pik_name(name: &str) -> (&str, &str) {
    name.split_once('.').unwrap_or((name, ""))
}

/// Available PIK files for a PST, as parallel `(products, pik_types)` sequences.
///
/// Lists `<pik tree>/<process>/<pst>/*.*`. A missing directory lists as empty.
///
/// # Errors
///
/// Fails on unreadable directory entries.
pub fn pik(params: &Params, pst: &str, process: Option<&str>) -> Result<(Vec<String>, Vec<String>)> {
    let dir = product_dir(params.pik_base(), params, pst, process);
    let names = list_names(&dir, "*.*")?;
    debug!("{} pik files in {}", names.len(), dir.display());

    Ok(names
        .iter()
        .map(|name| {
            let (product, pik_type) = split_pik_name(name);
            (product.to_string(), pik_type.to_string())
        })
        .unzip())
}

/// Available CMP radar products for a PST.
///
/// # Errors
///
/// Fails on unreadable directory entries.
pub fn cmp(
    params: &Params,
    pst: &str,
    process: Option<&str>,
    filter: MetaFilter,
) -> Result<Vec<String>> {
    let dir = product_dir(params.cmp_base(), params, pst, process);
    let names = match filter {
        MetaFilter::CharacterClass => list_names(&dir, "*[!.meta]")?,
        MetaFilter::Suffix => list_names(&dir, "*")?
            .into_iter()
            .filter(|name| !name.ends_with(".meta"))
            .collect(),
    };
    debug!("{} cmp products in {} ({filter:?})", names.len(), dir.display());
    Ok(names)
}
