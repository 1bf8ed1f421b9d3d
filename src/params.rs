//! Season parameters derived from a position in the processing hierarchy.
//!
//! Code lives at `<root>/code/<any>/<season>/RSR/<process>`; every other product
//! tree hangs off `<root>` in a fixed place relative to it.

use crate::error::{Error, Result};
use log::debug;
use std::path::{Component, Path, PathBuf};

/// Segments between `<root>` and the end of a code path.
pub const HIERARCHY_DEPTH: usize = 5;

const CODE_SEGMENT: &str = "code";
const TARG_SEGMENT: &str = "targ";
const RSR_SEGMENT: &str = "RSR";
const CMP_SEGMENT: &str = "CMP";

/// Name of the focused-image time reference inside each PST directory.
pub const ZTIM_NAME: &str = "ztim_DNhH";

/// Paths and names defining the season a code directory belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    /// The code directory everything is derived from
    pub code_path: PathBuf,
    /// Season name, two levels below `code`
    pub season: String,
    /// Process name, the code directory itself
    pub process: String,
    /// Directory holding `code`, `targ`, `orig` and `syst`
    pub root_path: PathBuf,
    /// Normalized auxiliary channels, `<root>/targ/norm`
    pub norm_path: PathBuf,
    /// RSR products, the `targ` twin of the code directory
    pub rsr_path: PathBuf,
    /// CMP radar products, `RSR` swapped for `CMP` in [`Params::rsr_path`]
    pub cmp_path: PathBuf,
    /// Picks for this process, `<root>/orig/xtra/<season>/PIK/<process>`
    pub pik_path: PathBuf,
    /// Focused-image positions, one directory per PST holding its ztim
    pub foc_path: PathBuf,
    /// The `season_flight_pst` table
    pub season_flight_pst: PathBuf,
}

impl Params {
    /// Derive the parameters from the current working directory.
    ///
    /// # Errors
    ///
    /// Fails if the working directory can't be read or doesn't follow the hierarchy.
    pub fn from_cwd() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::from_code_path(cwd)
    }

    /// Derive the parameters from an explicit code path. Pure: nothing is read from disk.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConvention`] when the path is shorter than the hierarchy, has a
    /// non UTF-8 segment in it, or lacks the `code` and `RSR` segments where expected.
    pub fn from_code_path<P: AsRef<Path>>(code_path: P) -> Result<Self> {
        let code_path = code_path.as_ref().to_path_buf();
        let invalid = |reason: String| Error::InvalidConvention {
            path: code_path.clone(),
            reason,
        };

        let components: Vec<Component> = code_path.components().collect();
        if components.len() < HIERARCHY_DEPTH {
            return Err(invalid(format!(
                "expected at least {HIERARCHY_DEPTH} segments, found {}",
                components.len()
            )));
        }
        let (head, tail) = components.split_at(components.len() - HIERARCHY_DEPTH);

        let mut segments = Vec::with_capacity(HIERARCHY_DEPTH);
        for component in tail {
            match component {
                Component::Normal(s) => segments.push(
                    s.to_str()
                        .ok_or_else(|| invalid(format!("segment {s:?} is not valid UTF-8")))?,
                ),
                other => {
                    return Err(invalid(format!(
                        "segment {:?} is not a plain directory name",
                        other.as_os_str()
                    )))
                }
            }
        }
        let [code, branch, season, rsr, process] = [
            segments[0],
            segments[1],
            segments[2],
            segments[3],
            segments[4],
        ];
        if code != CODE_SEGMENT {
            return Err(invalid(format!(
                "expected `{CODE_SEGMENT}` {HIERARCHY_DEPTH} levels up, found `{code}`"
            )));
        }
        if rsr != RSR_SEGMENT {
            return Err(invalid(format!(
                "expected `{RSR_SEGMENT}` as the parent directory, found `{rsr}`"
            )));
        }

        let root_path: PathBuf = head.iter().collect();
        let rsr_path = root_path
            .join(TARG_SEGMENT)
            .join(branch)
            .join(season)
            .join(RSR_SEGMENT)
            .join(process);
        let cmp_path = root_path
            .join(TARG_SEGMENT)
            .join(branch)
            .join(season)
            .join(CMP_SEGMENT)
            .join(process);

        let params = Params {
            season: season.to_string(),
            process: process.to_string(),
            norm_path: root_path.join("targ/norm"),
            rsr_path,
            cmp_path,
            pik_path: root_path.join("orig/xtra").join(season).join("PIK").join(process),
            foc_path: root_path
                .join("targ/xtra")
                .join(season)
                .join("FOC/Best_Versions/S1_POS"),
            season_flight_pst: root_path.join("syst/linux/lib/dbase/season_flight_pst"),
            root_path,
            code_path,
        };
        debug!(
            "season {} process {} under {}",
            params.season,
            params.process,
            params.root_path.display()
        );
        Ok(params)
    }

    /// PIK tree for the season, one directory per process.
    pub fn pik_base(&self) -> &Path {
        self.pik_path.parent().unwrap_or(&self.pik_path)
    }

    /// CMP tree for the season, one directory per process.
    pub fn cmp_base(&self) -> &Path {
        self.cmp_path.parent().unwrap_or(&self.cmp_path)
    }

    /// Focused-image time reference for a PST.
    pub fn ztim_path(&self, pst: &str) -> PathBuf {
        self.foc_path.join(pst).join(ZTIM_NAME)
    }

    /// `(name, path-or-value)` pairs in a stable order, for display.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let show = |p: &Path| p.display().to_string();
        vec![
            ("code_path", show(&self.code_path)),
            ("season", self.season.clone()),
            ("process", self.process.clone()),
            ("root_path", show(&self.root_path)),
            ("norm_path", show(&self.norm_path)),
            ("rsr_path", show(&self.rsr_path)),
            ("cmp_path", show(&self.cmp_path)),
            ("pik_path", show(&self.pik_path)),
            ("foc_path", show(&self.foc_path)),
            ("season_flight_pst", show(&self.season_flight_pst)),
        ]
    }
}
