use anyhow::Context;
use approx::assert_abs_diff_eq;
use icecap_get::{
    cmp, flight, latitude, pik, pst, signal, surface_range, Channel, Error, FlatSurfaceLoss,
    MetaFilter, Params, ProductReader, SignalOptions,
};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};
use tempfile::{tempdir, TempDir};

const PST: &str = "MIS/JKB2e/Y35a";

/// Reads two-column `time value` text files laid out under the season's trees.
struct TextReader {
    norm: PathBuf,
    pik: PathBuf,
}

fn read_columns(path: &Path) -> anyhow::Result<Channel> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let mut channel = Channel::default();
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let mut cols = line.split_whitespace();
        channel.time.push(cols.next().context("no time")?.parse()?);
        channel.value.push(cols.next().context("no value")?.parse()?);
    }
    Ok(channel)
}

impl ProductReader for TextReader {
    fn norm(&self, pst: &str, instrument: &str, channel: &str, _interp: bool) -> anyhow::Result<Channel> {
        read_columns(&self.norm.join(pst).join(instrument).join(channel))
    }

    fn pik(&self, pst: &str, pik: &str) -> anyhow::Result<Channel> {
        read_columns(&self.pik.join(pst).join(pik))
    }

    fn ztim(&self, path: &Path) -> anyhow::Result<HashMap<String, Vec<f64>>> {
        let htim = read_columns(path)?.time;
        Ok(HashMap::from([("htim".to_string(), htim)]))
    }
}

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// A season tree for ICP5/pik1 with one PST populated.
fn season() -> (TempDir, Params) {
    let tmp_dir = tempdir().unwrap();
    let code = tmp_dir.path().join("WAIS/code/xtra/ICP5/RSR/pik1");
    fs::create_dir_all(&code).unwrap();
    let p = Params::from_code_path(&code).unwrap();

    write(
        &p.season_flight_pst,
        "MIS/JKB2e/Y35a F01 ICP5\nMIS/JKB2e/Y36a F01 ICP5\nDRP/JKB2f/X01a F07 ICP4\n",
    );
    write(&p.pik_path.join(PST).join("MagHiResInco1.srf"), "0 1000\n1 2000\n");
    write(&p.pik_path.join(PST).join("MagHiResInco1.bed"), "0 500\n");
    write(&p.cmp_path.join(PST).join("MagHiResInco1"), "");
    write(&p.cmp_path.join(PST).join("MagHiResInco1.meta"), "");
    write(&p.norm_path.join(PST).join("LAS/las_rng"), "0 400\n10 600\n");
    write(&p.norm_path.join(PST).join("AVN/lat_ang"), "0 -75\n10 -76\n");
    write(&p.ztim_path(PST), "0 0\n5 0\n10 0\n20 0\n");
    (tmp_dir, p)
}

fn reader(p: &Params) -> TextReader {
    TextReader {
        norm: p.norm_path.clone(),
        pik: p.pik_path.clone(),
    }
}

#[test]
fn test_listings_follow_the_hierarchy() {
    let (_tmp, p) = season();
    assert_eq!(p.root_path, _tmp.path().join("WAIS"));

    let (products, piks) = pik(&p, PST, None).unwrap();
    assert_eq!(products, vec!["MagHiResInco1", "MagHiResInco1"]);
    assert_eq!(piks, vec!["bed", "srf"]);

    assert_eq!(cmp(&p, PST, None, MetaFilter::default()).unwrap(), vec!["MagHiResInco1"]);
    assert_eq!(cmp(&p, PST, Some("pik2"), MetaFilter::Suffix).unwrap(), Vec::<String>::new());
}

#[test]
fn test_table_lookups() {
    let (_tmp, p) = season();
    assert_eq!(pst(&p, "*").unwrap(), vec!["MIS/JKB2e/Y35a", "MIS/JKB2e/Y36a"]);
    assert_eq!(pst(&p, "MIS/*/Y36?").unwrap(), vec!["MIS/JKB2e/Y36a"]);
    assert_eq!(flight(&p, "DRP/JKB2f/X01a").unwrap(), "F07");
    assert!(matches!(flight(&p, "nope"), Err(Error::PstNotFound { .. })));
}

#[test]
fn test_channels_on_reference_times() {
    let (_tmp, p) = season();
    let r = reader(&p);
    assert_eq!(surface_range(&p, &r, PST).unwrap(), vec![400.0, 500.0, 600.0, 600.0]);
    let lat = latitude(&p, &r, PST).unwrap();
    assert_abs_diff_eq!(lat[1], -75.5);
    assert_abs_diff_eq!(lat[3], -76.0);
}

#[test]
fn test_signal_from_disk() {
    let (_tmp, p) = season();
    let r = reader(&p);

    let out = signal(&p, &r, &FlatSurfaceLoss, PST, "MagHiResInco1.srf", &SignalOptions::default())
        .unwrap();
    assert_eq!(out.len(), 4);
    // 20 log10(2 h) added back
    assert_abs_diff_eq!(out[0], 1.0 + 20.0 * 800f64.log10(), epsilon = 1e-9);
    assert_abs_diff_eq!(out[1], 2.0 + 20.0 * 1000f64.log10(), epsilon = 1e-9);
    assert!(out[2].is_nan() && out[3].is_nan());
}

#[test]
fn test_missing_reader_data_propagates() {
    let (_tmp, p) = season();
    let r = reader(&p);
    assert!(matches!(
        signal(&p, &r, &FlatSurfaceLoss, "MIS/JKB2e/Y36a", "x", &SignalOptions::default()),
        Err(Error::Reader(_))
    ));
}
