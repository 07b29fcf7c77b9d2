//! Subprocess tests for `skycut filter` against a local sky-map directory.

use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_skycut"))
}

fn tmp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    let mut p = std::env::temp_dir();
    p.push(format!("skycut_cli_{}_{}_{}", std::process::id(), nanos, name));
    p
}

fn run(args: &[&str]) -> Output {
    Command::new(bin_path())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run {:?} {:?}: {}", bin_path(), args, e))
}

/// Minimal single-column BINTABLE FITS file holding a full-sky map.
fn sky_map_fits(nside: u32, prob: &[f64]) -> Vec<u8> {
    const BLOCK: usize = 2880;
    fn push_card(out: &mut Vec<u8>, text: &str) {
        let mut c = [b' '; 80];
        c[..text.len()].copy_from_slice(text.as_bytes());
        out.extend_from_slice(&c);
    }
    fn pad(out: &mut Vec<u8>, fill: u8) {
        out.resize(out.len().div_ceil(BLOCK) * BLOCK, fill);
    }

    let mut f = Vec::new();
    push_card(&mut f, "SIMPLE  =                    T");
    push_card(&mut f, "BITPIX  =                    8");
    push_card(&mut f, "NAXIS   =                    0");
    push_card(&mut f, "END");
    pad(&mut f, b' ');

    push_card(&mut f, "XTENSION= 'BINTABLE'");
    push_card(&mut f, "BITPIX  =                    8");
    push_card(&mut f, "NAXIS   =                    2");
    push_card(&mut f, "NAXIS1  =                    8");
    push_card(&mut f, &format!("NAXIS2  = {:>20}", prob.len()));
    push_card(&mut f, "PCOUNT  =                    0");
    push_card(&mut f, "GCOUNT  =                    1");
    push_card(&mut f, "TFIELDS =                    1");
    push_card(&mut f, "TTYPE1  = 'PROB    '");
    push_card(&mut f, "TFORM1  = 'D       '");
    push_card(&mut f, "PIXTYPE = 'HEALPIX '");
    push_card(&mut f, "ORDERING= 'RING    '");
    push_card(&mut f, &format!("NSIDE   = {nside:>20}"));
    push_card(&mut f, "INDXSCHM= 'IMPLICIT'");
    push_card(&mut f, "END");
    pad(&mut f, b' ');

    for p in prob {
        f.extend_from_slice(&p.to_be_bytes());
    }
    pad(&mut f, 0);
    f
}

/// nside-64 map with all mass in one pixel: area well under any limit.
fn localized_map_bytes() -> Vec<u8> {
    let mut prob = vec![0.0; 49152];
    prob[100] = 1.0;
    sky_map_fits(64, &prob)
}

/// Uniform nside-8 map: the 90% region is most of the sky.
fn spread_map_bytes() -> Vec<u8> {
    sky_map_fits(8, &vec![1.0 / 768.0; 768])
}

#[test]
fn filter_batch_with_local_maps() {
    let dir = tmp_dir("filter_batch");
    let maps = dir.join("maps");
    std::fs::create_dir_all(&maps).unwrap();
    std::fs::write(maps.join("S240101a.fits"), localized_map_bytes()).unwrap();
    std::fs::write(maps.join("S240102b.fits"), spread_map_bytes()).unwrap();

    let input = dir.join("ids.txt");
    std::fs::write(&input, "# morning batch\nS240101a\n\n  S240102b\nMS240103x\nS240104d\n")
        .unwrap();
    let output = dir.join("kept.txt");
    let report = dir.join("report.json");

    let out = run(&[
        "filter",
        "--input",
        input.to_string_lossy().as_ref(),
        "--output",
        output.to_string_lossy().as_ref(),
        "--skymap-dir",
        maps.to_string_lossy().as_ref(),
        "--report",
        report.to_string_lossy().as_ref(),
    ]);
    assert!(
        out.status.success(),
        "filter should succeed, stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );

    // Only the well-localized event survives.
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "S240101a\n");

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("4 checked: 1 kept, 1 rejected, 2 skipped"), "stdout={stdout}");

    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(v["area_limit"], 300.0);
    assert_eq!(v["source"], "local directory");
    let events = v["events"].as_array().unwrap();
    assert_eq!(events.len(), 4);
    assert_eq!(events[0]["event_id"], "S240101a");
    assert_eq!(events[0]["status"], "kept");
    assert!(events[0]["area_deg2"].as_f64().unwrap() < 1.0);
    assert_eq!(events[1]["status"], "rejected");
    assert!(events[1]["area_deg2"].as_f64().unwrap() > 30_000.0);
    assert_eq!(events[2]["event_id"], "MS240103x");
    assert_eq!(events[2]["status"], "skipped_mock");
    assert_eq!(events[3]["status"], "skipped_error");
    assert!(events[3]["reason"].as_str().unwrap().contains("not found"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn filter_reads_gzipped_maps() {
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    let dir = tmp_dir("filter_gz");
    let maps = dir.join("maps");
    std::fs::create_dir_all(&maps).unwrap();
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&localized_map_bytes()).unwrap();
    std::fs::write(maps.join("S240105e.fits.gz"), encoder.finish().unwrap()).unwrap();

    let input = dir.join("ids.txt");
    std::fs::write(&input, "S240105e\n").unwrap();
    let output = dir.join("kept.txt");

    let out = run(&[
        "filter",
        "--input",
        input.to_string_lossy().as_ref(),
        "--output",
        output.to_string_lossy().as_ref(),
        "--skymap-dir",
        maps.to_string_lossy().as_ref(),
    ]);
    assert!(
        out.status.success(),
        "filter should succeed, stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "S240105e\n");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn tight_area_limit_rejects_everything() {
    let dir = tmp_dir("filter_limit");
    let maps = dir.join("maps");
    std::fs::create_dir_all(&maps).unwrap();
    std::fs::write(maps.join("S240106f.fits"), localized_map_bytes()).unwrap();

    let input = dir.join("ids.txt");
    std::fs::write(&input, "S240106f\n").unwrap();
    let output = dir.join("kept.txt");

    // One nside-64 pixel is ~0.84 deg^2; a 0.5 deg^2 limit rejects it.
    let out = run(&[
        "filter",
        "--input",
        input.to_string_lossy().as_ref(),
        "--output",
        output.to_string_lossy().as_ref(),
        "--skymap-dir",
        maps.to_string_lossy().as_ref(),
        "--area-limit",
        "0.5",
    ]);
    assert!(out.status.success());
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("1 checked: 0 kept, 1 rejected, 0 skipped"), "stdout={stdout}");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn invalid_mass_fraction_is_fatal() {
    let dir = tmp_dir("filter_badfrac");
    std::fs::create_dir_all(&dir).unwrap();
    let input = dir.join("ids.txt");
    std::fs::write(&input, "S240107g\n").unwrap();

    let out = run(&[
        "filter",
        "--input",
        input.to_string_lossy().as_ref(),
        "--output",
        dir.join("kept.txt").to_string_lossy().as_ref(),
        "--skymap-dir",
        dir.to_string_lossy().as_ref(),
        "--mass-fraction",
        "1.5",
    ]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("mass fraction"), "stderr={stderr}");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_id_list_is_fatal() {
    let dir = tmp_dir("filter_noinput");
    std::fs::create_dir_all(&dir).unwrap();

    let out = run(&[
        "filter",
        "--input",
        "/no/such/ids.txt",
        "--output",
        dir.join("kept.txt").to_string_lossy().as_ref(),
        "--skymap-dir",
        dir.to_string_lossy().as_ref(),
    ]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("reading ID list"), "stderr={stderr}");

    let _ = std::fs::remove_dir_all(&dir);
}
