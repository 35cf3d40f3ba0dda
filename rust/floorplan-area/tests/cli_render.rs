// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Successful runs of the `floorplan-area` binary.
//!
//! `FLOORPLAN_AREA_PDFTOPPM` points at a shell script standing in for poppler
//! that prints a prepared PNG on stdout, so no PDF renderer is needed. Kept in
//! its own test binary so no other test forks while the script is written.

#![cfg(unix)]
#![allow(deprecated)] // cargo_bin deprecation, replacement not yet stable

use assert_cmd::Command;
use image::{Rgb, RgbImage};
use serde_json::Value;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Writes a 700x700 white page with a 300x300 black square and a renderer
/// script that cats it, returning the script path
fn fake_renderer(dir: &Path) -> PathBuf {
    let mut page = RgbImage::from_pixel(700, 700, Rgb([255, 255, 255]));
    for y in 200..500 {
        for x in 200..500 {
            page.put_pixel(x, y, Rgb([0, 0, 0]));
        }
    }
    let png = dir.join("page.png");
    page.save(&png).unwrap();

    let script = dir.join("fake-pdftoppm");
    std::fs::write(&script, format!("#!/bin/sh\nexec cat '{}'\n", png.display())).unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    script
}

fn floorplan_area(workdir: &Path, renderer: &Path) -> Command {
    let mut cmd = Command::cargo_bin("floorplan-area").expect("binary should be built");
    cmd.current_dir(workdir)
        .env_remove("RUST_LOG")
        .env_remove("FLOORPLAN_AREA_DPI")
        .env_remove("FLOORPLAN_AREA_DEBUG_PATH")
        .env_remove("FLOORPLAN_AREA_RASTERIZER")
        .env("FLOORPLAN_AREA_PDFTOPPM", renderer);
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    let stdout = String::from_utf8(output.stdout.clone()).expect("stdout is UTF-8");
    serde_json::from_str(&stdout).expect("stdout is a single JSON document")
}

#[test]
fn rectangle_plan_succeeds_with_and_without_debug() {
    let tools = tempfile::tempdir().unwrap();
    let renderer = fake_renderer(tools.path());

    let workdir = tempfile::tempdir().unwrap();
    std::fs::write(workdir.path().join("plan.pdf"), b"%PDF-1.4\n").unwrap();

    // Plain run: no overlay written, no debug_image key
    let output = floorplan_area(workdir.path(), &renderer)
        .arg("plan.pdf")
        .output()
        .unwrap();

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json = stdout_json(&output);
    assert_eq!(json["success"], true);
    assert_eq!(json["shape_type"], "rectangle");
    assert_eq!(json["is_simple_rectangle"], true);
    assert_eq!(json["scale_used"], "1:100");
    assert_eq!(json["method"], "computer_vision");
    assert_eq!(json["confidence"], 0.85);
    assert!(json.get("debug_image").is_none());
    assert!(!workdir.path().join("debug_outline.png").exists());

    // About 305 px square at 300 dpi and 1:100
    let total = json["total_area_m2"].as_f64().unwrap();
    assert!((total - 6.45).abs() < 0.5, "total {}", total);

    // Debug run at 1:50 writes the overlay into the working directory
    let output = floorplan_area(workdir.path(), &renderer)
        .args(["plan.pdf", "--scale", "1:50", "--debug"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let json = stdout_json(&output);
    assert_eq!(json["success"], true);
    assert_eq!(json["shape_type"], "rectangle");
    assert_eq!(json["scale_used"], "1:50");
    assert_eq!(json["debug_image"], "debug_outline.png");

    let overlay = image::open(workdir.path().join("debug_outline.png"))
        .unwrap()
        .to_rgb8();
    assert_eq!(overlay.dimensions(), (700, 700));
    assert!(overlay.pixels().any(|p| *p == Rgb([0, 255, 0])));

    // Halving the scale quarters the area
    let debug_total = json["total_area_m2"].as_f64().unwrap();
    assert!((debug_total - total / 4.0).abs() <= 0.01, "{} vs {}", debug_total, total);
}
