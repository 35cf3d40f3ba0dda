// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Full run through poppler's `pdftoppm` on a generated PDF.
//!
//! Needs `pdftoppm` on `PATH`; run with `cargo test -- --ignored`.

use floorplan_area::{
    AreaCalculator, CalculationOutcome, MeasuredExtent, PdftoppmRasterizer, Rasterizer, ShapeType,
};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::path::Path;
use std::process::Command;

fn require_pdftoppm() {
    assert!(
        Command::new("pdftoppm").arg("-v").output().is_ok(),
        "pdftoppm is not installed"
    );
}

/// Single 4x4 inch page with a filled black square of `side` points at
/// (`origin`, `origin`)
fn write_square_pdf(path: &Path, origin: i64, side: i64) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let content = Content {
        operations: vec![
            Operation::new("rg", vec![0.into(), 0.into(), 0.into()]),
            Operation::new(
                "re",
                vec![origin.into(), origin.into(), side.into(), side.into()],
            ),
            Operation::new("f", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "MediaBox" => vec![0.into(), 0.into(), 288.into(), 288.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

#[test]
#[ignore = "needs poppler's pdftoppm"]
fn test_rendered_page_size() {
    require_pdftoppm();

    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("square.pdf");
    write_square_pdf(&pdf, 108, 72);

    let page = PdftoppmRasterizer::default()
        .rasterize_first_page(&pdf, 150)
        .unwrap();

    // 4 in at 150 dpi
    assert_eq!(page.dimensions(), (600, 600));
}

#[test]
#[ignore = "needs poppler's pdftoppm"]
fn test_square_pdf_end_to_end() {
    require_pdftoppm();

    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("square.pdf");
    // One inch square: 300 px at 300 dpi, 2.54 m at 1:100
    write_square_pdf(&pdf, 108, 72);

    let first = AreaCalculator::new(&pdf, "1:100", false).calculate();
    let second = AreaCalculator::new(&pdf, "1:100", false).calculate();
    assert_eq!(
        first.to_json_pretty().unwrap(),
        second.to_json_pretty().unwrap()
    );

    let report = match first {
        CalculationOutcome::Success(report) => report,
        CalculationOutcome::Failure(failure) => panic!("expected success, got {:?}", failure),
    };

    assert_eq!(report.shape_type, ShapeType::Rectangle);
    assert!(report.is_simple_rectangle);

    let MeasuredExtent::Rectangle {
        width_pixels,
        height_pixels,
        width_m,
        height_m,
    } = report.sections[0].extent
    else {
        panic!("expected rectangle section");
    };
    assert!((300..=310).contains(&width_pixels), "width {}", width_pixels);
    assert!((300..=310).contains(&height_pixels), "height {}", height_pixels);

    let expected = (width_pixels as f64 * 0.254 / 30.0) * (height_pixels as f64 * 0.254 / 30.0);
    assert!((report.total_area_m2 - expected).abs() <= 0.01);
    assert!((report.total_area_m2 - width_m * height_m).abs() < 1e-9);
}
