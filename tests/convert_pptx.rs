//! End-to-end conversion of synthetic presentations.

mod common;

use common::{build_pptx, png_bytes, SlideSpec, CANVAS_HEIGHT, CANVAS_WIDTH};
use pptx2html::{convert_bytes, convert_file, ConvertOptions, Error, ShapeKind};
use std::fs;
use tempfile::TempDir;

const FULL_CANVAS: (i64, i64, i64, i64) = (0, 0, CANVAS_WIDTH, CANVAS_HEIGHT);

fn hello_slide() -> SlideSpec {
    SlideSpec::new().text_box(
        "Title 1",
        FULL_CANVAS,
        "",
        &[("", &[(r#"<a:rPr lang="en-US" b="1"/>"#, "Hello")])],
    )
}

#[test]
fn test_title_slide_scenario() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("deck.html");
    let data = build_pptx(&[hello_slide()], None);

    let report = convert_bytes(data, &output, &ConvertOptions::default()).unwrap();
    let html = fs::read_to_string(&output).unwrap();

    assert!(html.contains(
        "<div class='absolute flex flex-col items-start justify-start' style='left:0.00%;top:0.00%;width:100.00%;height:100.00%;background-color: transparent;'>"
    ));
    assert!(html.contains("<h1 class='title' style=''><span style='font-weight: bold;'>Hello</span></h1>"));
    assert_eq!(report.slides_total, 1);
    assert_eq!(report.slides_rendered, 1);
    assert!(report.is_clean());
}

#[test]
fn test_picture_on_third_slide() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out/deck.html");
    let slides = vec![
        hello_slide(),
        SlideSpec::new().connector(),
        SlideSpec::new().picture("Picture 1", (914_400, 685_800, 4_572_000, 3_429_000), "image1.png", png_bytes(8, 6)),
    ];

    let report = convert_file_from(&dir, "three.pptx", &build_pptx(&slides, None), &output);

    let image_path = dir.path().join("out/images/slide_3_image_1.png");
    assert!(image_path.exists());
    let decoded = image::open(&image_path).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (8, 6));

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains(
        "<img src='images/slide_3_image_1.png' class='absolute object-contain' style='left:10.00%;top:10.00%;width:50.00%;height:50.00%;'/>"
    ));
    assert_eq!(report.images_written, 1);
    assert_eq!(report.slides_total, 3);
}

#[test]
fn test_image_decode_failure_is_reported() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("deck.html");
    let slide = hello_slide().picture(
        "Broken",
        (0, 0, 100, 100),
        "broken.png",
        b"this is not a png".to_vec(),
    );

    let report = convert_bytes(build_pptx(&[slide], None), &output, &ConvertOptions::default()).unwrap();
    let html = fs::read_to_string(&output).unwrap();

    assert!(html.contains("[Image processing failed for slide 1, shape 2]"));
    assert!(html.contains("Hello"));
    assert_eq!(report.shape_failures.len(), 1);
    assert_eq!(report.shape_failures[0].slide_index, 0);
    assert_eq!(report.shape_failures[0].shape_index, 1);
    assert_eq!(report.slides_rendered, 1);
    assert!(!dir.path().join("images/slide_1_image_2.png").exists());
}

#[test]
fn test_ignore_images_keeps_references() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("deck.html");
    let slide = SlideSpec::new().picture("Picture 1", FULL_CANVAS, "image1.png", png_bytes(2, 2));
    let options = ConvertOptions::new().with_materialize_images(false);

    let report = convert_bytes(build_pptx(&[slide], None), &output, &options).unwrap();
    let html = fs::read_to_string(&output).unwrap();

    assert!(html.contains("<img src='images/slide_1_image_1.png'"));
    assert!(!dir.path().join("images").exists());
    assert_eq!(report.images_written, 0);
    assert!(report.shape_failures.is_empty());
}

#[test]
fn test_fills_and_run_styles() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("deck.html");
    let slide = SlideSpec::new()
        .text_box(
            "Filled",
            FULL_CANVAS,
            r#"<a:solidFill><a:srgbClr val="FF8800"/></a:solidFill>"#,
            &[(
                r#"lvl="1" algn="r""#,
                &[(
                    r#"<a:rPr i="1" sz="1800"><a:solidFill><a:srgbClr val="1F497D"/></a:solidFill><a:latin typeface="Georgia"/></a:rPr>"#,
                    "Styled",
                )],
            )],
        )
        .text_box("Clear", FULL_CANVAS, "<a:noFill/>", &[("", &[("", "Plain")])]);

    convert_bytes(build_pptx(&[slide], None), &output, &ConvertOptions::default()).unwrap();
    let html = fs::read_to_string(&output).unwrap();

    assert!(html.contains("background-color: #ff8800;"));
    assert!(html.contains("background-color: transparent;"));
    assert!(html.contains(
        "<p class='paragraph' style='text-align: right;'><span style='font-family: Georgia;font-size: 18pt;font-style: italic;color: #1f497d;'>Styled</span></p>"
    ));
    assert!(html.contains("<h1 class='title' style=''><span style=''>Plain</span></h1>"));
}

#[test]
fn test_hyperlink_target_preserved() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("deck.html");
    let slide = SlideSpec::new()
        .hyperlink("rIdLink", "https://example.com/path/Page%20One?x=1#top")
        .hyperlink("rIdQuery", "https://x/?a=1&b=2")
        .text_box(
            "Link",
            FULL_CANVAS,
            "",
            &[(
                "",
                &[
                    (r#"<a:rPr><a:hlinkClick r:id="rIdLink"/></a:rPr>"#, "docs"),
                    (r#"<a:rPr><a:hlinkClick r:id="rIdQuery"/></a:rPr>"#, "query"),
                ],
            )],
        );

    convert_bytes(build_pptx(&[slide], None), &output, &ConvertOptions::default()).unwrap();
    let html = fs::read_to_string(&output).unwrap();

    assert!(html.contains("<a href='https://example.com/path/Page%20One?x=1#top' style=''>docs</a>"));
    assert!(html.contains("<a href='https://x/?a=1&amp;b=2' style=''>query</a>"));
}

#[test]
fn test_filled_shape_without_text() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("deck.html");
    let slide = SlideSpec::new().rectangle(
        "Rectangle 1",
        (914_400, 685_800, 4_572_000, 3_429_000),
        r#"<a:solidFill><a:srgbClr val="336699"/></a:solidFill>"#,
    );

    let report = convert_bytes(build_pptx(&[slide], None), &output, &ConvertOptions::default()).unwrap();
    let html = fs::read_to_string(&output).unwrap();

    assert!(html.contains(
        "<div class='absolute flex flex-col items-start justify-start' style='left:10.00%;top:10.00%;width:50.00%;height:50.00%;background-color: #336699;'></div>"
    ));
    assert_eq!(report.shapes_rendered, 1);
    assert!(report.is_clean());
}

#[test]
fn test_malformed_formatting_degrades_one_shape() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("deck.html");
    let slide = SlideSpec::new()
        .text_box("Bad", FULL_CANVAS, "", &[("", &[(r#"<a:rPr sz="huge"/>"#, "Lost")])])
        .text_box("Good", FULL_CANVAS, "", &[("", &[("", "Kept")])]);

    let report = convert_bytes(build_pptx(&[slide], None), &output, &ConvertOptions::default()).unwrap();
    let html = fs::read_to_string(&output).unwrap();

    assert!(!html.contains("Lost"));
    assert!(html.contains("Kept"));
    assert_eq!(report.extraction_warnings, 1);
    assert_eq!(report.shapes_rendered, 2);
}

#[test]
fn test_slides_keep_document_order() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("deck.html");
    let slides: Vec<SlideSpec> = (0..12)
        .map(|i| {
            SlideSpec::new().text_box(
                "Body",
                FULL_CANVAS,
                "",
                &[("", &[("", format!("marker-{:02}", i).as_str())])],
            )
        })
        .collect();
    let options = ConvertOptions::new().with_workers(4);

    let report = convert_bytes(build_pptx(&slides, None), &output, &options).unwrap();
    let html = fs::read_to_string(&output).unwrap();

    let positions: Vec<usize> = (0..12)
        .map(|i| html.find(&format!("marker-{:02}", i)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(report.slides_rendered, 12);
}

#[test]
fn test_page_title() {
    let dir = TempDir::new().unwrap();

    let output = dir.path().join("core.html");
    convert_bytes(build_pptx(&[hello_slide()], Some("Quarterly Review")), &output, &ConvertOptions::default()).unwrap();
    assert!(fs::read_to_string(&output).unwrap().contains("<title>Quarterly Review</title>"));

    let output = dir.path().join("stem.html");
    convert_file_from(&dir, "board-meeting.pptx", &build_pptx(&[hello_slide()], None), &output);
    assert!(fs::read_to_string(&output).unwrap().contains("<title>board-meeting</title>"));
}

#[test]
fn test_non_presentation_is_rejected() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("deck.html");

    let err = convert_bytes(b"not a zip file".to_vec(), &output, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, Error::UnknownFormat));
    assert!(!output.exists());

    let missing = convert_file(dir.path().join("missing.pptx"), &output, &ConvertOptions::default());
    assert!(matches!(missing, Err(Error::Io(_))));
    assert!(!output.exists());
}

#[test]
fn test_extracted_records() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("deck.pptx");
    let slide = hello_slide()
        .picture("Picture 1", FULL_CANVAS, "image1.png", png_bytes(2, 2))
        .connector()
        .rectangle("Rectangle 4", FULL_CANVAS, r#"<a:solidFill><a:srgbClr val="336699"/></a:solidFill>"#);
    fs::write(&input, build_pptx(&[slide], None)).unwrap();

    let extraction = pptx2html::extract_file(&input).unwrap();
    let kinds: Vec<ShapeKind> = extraction.slides[0].iter().map(|s| s.kind()).collect();
    assert_eq!(
        kinds,
        vec![ShapeKind::TextFrame, ShapeKind::Picture, ShapeKind::Other, ShapeKind::TextFrame]
    );
    assert!(extraction.slides[0][3].paragraphs().unwrap().is_empty());

    let image = extraction.slides[0][1].image().unwrap();
    assert_eq!(image.format, "png");
    assert!(!image.bytes.is_empty());
}

fn convert_file_from(
    dir: &TempDir,
    name: &str,
    data: &[u8],
    output: &std::path::Path,
) -> pptx2html::ConversionReport {
    let input = dir.path().join(name);
    fs::write(&input, data).unwrap();
    convert_file(&input, output, &ConvertOptions::default()).unwrap()
}
