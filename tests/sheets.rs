use italic_sheets::{
    read_paper_table, render_svg, Batch, BatchConfig, Document, EmbeddedImage, GuideKind,
    Grouping, HandProportions, ImageSpec, Info, Mm, PageSpec, Resolution, Sheet, SheetError,
    SheetStyle,
};

fn hand(slant: f64) -> italic_sheets::HandProfile {
    HandProportions::default()
        .slant_angle(slant)
        .with_nib_width(Mm(2.0))
        .unwrap()
}

fn canvas(width: f64, height: f64) -> ImageSpec {
    ImageSpec::new(Mm(width), Mm(height), Resolution::default()).unwrap()
}

#[test]
fn upright_hand_on_a_small_canvas() {
    let sheet = Sheet::new(hand(90.0), canvas(50.0, 50.0), SheetStyle::default()).unwrap();

    let kinds: Vec<GuideKind> = sheet.guides().iter().map(|g| g.kind).collect();
    assert_eq!(
        kinds,
        vec![
            GuideKind::Ascender,
            GuideKind::CapHeight,
            GuideKind::Waistline,
            GuideKind::Baseline,
            GuideKind::Descender,
        ]
    );
    assert_eq!(sheet.hand().unwrap().rhythm_unit(), Mm(30.0));
    assert!(sheet.slants().is_empty());

    let svg = render_svg(&sheet, &Info::new()).unwrap();
    let tree = usvg::Tree::from_data(&svg, &usvg::Options::default()).unwrap();
    assert_eq!(tree.size().width(), 1500.0);
    assert_eq!(tree.size().height(), 1500.0);
}

#[test]
fn shallow_slant_is_clipped_to_the_canvas() {
    let sheet = Sheet::new(hand(10.0), canvas(50.0, 50.0), SheetStyle::default()).unwrap();
    assert!(!sheet.slants().is_empty());
    assert_eq!(sheet.slant_spacing(), Mm(6.0));

    let expected = 50.0 / 10f64.to_radians().tan();
    for segment in sheet.slants() {
        assert!((*segment.horizontal_displacement() - expected).abs() < 1e-6);
        assert!((*segment.horizontal_displacement() - 283.564).abs() < 1e-3);
        for point in [segment.start, segment.end] {
            assert!(*point.x >= 0.0 && *point.x <= 50.0);
            assert!(*point.y >= 0.0 && *point.y <= 50.0);
        }
    }
    let anchors: Vec<f64> = sheet.slants().iter().map(|s| *s.anchor).collect();
    assert!(anchors.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn drawings_are_placed_inside_the_margins() {
    let a4 = PageSpec::new(Mm(210.0), Mm(297.0), Mm(5.0), "a4").unwrap();

    let exact = Sheet::new(hand(90.0), canvas(200.0, 287.0), SheetStyle::default()).unwrap();
    let smaller = Sheet::new(hand(90.0), canvas(190.0, 280.0), SheetStyle::default()).unwrap();

    let mut doc = Document::default();
    doc.add_image_page(a4.clone(), EmbeddedImage::from_sheet(&exact, &Info::new()).unwrap());
    doc.add_image_page(a4, EmbeddedImage::from_sheet(&smaller, &Info::new()).unwrap());

    let on_paper: Vec<(f64, f64)> = doc
        .pages
        .iter()
        .map(|p| {
            let r = p.position_on_paper();
            (*r.x1, *r.y1)
        })
        .collect();
    assert_eq!(on_paper, vec![(5.0, 5.0), (10.0, 8.5)]);

    let odt = String::from_utf8(doc.render().unwrap()).unwrap();
    assert!(odt.contains(r#"svg:x="0mm" svg:y="0mm" svg:width="200mm" svg:height="287mm""#));
    assert!(odt.contains(r#"svg:x="5mm" svg:y="3.5mm" svg:width="190mm" svg:height="280mm""#));
}

#[test]
fn invalid_parameters_are_rejected_before_layout() {
    let zero_nib = HandProportions::default().with_nib_width(Mm(0.0));
    assert!(matches!(zero_nib, Err(SheetError::InvalidParameter(_))));

    let steep = HandProportions::default()
        .slant_angle(95.0)
        .with_nib_width(Mm(2.0));
    match steep {
        Err(SheetError::InvalidParameter(err)) => assert_eq!(err.value, 95.0),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn composed_drawings_keep_their_declared_size() {
    let sheet = Sheet::new(hand(80.0), canvas(200.0, 287.0), SheetStyle::default()).unwrap();
    let svg = render_svg(&sheet, &Info::new()).unwrap();

    let image = EmbeddedImage::new_svg(svg, Resolution::default()).unwrap();
    assert!((*image.width - 200.0).abs() < 1e-3);
    assert!((*image.height - 287.0).abs() < 1e-3);
}

#[test]
fn batch_writes_every_artifact() {
    let table = "210\t297\t5\ta4\n215.9\t279.4\t6.35\tletter\n";
    let pages = read_paper_table(table.as_bytes()).unwrap();
    let config = BatchConfig {
        grouping: Grouping::PerPageSpec,
        dedication_author: Some("A. Scribe".to_string()),
        ..Default::default()
    };
    let output = Batch::new(config, vec![Mm(2.0), Mm(3.0)], pages)
        .unwrap()
        .run()
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let written = output.write_to_dir(dir.path()).unwrap();
    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "italic-sheet-2mm.a4.svg",
            "italic-sheet-3mm.a4.svg",
            "italic-sheet-2mm.letter.svg",
            "italic-sheet-3mm.letter.svg",
            "italic-sheets.a4.fodt",
            "italic-sheets.letter.fodt",
        ]
    );

    let drawing = std::fs::read(dir.path().join("italic-sheet-2mm.a4.svg")).unwrap();
    let tree = usvg::Tree::from_data(&drawing, &usvg::Options::default()).unwrap();
    assert_eq!(tree.size().width(), 6000.0);
    assert_eq!(tree.size().height(), 8610.0);

    let odt = std::fs::read_to_string(dir.path().join("italic-sheets.letter.fodt")).unwrap();
    assert!(odt.starts_with("<?xml"));
    assert_eq!(odt.matches("<draw:frame ").count(), 2);
    assert_eq!(odt.matches("<style:page-layout ").count(), 1);
    assert!(odt.contains(r#"fo:page-width="215.9mm" fo:page-height="279.4mm""#));
    assert!(odt.contains("A. Scribe has waived all copyright"));
    assert!(odt.trim_end().ends_with("</office:document>"));
}
