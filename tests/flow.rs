mod common;

use lab_record_pdf::{
    Block, BottomPinSpacer, Error, Flowable, INCH, PIN_SAFETY_MARGIN, PageGeometry, PageLayout,
    Placement, PlacementKind, StyleSheet, paginate,
};

fn result_group(styles: &StyleSheet) -> Vec<Block<'_>> {
    vec![
        Block::paragraph(&styles.heading, "RESULT :"),
        Block::paragraph(&styles.body, "Program executed successfully"),
    ]
}

fn placements(pages: &[PageLayout]) -> Vec<&Placement> {
    pages.iter().flat_map(|p| p.placements.iter()).collect()
}

fn find<'a>(pages: &'a [PageLayout], text: &str) -> Vec<&'a Placement> {
    placements(pages)
        .into_iter()
        .filter(|p| p.text == text)
        .collect()
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.05
}

#[test]
fn frame_matches_a4_margins() {
    let g = PageGeometry::a4();
    assert!(approx(g.frame_bottom(), 63.6));
    assert!(approx(g.frame_top(), 778.29));
    assert!(approx(g.frame_height(), 714.69));
    assert!(approx(g.frame_width(), 496.88));
    assert!(approx(g.frame_x(), 49.2));
}

#[test]
fn pin_spacer_takes_the_slack_when_group_fits() {
    let styles = StyleSheet::new();
    let group = result_group(&styles);
    let spacer = BottomPinSpacer::new(&group);
    let width = PageGeometry::a4().frame_width();

    // heading 18 + gap 12 + body 22 + margin
    let required = spacer.required_height(width, 500.0);
    assert!(approx(required, 52.0 + PIN_SAFETY_MARGIN));
    assert!(approx(required, 55.6));

    for avail in [56.0, 100.0, 714.69] {
        assert!(approx(spacer.wrap(width, avail), avail - required), "{avail}");
    }
}

#[test]
fn pin_spacer_overflows_when_group_does_not_fit() {
    let styles = StyleSheet::new();
    let group = result_group(&styles);
    let spacer = BottomPinSpacer::new(&group);
    let width = PageGeometry::a4().frame_width();

    for avail in [0.0, 20.0, 55.0] {
        assert!(spacer.wrap(width, avail) > avail, "{avail}");
    }
}

#[test]
fn pinned_group_ends_at_bottom_margin() {
    common::init_logger();
    let styles = StyleSheet::new();
    let geometry = PageGeometry::a4();
    let blocks = vec![Block::Spacer(9.0 * INCH), Block::PinToBottom(result_group(&styles))];

    let pages = paginate(&blocks, &geometry).unwrap();
    assert_eq!(pages.len(), 1);

    let body = find(&pages, "Program executed successfully");
    assert_eq!(body.len(), 1);
    assert_eq!(body[0].page, 0);
    assert!(approx(body[0].bottom, geometry.frame_bottom() + PIN_SAFETY_MARGIN));
    assert!(approx(body[0].bottom, 67.2));

    let heading = find(&pages, "RESULT :");
    assert!(approx(heading[0].bottom - 12.0, body[0].top));
}

#[test]
fn pinned_group_without_room_moves_to_bottom_of_next_page() {
    common::init_logger();
    let styles = StyleSheet::new();
    let geometry = PageGeometry::a4();
    let blocks = vec![Block::Spacer(680.0), Block::PinToBottom(result_group(&styles))];

    let pages = paginate(&blocks, &geometry).unwrap();
    assert_eq!(pages.len(), 2);

    let body = find(&pages, "Program executed successfully");
    assert_eq!(body.len(), 1);
    assert_eq!(body[0].page, 1);
    assert!(approx(body[0].bottom, 67.2));
    assert!(pages[1].placements.iter().any(|p| p.kind == PlacementKind::PinSpacer));
}

#[test]
fn pinned_group_after_content_follows_it_on_same_page() {
    let styles = StyleSheet::new();
    let geometry = PageGeometry::a4();
    let blocks = vec![
        Block::paragraph(&styles.heading, "AIM :"),
        Block::paragraph(&styles.body, "short aim"),
        Block::PinToBottom(result_group(&styles)),
    ];

    let pages = paginate(&blocks, &geometry).unwrap();
    assert_eq!(pages.len(), 1);
    let aim = find(&pages, "short aim")[0];
    let result = find(&pages, "Program executed successfully")[0];
    assert!(result.top < aim.bottom);
    assert!(approx(result.bottom, 67.2));
}

#[test]
fn group_too_tall_for_a_page_is_placed_unpinned() {
    common::init_logger();
    let styles = StyleSheet::new();
    let geometry = PageGeometry::a4();
    let blocks = vec![Block::PinToBottom(vec![
        Block::paragraph(&styles.heading, "RESULT :"),
        Block::paragraph(&styles.body, &common::numbered_lines("line", 40)),
    ])];

    let pages = paginate(&blocks, &geometry).unwrap();
    assert_eq!(pages.len(), 2);
    let heading = find(&pages, "RESULT :")[0];
    assert_eq!(heading.page, 0);
    assert!(approx(heading.top, geometry.frame_top()));
}

#[test]
fn keep_together_moves_whole_group() {
    let styles = StyleSheet::new();
    let geometry = PageGeometry::a4();
    let program = common::numbered_lines("stmt", 5);
    let blocks = vec![
        Block::Spacer(600.0),
        Block::KeepTogether(vec![
            Block::paragraph(&styles.heading, "PROGRAM :"),
            Block::paragraph(&styles.body, &program),
        ]),
    ];

    let pages = paginate(&blocks, &geometry).unwrap();
    assert_eq!(pages.len(), 2);
    assert!(pages[0].placements.iter().all(|p| p.kind == PlacementKind::Spacer));

    let heading = find(&pages, "PROGRAM :")[0];
    assert_eq!(heading.page, 1);
    assert!(approx(heading.top, geometry.frame_top()));
    let body = find(&pages, &program);
    assert_eq!(body.len(), 1);
    assert_eq!(body[0].page, 1);
}

#[test]
fn loose_blocks_split_at_line_boundaries() {
    let styles = StyleSheet::new();
    let geometry = PageGeometry::a4();
    let program = common::numbered_lines("stmt", 5);
    let blocks = vec![
        Block::Spacer(600.0),
        Block::paragraph(&styles.heading, "PROGRAM :"),
        Block::paragraph(&styles.body, &program),
    ];

    let pages = paginate(&blocks, &geometry).unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(find(&pages, "PROGRAM :")[0].page, 0);
    let first = find(&pages, "stmt 1\nstmt 2\nstmt 3");
    let rest = find(&pages, "stmt 4\nstmt 5");
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].page, 0);
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].page, 1);
    assert!(approx(rest[0].top, geometry.frame_top()));
}

#[test]
fn long_paragraph_spans_pages() {
    let styles = StyleSheet::new();
    let geometry = PageGeometry::a4();
    let text = common::numbered_lines("line", 40);
    let blocks = vec![Block::paragraph(&styles.body, &text)];

    let pages = paginate(&blocks, &geometry).unwrap();
    assert_eq!(pages.len(), 2);

    // 714.69 / 22 = 32 lines on the first page
    let slices: Vec<&Placement> = placements(&pages);
    assert_eq!(slices.len(), 2);
    assert_eq!(slices[0].text.lines().count(), 32);
    assert_eq!(slices[1].text.lines().count(), 8);
    assert!(slices.iter().all(|p| p.bottom >= geometry.frame_bottom() - 0.01));

    let rejoined = format!("{}\n{}", slices[0].text, slices[1].text);
    assert_eq!(rejoined, text);
}

#[test]
fn gap_is_the_larger_of_space_after_and_space_before() {
    let styles = StyleSheet::new();
    let geometry = PageGeometry::a4();
    let blocks = vec![
        Block::paragraph(&styles.body, "first"),
        Block::paragraph(&styles.heading, "NEXT :"),
        Block::paragraph(&styles.terminal, "Hello"),
    ];

    let pages = paginate(&blocks, &geometry).unwrap();
    let first = find(&pages, "first")[0];
    let heading = find(&pages, "NEXT :")[0];
    let terminal = find(&pages, "Hello")[0];

    // Nothing above the first block at the top of the page.
    assert!(approx(first.top, geometry.frame_top()));
    // body after 12, heading before 18
    assert!(approx(first.bottom - heading.top, 18.0));
    // heading after 12, terminal before 10
    assert!(approx(heading.bottom - terminal.top, 12.0));
}

#[test]
fn table_taller_than_a_page_is_a_layout_error() {
    use lab_record_pdf::{CellPadding, CellVAlign, Table, TableCell, TableRow, VMerge};

    let styles = StyleSheet::new();
    let geometry = PageGeometry::a4();
    let cell = TableCell {
        paragraph: Some(lab_record_pdf::Paragraph::new(
            &styles.table_label,
            &common::numbered_lines("row", 60),
        )),
        v_merge: VMerge::None,
        v_align: CellVAlign::Top,
    };
    let table = Table {
        col_widths: vec![200.0],
        rows: vec![TableRow { cells: vec![cell] }],
        padding: CellPadding::default(),
        grid_width: 1.0,
    };

    let err = paginate(&[Block::Table(table)], &geometry).err().expect("layout error");
    assert!(matches!(err, Error::Layout(_)), "{err}");
}

#[test]
fn line_taller_than_a_page_is_a_layout_error() {
    let mut styles = StyleSheet::new();
    styles.body.leading = 800.0;
    let blocks = vec![Block::paragraph(&styles.body, "x")];

    let err = paginate(&blocks, &PageGeometry::a4()).err().expect("layout error");
    assert!(matches!(err, Error::Layout(_)));
}

#[test]
fn spacer_past_the_page_end_starts_a_new_page() {
    let styles = StyleSheet::new();
    let geometry = PageGeometry::a4();
    let blocks = vec![
        Block::Spacer(700.0),
        Block::Spacer(30.0),
        Block::paragraph(&styles.body, "after"),
    ];

    let pages = paginate(&blocks, &geometry).unwrap();
    assert_eq!(pages.len(), 2);
    let after = find(&pages, "after")[0];
    assert_eq!(after.page, 1);
    assert!(approx(after.top, geometry.frame_top()));
}
