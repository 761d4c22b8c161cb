use super::*;

fn slot(index: usize, name: &str, category: SlotCategory, regions: (usize, usize, usize)) -> LayoutSlot {
    LayoutSlot {
        index,
        name: name.to_string(),
        category,
        title_regions: regions.0,
        body_regions: regions.1,
        picture_regions: regions.2,
    }
}

fn catalog(slots: Vec<LayoutSlot>) -> LayoutCatalog {
    LayoutCatalog::new(slots).unwrap()
}

fn text_body() -> ContentSignal {
    ContentSignal {
        has_title: true,
        has_body: true,
        ..ContentSignal::default()
    }
}

fn slots_of(out: &[Assignment]) -> Vec<Option<usize>> {
    out.iter().map(|a| a.slot).collect()
}

#[test]
fn rank_scores_step_down_to_the_floor() {
    assert_eq!(rank_score(0), 50);
    assert_eq!(rank_score(1), 40);
    assert_eq!(rank_score(3), 20);
    assert_eq!(rank_score(7), 20);
}

#[test]
fn top_preference_with_best_fit_wins() {
    let layouts = catalog(vec![
        slot(0, "Title 1", SlotCategory::Title, (1, 0, 0)),
        slot(1, "Content", SlotCategory::ContentText, (1, 1, 0)),
        slot(2, "Image Right", SlotCategory::ContentImageRight, (1, 1, 1)),
    ]);
    let out = assign(
        &[(BlockKind::HighlightQuote, text_body())],
        &layouts,
        &AssignOpts::default(),
    );
    assert_eq!(
        out,
        vec![Assignment {
            block: BlockKind::HighlightQuote,
            slot: Some(1)
        }]
    );
}

#[test]
fn variety_window_rotates_between_equal_slots() {
    let layouts = catalog(vec![
        slot(1, "Content A", SlotCategory::ContentText, (1, 1, 0)),
        slot(2, "Content B", SlotCategory::ContentText, (1, 1, 0)),
    ]);
    let blocks = vec![
        (BlockKind::HighlightQuote, text_body()),
        (BlockKind::Sources, text_body()),
        (BlockKind::ExecutiveSummary, text_body()),
    ];
    let out = assign(&blocks, &layouts, &AssignOpts::default());
    assert_eq!(slots_of(&out), vec![Some(1), Some(2), Some(1)]);

    let out = assign(&blocks, &layouts, &AssignOpts { variety_window: 0 });
    assert_eq!(slots_of(&out), vec![Some(1), Some(1), Some(1)]);
}

#[test]
fn fallback_category_is_used_when_nothing_preferred_exists() {
    let layouts = catalog(vec![
        slot(6, "Two up", SlotCategory::MultiColumn2, (1, 2, 0)),
        slot(5, "Content", SlotCategory::ContentText, (1, 1, 0)),
    ]);
    let title_only = ContentSignal {
        has_title: true,
        ..ContentSignal::default()
    };
    let out = assign(&[(BlockKind::KanbanBoard, title_only)], &layouts, &AssignOpts::default());
    assert_eq!(slots_of(&out), vec![Some(5)]);
}

#[test]
fn unmatched_blocks_get_null_and_others_still_assign() {
    let layouts = catalog(vec![slot(0, "Grid", SlotCategory::MultiColumn4, (1, 4, 0))]);
    let four_columns = ContentSignal {
        has_title: true,
        has_body: true,
        columns: 4,
        ..ContentSignal::default()
    };
    let blocks = vec![
        (BlockKind::HighlightQuote, text_body()),
        (BlockKind::TeamLeadership, four_columns.clone()),
        (BlockKind::OurValues, four_columns),
    ];
    let out = assign(&blocks, &layouts, &AssignOpts::default());
    assert_eq!(slots_of(&out), vec![None, Some(0), Some(0)]);
    assert_eq!(out[0].block, BlockKind::HighlightQuote);
}

#[test]
fn hint_bonus_beats_catalog_order() {
    let layouts = catalog(vec![
        slot(0, "Plain", SlotCategory::ContentText, (1, 1, 0)),
        slot(1, "Wide Text", SlotCategory::ContentText, (1, 1, 0)),
    ]);
    let hinted = ContentSignal {
        hint: Some("WIDE".into()),
        ..text_body()
    };
    let out = assign(&[(BlockKind::HighlightQuote, hinted)], &layouts, &AssignOpts::default());
    assert_eq!(slots_of(&out), vec![Some(1)]);
}

#[test]
fn image_led_blocks_prefer_picture_slots() {
    let layouts = catalog(vec![
        slot(0, "Content", SlotCategory::ContentText, (1, 1, 0)),
        slot(1, "Photo", SlotCategory::ContentImageLeft, (1, 1, 1)),
    ]);
    let image = ContentSignal {
        has_image: true,
        ..text_body()
    };
    let out = assign(&[(BlockKind::CompanyOverview, image)], &layouts, &AssignOpts::default());
    assert_eq!(slots_of(&out), vec![Some(1)]);
}

#[test]
fn column_fit_rewards_enough_bodies() {
    let layouts = catalog(vec![
        slot(0, "Two", SlotCategory::MultiColumn2, (1, 3, 0)),
        slot(1, "Three", SlotCategory::MultiColumn3, (1, 2, 0)),
    ]);
    let three = ContentSignal {
        columns: 3,
        ..text_body()
    };
    let out = assign(&[(BlockKind::ThreeColumn, three)], &layouts, &AssignOpts::default());
    assert_eq!(slots_of(&out), vec![Some(1)]);
}

#[test]
fn assignment_is_deterministic() {
    let layouts = catalog(vec![
        slot(0, "Title 1", SlotCategory::Title, (1, 0, 0)),
        slot(3, "Content", SlotCategory::ContentText, (1, 1, 0)),
        slot(4, "Blank", SlotCategory::BlankCanvas, (1, 0, 0)),
        slot(7, "Two up", SlotCategory::MultiColumn2, (1, 2, 0)),
    ]);
    let graphic = ContentSignal {
        has_title: true,
        has_graphic: true,
        ..ContentSignal::default()
    };
    let blocks: Vec<(BlockKind, ContentSignal)> = BlockKind::ALL
        .iter()
        .enumerate()
        .map(|(i, k)| (*k, if i % 2 == 0 { graphic.clone() } else { text_body() }))
        .collect();
    let a = assign(&blocks, &layouts, &AssignOpts::default());
    let b = assign(&blocks, &layouts, &AssignOpts::default());
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
    assert!(a.iter().all(|x| x.slot.is_some()));
}

#[test]
fn options_deserialize_with_defaults() {
    let opts: AssignOpts = serde_json::from_str("{}").unwrap();
    assert_eq!(opts.variety_window, DEFAULT_VARIETY_WINDOW);
    let opts: AssignOpts = serde_json::from_str(r#"{ "variety_window": 1 }"#).unwrap();
    assert_eq!(opts.variety_window, 1);
}
