use super::*;

#[test]
fn every_kind_has_a_ranked_first_choice() {
    let kinds = [
        SignalKind::TitleOnly,
        SignalKind::TextBody,
        SignalKind::ImageLed,
        SignalKind::Columns(2),
        SignalKind::Columns(3),
        SignalKind::Columns(5),
        SignalKind::Graphic,
    ];
    for kind in kinds {
        let pref = kind.preference();
        assert_eq!(pref.rank(pref.categories[0]), Some(0), "{kind:?}");
        assert!(!pref.categories.is_empty());
    }
}

#[test]
fn column_counts_pick_matching_grids() {
    assert_eq!(SignalKind::Columns(2).preference().categories[0], MultiColumn2);
    assert_eq!(SignalKind::Columns(3).preference().categories[0], MultiColumn3);
    assert_eq!(SignalKind::Columns(4).preference().categories[0], MultiColumn4);
    assert_eq!(SignalKind::Columns(9).preference().rank(MultiColumn3), Some(1));
}

#[test]
fn image_led_falls_back_to_full_image() {
    let pref = SignalKind::ImageLed.preference();
    assert_eq!(pref.rank(ContentImageLeft), Some(1));
    assert_eq!(pref.fallback, FullImage);
}

#[test]
fn graphic_prefers_a_blank_canvas() {
    let pref = SignalKind::Graphic.preference();
    assert_eq!(pref.categories, &[BlankCanvas, ContentText]);
    assert_eq!(pref.fallback, Utility);
    assert_eq!(pref.rank(Title), None);
}
