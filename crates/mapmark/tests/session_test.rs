use mapmark::{
    EditorConfig, EditorError, HeadlessMap, IconPreset, IconStyle, ImportOptions, LabelPreset,
    LatLng, MapEngine, MarkerId, MarkerKind, MarkerStyle, Session,
};
use serde_json::json;

const CENTER: LatLng = LatLng {
    lat: 53.552534,
    lon: 9.993768,
};

fn at(lon_offset: f64) -> LatLng {
    LatLng::new(CENTER.lat, CENTER.lon + lon_offset)
}

fn session() -> Session<HeadlessMap> {
    Session::new(HeadlessMap::default(), EditorConfig::default())
}

fn u_bahn() -> MarkerStyle {
    MarkerStyle::Label(LabelPreset::UBahn.style())
}

fn arrow() -> MarkerStyle {
    MarkerStyle::Icon(IconStyle::default())
}

/// Drops `id` at `position` and runs drag-end handling.
fn drop_at(
    session: &mut Session<HeadlessMap>,
    id: MarkerId,
    position: LatLng,
) -> Option<mapmark::MergeProposal> {
    assert!(session.map_mut().drag(id, position));
    session.on_drag_end(id).unwrap()
}

#[test]
fn new_session_moves_the_map_to_the_configured_view() {
    let session = session();
    assert_eq!(session.map().center(), CENTER);
    assert_eq!(session.map().zoom(), 15.0);
    assert!(session.markers().is_empty());
}

#[test]
fn add_places_a_default_marker_at_the_center() {
    let mut session = session();
    let id = session.add_marker();

    let marker = session.markers().get(id).unwrap();
    assert_eq!(marker.position, CENTER);
    assert_eq!(marker.style, MarkerStyle::default());

    let attached = session.map().marker(id).unwrap();
    assert!(attached.draggable);
    assert!(attached.markup.contains(r#"data-type="label""#));
}

#[test]
fn markers_are_not_draggable_when_configured_off() {
    let config = EditorConfig::with_overrides(&json!({ "marker": { "draggable": false } }));
    let mut session = Session::new(HeadlessMap::default(), config);
    let id = session.add_marker();
    assert!(!session.map_mut().drag(id, at(0.01)));
}

#[test]
fn saving_the_dialog_updates_collection_and_map() {
    let mut session = session();
    let id = session.add_marker();

    session
        .on_click(id)
        .unwrap()
        .label_mut()
        .apply_preset(LabelPreset::UBahn);
    assert_eq!(session.save_dialog().unwrap(), id);

    assert_eq!(session.markers().get(id).unwrap().style, u_bahn());
    assert!(session.map().markup(id).unwrap().contains(">U1</div>"));
    assert!(session.dialog().is_none());
    assert!(matches!(
        session.save_dialog(),
        Err(EditorError::NoActiveDialog)
    ));
}

#[test]
fn saving_uses_the_active_tab() {
    let mut session = session();
    let id = session.add_marker();

    let dialog = session.on_click(id).unwrap();
    dialog.set_tab(MarkerKind::Icon);
    dialog.icon_mut().apply_preset(IconPreset::Warning);
    session.save_dialog().unwrap();

    assert_eq!(
        session.markers().get(id).unwrap().style,
        MarkerStyle::Icon(IconPreset::Warning.style())
    );
    assert!(session.map().markup(id).unwrap().contains(r#"data-type="icon""#));
}

#[test]
fn closing_the_dialog_leaves_the_marker_untouched() {
    let mut session = session();
    let id = session.add_marker();
    session.on_click(id).unwrap().label_mut().set_text("draft");
    assert!(session.close_dialog());
    assert_eq!(session.markers().get(id).unwrap().style, MarkerStyle::default());
}

#[test]
fn deleting_from_the_dialog_removes_the_marker() {
    let mut session = session();
    let keep = session.add_marker();
    let id = session.add_marker();
    session.on_click(id).unwrap();
    assert_eq!(session.delete_from_dialog().unwrap(), id);

    assert_eq!(session.markers().ids().collect::<Vec<_>>(), [keep]);
    assert_eq!(session.map().marker_count(), 1);
}

#[test]
fn clicking_an_unknown_marker_fails() {
    let mut session = session();
    let id = session.add_marker();
    session.remove_marker(id).unwrap();
    assert!(matches!(
        session.on_click(id),
        Err(EditorError::Model(mapmark::Error::UnknownMarker { .. }))
    ));
}

#[test]
fn drag_end_syncs_position_without_merge_when_apart() {
    let mut session = session();
    let a = session.place(CENTER, u_bahn());
    session.place(at(0.05), arrow());

    assert_eq!(drop_at(&mut session, a, at(0.01)), None);
    assert_eq!(session.markers().get(a).unwrap().position, at(0.01));
    assert_eq!(session.pending_merge(), None);
}

#[test]
fn dropping_onto_another_marker_merges_into_a_layout() {
    let mut session = session();
    let b = session.place(CENTER, arrow());
    let a = session.place(at(0.05), u_bahn());

    let proposal = drop_at(&mut session, a, at(0.0005)).unwrap();
    assert_eq!((proposal.source, proposal.target), (a, b));

    let preview = session.merge_preview().unwrap();
    assert!(preview.source_preview.contains(">U1</div>"));
    assert!(preview.target_preview.contains(r#"data-type="icon""#));

    let merged = session.confirm_merge().unwrap();
    assert_eq!(session.markers().len(), 1);
    assert_eq!(session.map().marker_count(), 1);
    assert!(session.map().marker(a).is_none());
    assert!(session.map().marker(b).is_none());

    let marker = session.markers().get(merged).unwrap();
    assert_eq!(marker.position, CENTER);
    let MarkerStyle::Layout(layout) = &marker.style else {
        panic!("expected a layout, got {:?}", marker.style);
    };
    assert_eq!(layout.gap, 4.0);
    let items: Vec<_> = layout.items.iter().map(|item| item.style.clone()).collect();
    assert_eq!(items, [u_bahn(), arrow()]);
    assert!(session.map().markup(merged).unwrap().starts_with(r#"<div data-type="layout""#));
}

#[test]
fn cancelling_a_merge_keeps_both_markers_where_they_were_dropped() {
    let mut session = session();
    let b = session.place(CENTER, arrow());
    let a = session.place(at(0.05), u_bahn());

    assert!(drop_at(&mut session, a, at(0.0005)).is_some());
    session.cancel_merge().unwrap();

    assert_eq!(session.markers().len(), 2);
    assert_eq!(session.markers().get(a).unwrap().position, at(0.0005));
    assert_eq!(session.markers().get(b).unwrap().style, arrow());
    assert!(matches!(
        session.cancel_merge(),
        Err(EditorError::NoPendingMerge)
    ));
    assert!(matches!(
        session.confirm_merge(),
        Err(EditorError::NoPendingMerge)
    ));
}

#[test]
fn merge_closes_a_dialog_on_a_consumed_marker() {
    let mut session = session();
    let b = session.place(CENTER, arrow());
    let a = session.place(at(0.05), u_bahn());

    session.on_click(b).unwrap();
    drop_at(&mut session, a, at(0.0005)).unwrap();
    session.confirm_merge().unwrap();
    assert!(session.dialog().is_none());
}

#[test]
fn merge_policy_comes_from_config() {
    // Both b and c contain the dropped center; c overlaps the dropped box more.
    let setup = |config: EditorConfig| {
        let mut session = Session::new(HeadlessMap::default(), config);
        let b = session.place(CENTER, arrow());
        let c = session.place(at(0.0008), arrow());
        let a = session.place(at(0.05), u_bahn());
        let proposal = drop_at(&mut session, a, at(0.0007)).unwrap();
        (proposal.target, b, c)
    };

    let (target, b, _) = setup(EditorConfig::default());
    assert_eq!(target, b);

    let (target, _, c) = setup(EditorConfig::with_overrides(
        &json!({ "merge": { "policy": "largest-overlap" } }),
    ));
    assert_eq!(target, c);
}

#[test]
fn reset_removes_everything() {
    let mut session = session();
    let id = session.add_marker();
    session.add_marker();
    session.on_click(id).unwrap();

    assert_eq!(session.reset(), 2);
    assert!(session.markers().is_empty());
    assert_eq!(session.map().marker_count(), 0);
    assert!(session.dialog().is_none());
}

#[test]
fn zoom_outside_bounds_is_ignored() {
    let mut session = session();
    assert!(!session.set_zoom(21.0));
    assert!(!session.set_zoom(-1.0));
    assert!(!session.set_zoom(f64::NAN));
    assert_eq!(session.map().zoom(), 15.0);
    assert!(session.set_zoom(20.0));
    assert_eq!(session.view().zoom, 20.0);
}

#[test]
fn export_has_the_documented_shape() {
    let mut session = session();
    session.place(at(0.001), u_bahn());

    let exported: serde_json::Value =
        serde_json::from_str(&session.export_json().unwrap()).unwrap();
    assert_eq!(exported["map"]["center"], json!([CENTER.lon, CENTER.lat]));
    assert_eq!(exported["map"]["zoom"], json!(15.0));
    let marker = &exported["markers"][0];
    assert_eq!(marker["type"], "label");
    assert_eq!(marker["lat"], json!(CENTER.lat));
    assert_eq!(marker["data"]["text"], "U1");
    assert_eq!(marker["data"]["color"], "#1569B1");
}

#[test]
fn import_restores_an_exported_session() {
    let mut original = session();
    original.set_zoom(12.0);
    original.place(at(0.001), u_bahn());
    original.place(at(-0.001), arrow());
    let text = original.export_json().unwrap();

    let mut restored = session();
    restored.add_marker();
    assert_eq!(restored.import_json(&text, ImportOptions::strict()).unwrap(), 2);

    assert_eq!(restored.map().zoom(), 12.0);
    assert_eq!(restored.map().marker_count(), 2);
    let styles: Vec<_> = restored.markers().iter().map(|m| m.style.clone()).collect();
    assert_eq!(styles, [u_bahn(), arrow()]);
    assert_eq!(restored.export_json().unwrap(), text);
}

#[test]
fn rejected_import_leaves_the_session_alone() {
    let doc = json!({
        "map": { "center": [CENTER.lon, CENTER.lat], "zoom": 15 },
        "markers": [
            { "lat": 53.5, "lon": 9.9, "type": "icon", "data": { "color": "#fff" } }
        ]
    })
    .to_string();

    let mut session = session();
    let id = session.add_marker();
    assert!(session.import_json(&doc, ImportOptions::strict()).is_err());
    assert!(session.markers().contains(id));

    assert_eq!(session.import_json(&doc, ImportOptions::lenient()).unwrap(), 1);
    let marker = session.markers().iter().next().unwrap();
    assert_eq!(marker.style, arrow());
    assert!(!session.markers().contains(id));
}
