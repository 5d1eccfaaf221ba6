use crate::*;

fn label(text: &str) -> MarkerStyle {
    MarkerStyle::Label(LabelStyle {
        text: text.to_string(),
        ..LabelStyle::default()
    })
}

#[test]
fn add_keeps_insertion_order_and_unique_ids() {
    let mut markers = MarkerCollection::new();
    let a = markers.add(LatLng::new(53.55, 9.99), label("A"));
    let b = markers.add_default(LatLng::new(53.56, 9.98));
    let c = markers.add(LatLng::new(53.57, 9.97), label("C"));
    assert_eq!(markers.ids().collect::<Vec<_>>(), vec![a, b, c]);
    assert_eq!(markers.get(b).unwrap().style, MarkerStyle::default());
}

#[test]
fn remove_preserves_order_of_the_rest() {
    let mut markers = MarkerCollection::new();
    let a = markers.add_default(LatLng::default());
    let b = markers.add_default(LatLng::default());
    let c = markers.add_default(LatLng::default());
    assert!(markers.remove(b).is_some());
    assert!(markers.remove(b).is_none());
    assert_eq!(markers.ids().collect::<Vec<_>>(), vec![a, c]);
}

#[test]
fn insert_rejects_duplicate_ids() {
    let mut markers = MarkerCollection::new();
    let marker = PlacedMarker::new(LatLng::default(), label("A"));
    markers.insert(marker.clone()).unwrap();
    let err = markers.insert(marker).unwrap_err();
    assert!(matches!(err, Error::DuplicateMarker { .. }));
    assert_eq!(markers.len(), 1);
}

#[test]
fn replace_range_is_all_or_nothing() {
    let mut markers = MarkerCollection::new();
    let a = markers.add(LatLng::default(), label("A"));
    let b = markers.add(LatLng::default(), label("B"));
    let missing = MarkerId::new();

    let replacement = PlacedMarker::new(LatLng::default(), label("AB"));
    let err = markers
        .replace_range(&[a, missing], replacement.clone())
        .unwrap_err();
    assert!(matches!(err, Error::UnknownMarker { id } if id == missing));
    assert_eq!(markers.len(), 2);

    let removed = markers.replace_range(&[a, b], replacement.clone()).unwrap();
    assert_eq!(removed.len(), 2);
    assert_eq!(markers.len(), 1);
    assert!(markers.contains(replacement.id));
}

#[test]
fn set_style_and_position_require_known_id() {
    let mut markers = MarkerCollection::new();
    let a = markers.add_default(LatLng::default());
    markers.set_style(a, label("U3")).unwrap();
    markers.set_position(a, LatLng::new(1.0, 2.0)).unwrap();
    let marker = markers.get(a).unwrap();
    assert_eq!(marker.style, label("U3"));
    assert_eq!(marker.position, LatLng::new(1.0, 2.0));

    assert!(markers.set_style(MarkerId::new(), label("X")).is_err());
    assert!(markers.set_position(MarkerId::new(), LatLng::default()).is_err());
}

#[test]
fn clear_returns_markers_in_order() {
    let mut markers = MarkerCollection::new();
    let a = markers.add_default(LatLng::default());
    let b = markers.add_default(LatLng::default());
    let removed = markers.clear();
    assert_eq!(removed.iter().map(|m| m.id).collect::<Vec<_>>(), vec![a, b]);
    assert!(markers.is_empty());
}
