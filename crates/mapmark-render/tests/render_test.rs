use mapmark_core::{
    Color, Direction, IconName, IconShape, IconStyle, LabelShape, LabelStyle, LayoutItem,
    LayoutStyle, MarkerKind, MarkerStyle,
};
use mapmark_render::{RENDER_ERROR_PLACEHOLDER, StyleRegistry, html, render_style};
use serde_json::json;

fn u_bahn() -> MarkerStyle {
    MarkerStyle::Label(LabelStyle {
        color: Color::new("#1569B1"),
        text: "U1".to_string(),
        shape: LabelShape::Rectangle,
        scale: 1.0,
    })
}

fn warning_icon() -> MarkerStyle {
    MarkerStyle::Icon(IconStyle {
        color: Color::new("#f59e0b"),
        icon: IconName::Warning,
        shape: IconShape::Square,
        animated: false,
        rotation: 90,
        ..IconStyle::default()
    })
}

#[test]
fn label_markup_embeds_kind_and_style() {
    let markup = render_style(&u_bahn());
    assert_eq!(
        markup,
        concat!(
            r#"<div data-type="label" data-style="{&quot;color&quot;:&quot;#1569B1&quot;,&quot;text&quot;:&quot;U1&quot;,&quot;shape&quot;:&quot;rectangle&quot;,&quot;scale&quot;:1.0}" "#,
            r#"style="background-color:#1569B1;scale:1" class="px-4 py-1 text-lg font-bold text-white">U1</div>"#
        )
    );
}

#[test]
fn label_shapes_add_their_css() {
    let render = |shape| {
        render_style(&MarkerStyle::Label(LabelStyle {
            shape,
            ..LabelStyle::default()
        }))
    };
    assert!(render(LabelShape::Rounded).contains("border-radius:9999px"));
    let trapezoid = render(LabelShape::Trapezoid);
    assert!(trapezoid.contains("padding-top:0;padding-bottom:0"));
    assert!(trapezoid.contains(
        "clip-path:polygon(80% 0, 100% 50%, 80% 100%, 20% 100%, 0% 50%, 20% 0%)"
    ));
    assert!(
        render(LabelShape::Ferry).contains("clip-path:polygon(0 0, 100% 0, 80% 100%, 20% 100%)")
    );
    assert!(!render(LabelShape::Rectangle).contains("clip-path"));
}

#[test]
fn label_text_is_escaped() {
    let markup = render_style(&MarkerStyle::Label(LabelStyle {
        text: "<b>S&U</b>".to_string(),
        ..LabelStyle::default()
    }));
    assert!(markup.contains(">&lt;b&gt;S&amp;U&lt;/b&gt;</div>"));
    assert!(!markup.contains("<b>"));
}

#[test]
fn icon_markup_reflects_every_field() {
    let markup = render_style(&warning_icon());
    assert!(markup.starts_with(r#"<div data-type="icon""#));
    assert!(markup.contains("background-color:#f59e0b;scale:1;rotate:90deg;border-radius:0"));
    assert!(markup.contains("animation-name:none;animation-duration:2s;fill:#ffffff"));
    assert!(markup.contains(r#"viewBox="0 0 512 512""#));

    let animated = render_style(&MarkerStyle::Icon(IconStyle::default()));
    assert!(animated.contains("animation-name:bounce-arrow"));
    assert!(animated.contains(r#"viewBox="0 0 384 512""#));
    assert!(animated.contains("border-radius:9999px"));
}

#[test]
fn rendering_is_pure() {
    let registry = StyleRegistry::builtin();
    for style in [u_bahn(), warning_icon(), MarkerStyle::default_for(MarkerKind::Layout)] {
        assert_eq!(render_style(&style), render_style(&style));
        let kind = style.kind().as_str();
        let data = style.data_value();
        assert_eq!(registry.render(kind, &data), registry.render(kind, &data));
        assert_eq!(registry.render(kind, &data), render_style(&style));
    }
}

#[test]
fn layout_contains_each_item_rendering() {
    let inner = MarkerStyle::Layout(LayoutStyle {
        direction: Direction::Column,
        gap: 2.0,
        items: vec![LayoutItem::new(warning_icon())],
    });
    let layout = LayoutStyle {
        direction: Direction::Row,
        gap: 4.0,
        items: vec![LayoutItem::new(u_bahn()), LayoutItem::new(inner.clone())],
    };
    let markup = html::render_layout(&layout).unwrap();
    assert!(markup.contains(
        "display:flex;flex-direction:row;align-items:center;justify-content:center;gap:4px"
    ));
    for item in [&u_bahn(), &inner, &warning_icon()] {
        let fragment = render_style(item);
        assert!(markup.contains(&format!("<div>{fragment}</div>")) || markup.contains(&fragment));
    }
    assert!(markup.contains(&format!("<div>{}</div>", render_style(&u_bahn()))));
}

#[test]
fn layout_preview_tags_items_with_their_ids() {
    let layout = LayoutStyle {
        items: vec![LayoutItem::new(u_bahn()), LayoutItem::new(warning_icon())],
        ..LayoutStyle::default()
    };
    let markup = html::render_layout_preview(&layout).unwrap();
    for item in &layout.items {
        assert!(markup.contains(&format!(r#"<div data-item="{}">"#, item.id)));
    }
}

#[test]
fn registry_substitutes_placeholder_for_bad_input() {
    let registry = StyleRegistry::builtin();
    assert_eq!(registry.render("sticker", &json!({})), RENDER_ERROR_PLACEHOLDER);
    assert_eq!(
        registry.render("icon", &json!({ "color": "#fff" })),
        RENDER_ERROR_PLACEHOLDER
    );
    assert!(registry.try_render("icon", &json!({ "color": "#fff" })).is_err());
    assert_eq!(
        registry.render("layout", &json!({ "direction": "row" })),
        RENDER_ERROR_PLACEHOLDER
    );
}

#[test]
fn broken_layout_entry_does_not_break_its_siblings() {
    let registry = StyleRegistry::builtin();
    let data = json!({
        "direction": "row",
        "gap": 4,
        "items": [
            { "type": "icon", "data": { "color": "#fff" } },
            { "type": "label", "data": u_bahn().data_value() }
        ]
    });
    let markup = registry.render("layout", &data);
    assert!(markup.starts_with(r#"<div data-type="layout""#));
    assert!(markup.contains(&format!("<div>{RENDER_ERROR_PLACEHOLDER}</div>")));
    assert!(markup.contains(&format!("<div>{}</div>", render_style(&u_bahn()))));
}

#[test]
fn registry_validates_by_kind_tag() {
    let registry = StyleRegistry::builtin();
    assert!(registry.validate("label", &u_bahn().data_value()));
    assert!(!registry.validate("icon", &u_bahn().data_value()));
    assert!(!registry.validate("sticker", &u_bahn().data_value()));
    assert!(!registry.validate("icon", &json!({ "color": "#fff" })));
}

#[test]
fn empty_registry_renders_nothing() {
    let registry = StyleRegistry::new();
    assert!(registry.get(MarkerKind::Label).is_none());
    assert_eq!(
        registry.render("label", &u_bahn().data_value()),
        RENDER_ERROR_PLACEHOLDER
    );
}

#[test]
fn typed_render_uses_the_registry_entries() {
    let layout = MarkerStyle::Layout(LayoutStyle {
        items: vec![LayoutItem::new(u_bahn())],
        ..LayoutStyle::default()
    });

    let builtin = StyleRegistry::builtin();
    for style in [u_bahn(), warning_icon(), layout.clone()] {
        assert_eq!(builtin.render_style(&style), render_style(&style));
    }

    assert_eq!(StyleRegistry::new().render_style(&u_bahn()), RENDER_ERROR_PLACEHOLDER);

    let mut labels_only = StyleRegistry::new();
    labels_only.insert(
        MarkerKind::Label,
        builtin.get(MarkerKind::Label).expect("builtin label entry"),
    );
    assert_eq!(labels_only.render_style(&u_bahn()), render_style(&u_bahn()));
    assert_eq!(labels_only.render_style(&layout), RENDER_ERROR_PLACEHOLDER);
}
