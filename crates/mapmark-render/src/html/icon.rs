use super::{InlineStyle, fmt_number, open_marker};
use crate::Result;
use mapmark_core::model::DURATION_MAX;
use mapmark_core::{IconName, IconShape, IconStyle, MarkerKind};
use std::fmt::Write as _;

const ICON_CLASS: &str =
    "flex h-16 w-16 justify-center bg-primary p-4 align-middle text-lg font-bold text-white";

/// CSS durations indexed by `DURATION_MAX - duration`: a higher step animates faster.
const DURATION_TABLE: [&str; 5] = ["0.5s", "1s", "2s", "5s", "10s"];

struct Glyph {
    view_box: &'static str,
    path: &'static str,
}

fn glyph(icon: IconName) -> Glyph {
    match icon {
        IconName::Arrow => Glyph {
            view_box: "0 0 384 512",
            path: "M214.6 41.4c-12.5-12.5-32.8-12.5-45.3 0l-160 160c-12.5 12.5-12.5 32.8 0 45.3s32.8 12.5 45.3 0L160 141.2 160 448c0 17.7 14.3 32 32 32s32-14.3 32-32l0-306.7L329.4 246.6c12.5 12.5 32.8 12.5 45.3 0s12.5-32.8 0-45.3l-160-160z",
        },
        IconName::Warning => Glyph {
            view_box: "0 0 512 512",
            path: "M256 32L16 464h480L256 32zm-24 160h48v144h-48V192zm0 192h48v48h-48v-48z",
        },
        IconName::Construction => Glyph {
            view_box: "0 0 512 512",
            path: "M208 32h96l112 384H96L208 32zm-16 128h128l-12-40H204l-12 40zm-24 88h176l-12-40H180l-12 40zM32 448h448v32H32v-32z",
        },
    }
}

fn border_radius(shape: IconShape) -> &'static str {
    match shape {
        IconShape::Circle => "9999px",
        IconShape::Rounded => "12px",
        IconShape::Square => "0",
    }
}

pub fn duration_css(duration: u8) -> &'static str {
    let idx = DURATION_MAX.saturating_sub(duration.min(DURATION_MAX)) as usize;
    DURATION_TABLE[idx]
}

pub fn render_icon(data: &IconStyle) -> Result<String> {
    let mut style = InlineStyle::new();
    style
        .push("background-color", data.color.as_str())
        .push("scale", fmt_number(data.scale))
        .push("rotate", format!("{}deg", data.rotation))
        .push("border-radius", border_radius(data.shape));

    let mut svg_style = InlineStyle::new();
    svg_style
        .push(
            "animation-name",
            if data.animated { "bounce-arrow" } else { "none" },
        )
        .push("animation-duration", duration_css(data.duration))
        .push("fill", data.stroke.as_str());

    let glyph = glyph(data.icon);
    let mut out = String::new();
    open_marker(&mut out, MarkerKind::Icon, data, &style, Some(ICON_CLASS))?;
    let _ = write!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{}" style="{}" class="animate-bounce-arrow"><path d="{}"/></svg>"#,
        glyph.view_box,
        super::escape_xml(svg_style.as_str()),
        glyph.path,
    );
    out.push_str("</div>");
    Ok(out)
}
