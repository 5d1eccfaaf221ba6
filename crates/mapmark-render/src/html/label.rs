use super::{InlineStyle, escape_xml_into, fmt_number, open_marker};
use crate::Result;
use mapmark_core::{LabelShape, LabelStyle, MarkerKind};

const TRAPEZOID_CLIP: &str = "polygon(80% 0, 100% 50%, 80% 100%, 20% 100%, 0% 50%, 20% 0%)";
const FERRY_CLIP: &str = "polygon(0 0, 100% 0, 80% 100%, 20% 100%)";
const LABEL_CLASS: &str = "px-4 py-1 text-lg font-bold text-white";

fn push_shape(style: &mut InlineStyle, shape: LabelShape) {
    match shape {
        LabelShape::Rectangle => {}
        LabelShape::Rounded => {
            style.push("border-radius", "9999px");
        }
        LabelShape::Trapezoid => {
            style
                .push("padding-top", "0")
                .push("padding-bottom", "0")
                .push("-webkit-clip-path", TRAPEZOID_CLIP)
                .push("clip-path", TRAPEZOID_CLIP);
        }
        LabelShape::Ferry => {
            style
                .push("-webkit-clip-path", FERRY_CLIP)
                .push("clip-path", FERRY_CLIP);
        }
    }
}

pub fn render_label(data: &LabelStyle) -> Result<String> {
    let mut style = InlineStyle::new();
    style
        .push("background-color", data.color.as_str())
        .push("scale", fmt_number(data.scale));
    push_shape(&mut style, data.shape);

    let mut out = String::new();
    open_marker(&mut out, MarkerKind::Label, data, &style, Some(LABEL_CLASS))?;
    escape_xml_into(&mut out, &data.text);
    out.push_str("</div>");
    Ok(out)
}
