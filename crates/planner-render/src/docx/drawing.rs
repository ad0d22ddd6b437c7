//! DrawingML: inline pictures, floating text boxes and guide shapes

use super::body::{run, spacing_exact};
use super::xml::XmlWriter;
use crate::model::*;
use planner_layout::constants::cm_to_emu;
use std::io;

const PICTURE_URI: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
const SHAPE_URI: &str = "http://schemas.microsoft.com/office/word/2010/wordprocessingShape";

/// Outline width of every shape (0.5pt)
const LINE_WIDTH_EMU: &str = "6350";

/// Z-order base for anchored shapes; later shapes stack on top
const RELATIVE_HEIGHT_BASE: usize = 251_659_264;

const CONTENT_COLOR: &str = "FF0000";
const GUTTER_COLOR: &str = "0000FF";
const MARGIN_COLOR: &str = "00FF00";

/// Allocates the document-wide `wp:docPr` ids
#[derive(Debug, Default)]
pub struct DrawingIds {
    next: usize,
}

impl DrawingIds {
    pub fn next(&mut self) -> usize {
        self.next += 1;
        self.next
    }
}

fn emu(cm: f64) -> String {
    cm_to_emu(cm).to_string()
}

/// Picture run sized to `width_cm` x `height_cm`
pub fn inline_picture(
    xml: &mut XmlWriter,
    ids: &mut DrawingIds,
    rel_id: &str,
    width_cm: f64,
    height_cm: f64,
) -> io::Result<()> {
    let id = ids.next().to_string();
    let (cx, cy) = (emu(width_cm), emu(height_cm));
    let name = format!("Picture {}", id);

    xml.open("w:r", &[])?;
    xml.open("w:drawing", &[])?;
    xml.open(
        "wp:inline",
        &[("distT", "0"), ("distB", "0"), ("distL", "0"), ("distR", "0")],
    )?;
    xml.empty("wp:extent", &[("cx", &cx), ("cy", &cy)])?;
    xml.empty("wp:effectExtent", &[("l", "0"), ("t", "0"), ("r", "0"), ("b", "0")])?;
    xml.empty("wp:docPr", &[("id", &id), ("name", &name)])?;
    xml.open("wp:cNvGraphicFramePr", &[])?;
    xml.empty("a:graphicFrameLocks", &[("noChangeAspect", "1")])?;
    xml.close("wp:cNvGraphicFramePr")?;

    xml.open("a:graphic", &[])?;
    xml.open("a:graphicData", &[("uri", PICTURE_URI)])?;
    xml.open("pic:pic", &[])?;
    xml.open("pic:nvPicPr", &[])?;
    xml.empty("pic:cNvPr", &[("id", &id), ("name", &name)])?;
    xml.empty("pic:cNvPicPr", &[])?;
    xml.close("pic:nvPicPr")?;
    xml.open("pic:blipFill", &[])?;
    xml.empty("a:blip", &[("r:embed", rel_id)])?;
    xml.open("a:stretch", &[])?;
    xml.empty("a:fillRect", &[])?;
    xml.close("a:stretch")?;
    xml.close("pic:blipFill")?;
    xml.open("pic:spPr", &[])?;
    transform(xml, &cx, &cy)?;
    geometry(xml, "rect")?;
    xml.close("pic:spPr")?;
    xml.close("pic:pic")?;
    xml.close("a:graphicData")?;
    xml.close("a:graphic")?;

    xml.close("wp:inline")?;
    xml.close("w:drawing")?;
    xml.close("w:r")
}

fn transform(xml: &mut XmlWriter, cx: &str, cy: &str) -> io::Result<()> {
    xml.open("a:xfrm", &[])?;
    xml.empty("a:off", &[("x", "0"), ("y", "0")])?;
    xml.empty("a:ext", &[("cx", cx), ("cy", cy)])?;
    xml.close("a:xfrm")
}

fn geometry(xml: &mut XmlWriter, preset: &str) -> io::Result<()> {
    xml.open("a:prstGeom", &[("prst", preset)])?;
    xml.empty("a:avLst", &[])?;
    xml.close("a:prstGeom")
}

fn solid_fill(xml: &mut XmlWriter, color: &str) -> io::Result<()> {
    xml.open("a:solidFill", &[])?;
    xml.empty("a:srgbClr", &[("val", color)])?;
    xml.close("a:solidFill")
}

fn outline(xml: &mut XmlWriter, color: &str) -> io::Result<()> {
    xml.open("a:ln", &[("w", LINE_WIDTH_EMU)])?;
    solid_fill(xml, color)?;
    xml.close("a:ln")
}

/// Floating shape positioned from the page's top-left corner.
///
/// `shape` writes the children of `wps:wsp`.
fn anchored_shape(
    xml: &mut XmlWriter,
    ids: &mut DrawingIds,
    name: &str,
    rect: RectCm,
    shape: impl FnOnce(&mut XmlWriter, &str, &str) -> io::Result<()>,
) -> io::Result<()> {
    let id = ids.next();
    let id_text = id.to_string();
    let z = (RELATIVE_HEIGHT_BASE + id).to_string();
    let (cx, cy) = (emu(rect.width), emu(rect.height));

    xml.open("w:r", &[])?;
    xml.open("w:drawing", &[])?;
    xml.open(
        "wp:anchor",
        &[
            ("distT", "0"),
            ("distB", "0"),
            ("distL", "0"),
            ("distR", "0"),
            ("simplePos", "0"),
            ("relativeHeight", &z),
            ("behindDoc", "0"),
            ("locked", "0"),
            ("layoutInCell", "0"),
            ("allowOverlap", "1"),
        ],
    )?;
    xml.empty("wp:simplePos", &[("x", "0"), ("y", "0")])?;
    xml.open("wp:positionH", &[("relativeFrom", "page")])?;
    xml.leaf("wp:posOffset", &[], &emu(rect.x))?;
    xml.close("wp:positionH")?;
    xml.open("wp:positionV", &[("relativeFrom", "page")])?;
    xml.leaf("wp:posOffset", &[], &emu(rect.y))?;
    xml.close("wp:positionV")?;
    xml.empty("wp:extent", &[("cx", &cx), ("cy", &cy)])?;
    xml.empty("wp:effectExtent", &[("l", "0"), ("t", "0"), ("r", "0"), ("b", "0")])?;
    xml.empty("wp:wrapNone", &[])?;
    xml.empty("wp:docPr", &[("id", &id_text), ("name", name)])?;
    xml.empty("wp:cNvGraphicFramePr", &[])?;
    xml.open("a:graphic", &[])?;
    xml.open("a:graphicData", &[("uri", SHAPE_URI)])?;
    xml.open("wps:wsp", &[])?;
    shape(xml, &cx, &cy)?;
    xml.close("wps:wsp")?;
    xml.close("a:graphicData")?;
    xml.close("a:graphic")?;
    xml.close("wp:anchor")?;
    xml.close("w:drawing")?;
    xml.close("w:r")
}

/// Outlined rectangle or straight line
fn guide_shape(
    xml: &mut XmlWriter,
    ids: &mut DrawingIds,
    name: &str,
    rect: RectCm,
    preset: &str,
    color: &str,
) -> io::Result<()> {
    anchored_shape(xml, ids, name, rect, |xml, cx, cy| {
        if preset == "line" {
            xml.empty("wps:cNvCnPr", &[])?;
        } else {
            xml.empty("wps:cNvSpPr", &[])?;
        }
        xml.open("wps:spPr", &[])?;
        transform(xml, cx, cy)?;
        geometry(xml, preset)?;
        xml.empty("a:noFill", &[])?;
        outline(xml, color)?;
        xml.close("wps:spPr")?;
        xml.empty("wps:bodyPr", &[])
    })
}

/// Content area, gutter and margin lines
pub fn guides(xml: &mut XmlWriter, ids: &mut DrawingIds, guides: &Guides) -> io::Result<()> {
    let horizontal = |y: f64| RectCm {
        x: 0.0,
        y,
        width: guides.page_width,
        height: 0.0,
    };
    guide_shape(xml, ids, "DebugTopMargin", horizontal(guides.top_y), "line", MARGIN_COLOR)?;
    guide_shape(xml, ids, "DebugFooter", horizontal(guides.footer_y), "line", MARGIN_COLOR)?;
    guide_shape(
        xml,
        ids,
        "DebugGutter",
        RectCm {
            x: guides.gutter_x,
            y: 0.0,
            width: 0.0,
            height: guides.page_height,
        },
        "line",
        GUTTER_COLOR,
    )?;
    guide_shape(xml, ids, "DebugContent", guides.content, "rect", CONTENT_COLOR)
}

/// Floating text box holding `overlay.lines`
pub fn text_box(xml: &mut XmlWriter, ids: &mut DrawingIds, overlay: &Overlay) -> io::Result<()> {
    let rect = RectCm {
        x: overlay.x_cm,
        y: overlay.y_cm,
        width: overlay.width_cm,
        height: overlay.height_cm,
    };
    anchored_shape(xml, ids, &overlay.name, rect, |xml, cx, cy| {
        xml.empty("wps:cNvSpPr", &[("txBox", "1")])?;
        xml.open("wps:spPr", &[])?;
        transform(xml, cx, cy)?;
        geometry(xml, "rect")?;
        if overlay.framed {
            solid_fill(xml, "FFFFFF")?;
            outline(xml, "000000")?;
        } else {
            xml.empty("a:noFill", &[])?;
            xml.open("a:ln", &[])?;
            xml.empty("a:noFill", &[])?;
            xml.close("a:ln")?;
        }
        xml.close("wps:spPr")?;

        xml.open("wps:txbx", &[])?;
        xml.open("w:txbxContent", &[])?;
        for line in &overlay.lines {
            xml.open("w:p", &[])?;
            xml.open("w:pPr", &[])?;
            spacing_exact(xml, 0.0, line.line_height_pt)?;
            xml.val("w:jc", super::body::jc(line.align))?;
            xml.close("w:pPr")?;
            for r in &line.runs {
                run(xml, r)?;
            }
            xml.close("w:p")?;
        }
        xml.close("w:txbxContent")?;
        xml.close("wps:txbx")?;

        xml.empty(
            "wps:bodyPr",
            &[
                ("rot", "0"),
                ("vert", "horz"),
                ("wrap", "square"),
                ("lIns", "91440"),
                ("tIns", "45720"),
                ("rIns", "91440"),
                ("bIns", "45720"),
                ("anchor", "t"),
                ("anchorCtr", "0"),
                ("upright", "1"),
            ],
        )
    })
}
