use lopdf::Document;
use pdf_extract::{output_doc, ColorSpace, MediaBox, OutputDev, OutputError, Path, PathOp, Transform};

/// Segments shorter than this (in points) are not treated as table rules.
const MIN_EDGE_LENGTH: f64 = 1.0;
/// Maximum slant, in points, for a segment to still count as horizontal or vertical.
const MAX_EDGE_SLANT: f64 = 1.0;
/// A glyph continues the current run when it starts this close (relative to the
/// font size) to where the run ends.
const RUN_GAP_RATIO: f64 = 0.1;

/// A run of glyphs drawn one after another on the same baseline, positioned at
/// its baseline start in page space.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TextFragment {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub font_size: f64,
    pub text: String,
}

impl TextFragment {
    pub fn end_x(&self) -> f64 {
        self.x + self.width
    }

    fn continues_at(&self, x: f64, y: f64) -> bool {
        (self.y - y).abs() <= MAX_EDGE_SLANT
            && (x - self.end_x()).abs() <= self.font_size * RUN_GAP_RATIO
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Edge {
    Horizontal { y: f64, x0: f64, x1: f64 },
    Vertical { x: f64, y0: f64, y1: f64 },
}

#[derive(Debug, Default)]
pub(crate) struct PageLayout {
    pub fragments: Vec<TextFragment>,
    pub edges: Vec<Edge>,
}

/// The text runs and ruling edges of every page, in page order.
pub(crate) fn extract_page_layouts(document: &Document) -> Result<Vec<PageLayout>, OutputError> {
    let mut collector = LayoutCollector::default();
    output_doc(document, &mut collector)?;
    Ok(collector.pages)
}

#[derive(Default)]
struct LayoutCollector {
    pages: Vec<PageLayout>,
    page: PageLayout,
    run: Option<TextFragment>,
}

impl LayoutCollector {
    fn flush_run(&mut self) {
        if let Some(run) = self.run.take() {
            if !run.text.trim().is_empty() {
                self.page.fragments.push(run);
            }
        }
    }

    fn collect_edges(&mut self, ctm: &Transform, path: &Path) {
        let apply = |x: f64, y: f64| {
            (
                ctm.m11 * x + ctm.m21 * y + ctm.m31,
                ctm.m12 * x + ctm.m22 * y + ctm.m32,
            )
        };

        let mut segments = vec![];
        let mut current = (0.0, 0.0);
        let mut subpath_start = (0.0, 0.0);
        for op in &path.ops {
            match *op {
                PathOp::MoveTo(x, y) => {
                    current = apply(x, y);
                    subpath_start = current;
                }
                PathOp::LineTo(x, y) => {
                    let point = apply(x, y);
                    segments.push((current, point));
                    current = point;
                }
                PathOp::CurveTo(_, _, _, _, x, y) => current = apply(x, y),
                PathOp::Rect(x, y, width, height) => {
                    let corners = [
                        apply(x, y),
                        apply(x + width, y),
                        apply(x + width, y + height),
                        apply(x, y + height),
                    ];
                    for index in 0..corners.len() {
                        segments.push((corners[index], corners[(index + 1) % corners.len()]));
                    }
                    current = corners[0];
                    subpath_start = corners[0];
                }
                PathOp::Close => {
                    segments.push((current, subpath_start));
                    current = subpath_start;
                }
            }
        }

        self.page.edges.extend(
            segments
                .into_iter()
                .filter_map(|(start, end)| edge_from_segment(start, end)),
        );
    }
}

impl OutputDev for LayoutCollector {
    fn begin_page(
        &mut self,
        _page_num: u32,
        _media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> Result<(), OutputError> {
        self.page = PageLayout::default();
        self.run = None;
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), OutputError> {
        self.flush_run();
        self.pages.push(std::mem::take(&mut self.page));
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        _spacing: f64,
        font_size: f64,
        char: &str,
    ) -> Result<(), OutputError> {
        let (x, y) = (trm.m31, trm.m32);
        let advance = width * font_size * trm.m11.hypot(trm.m12);

        if let Some(run) = self.run.as_mut().filter(|run| run.continues_at(x, y)) {
            run.text.push_str(char);
            run.width = x + advance - run.x;
            return Ok(());
        }

        self.flush_run();
        self.run = Some(TextFragment {
            x,
            y,
            width: advance,
            font_size: font_size * trm.m21.hypot(trm.m22),
            text: char.to_string(),
        });
        Ok(())
    }

    fn begin_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> Result<(), OutputError> {
        self.flush_run();
        Ok(())
    }

    fn end_line(&mut self) -> Result<(), OutputError> {
        self.flush_run();
        Ok(())
    }

    fn stroke(
        &mut self,
        ctm: &Transform,
        _colorspace: &ColorSpace,
        _color: &[f64],
        path: &Path,
    ) -> Result<(), OutputError> {
        self.collect_edges(ctm, path);
        Ok(())
    }

    fn fill(
        &mut self,
        ctm: &Transform,
        _colorspace: &ColorSpace,
        _color: &[f64],
        path: &Path,
    ) -> Result<(), OutputError> {
        self.collect_edges(ctm, path);
        Ok(())
    }
}

fn edge_from_segment(start: (f64, f64), end: (f64, f64)) -> Option<Edge> {
    let ((x0, y0), (x1, y1)) = (start, end);
    let (dx, dy) = ((x1 - x0).abs(), (y1 - y0).abs());

    if dy <= MAX_EDGE_SLANT && dx >= MIN_EDGE_LENGTH {
        return Some(Edge::Horizontal {
            y: (y0 + y1) / 2.0,
            x0: x0.min(x1),
            x1: x0.max(x1),
        });
    }
    if dx <= MAX_EDGE_SLANT && dy >= MIN_EDGE_LENGTH {
        return Some(Edge::Vertical {
            x: (x0 + x1) / 2.0,
            y0: y0.min(y1),
            y1: y0.max(y1),
        });
    }
    None
}
