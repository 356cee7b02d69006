//! Raster surface backed by a `tiny_skia::Pixmap`.
//!
//! The backing store is `dims * device_pixel_ratio` pixels; every operation is
//! drawn through a scale transform so callers keep working in logical units.
//! Glyphs are rasterized with rusttype and blended straight into the pixmap.

use crate::charts::geometry::{ChartError, Dimensions, Point, Rect};
use crate::charts::surface::{
    ColorStop, FontWeight, Paint, Path, PathSegment, Surface, TextAlign, TextStyle,
};
use crate::theme::Color;
use image::{ImageBuffer, RgbaImage};
use log::debug;
use rusttype::{Font, Scale};
use std::f64::consts::{FRAC_PI_2, TAU};
use std::path::Path as FsPath;
use tiny_skia::{
    FillRule, GradientStop, LinearGradient, PathBuilder, Pixmap, RadialGradient, Shader,
    SpreadMode, Stroke, Transform,
};

/// Preferred families, first match wins.
const FONT_FAMILIES: [fontdb::Family<'static>; 5] = [
    fontdb::Family::Name("Inter"),
    fontdb::Family::Name("DejaVu Sans"),
    fontdb::Family::Name("Liberation Sans"),
    fontdb::Family::Name("Arial"),
    fontdb::Family::SansSerif,
];

/// Regular and (optionally) bold faces used for chart labels.
#[derive(Clone)]
pub struct Fonts {
    regular: Font<'static>,
    bold: Option<Font<'static>>,
}

impl Fonts {
    pub fn from_bytes(data: Vec<u8>) -> Option<Self> {
        let regular = Font::try_from_vec(data)?;
        Some(Self {
            regular,
            bold: None,
        })
    }

    /// Load a TTF/OTF file as the regular face.
    pub fn from_file(path: &FsPath) -> std::io::Result<Option<Self>> {
        Ok(Self::from_bytes(std::fs::read(path)?))
    }

    /// Look up a sans-serif face among the installed system fonts.
    pub fn load_system() -> Option<Self> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();

        let regular = Self::query(&db, fontdb::Weight::NORMAL)?;
        let bold = Self::query(&db, fontdb::Weight::BOLD);
        debug!(
            "Loaded system fonts ({} faces scanned, bold face {})",
            db.len(),
            if bold.is_some() { "found" } else { "missing" }
        );
        Some(Self { regular, bold })
    }

    fn query(db: &fontdb::Database, weight: fontdb::Weight) -> Option<Font<'static>> {
        let query = fontdb::Query {
            families: &FONT_FAMILIES,
            weight,
            ..fontdb::Query::default()
        };
        let id = db.query(&query)?;
        db.with_face_data(id, |data, index| {
            Font::try_from_vec_and_index(data.to_vec(), index)
        })
        .flatten()
    }

    fn face(&self, weight: FontWeight) -> &Font<'static> {
        match weight {
            FontWeight::Bold => self.bold.as_ref().unwrap_or(&self.regular),
            FontWeight::Regular => &self.regular,
        }
    }
}

/// An owned raster drawing surface.
pub struct PixmapSurface {
    pixmap: Pixmap,
    dims: Dimensions,
    fonts: Option<Fonts>,
}

impl PixmapSurface {
    /// A transparent surface. Without fonts, text operations draw nothing.
    pub fn new(dims: Dimensions) -> Result<Self, ChartError> {
        if !(dims.device_pixel_ratio.is_finite() && dims.device_pixel_ratio > 0.0) {
            return Err(dims.too_small());
        }
        let (width, height) = dims.backing_size();
        let pixmap = Pixmap::new(width, height).ok_or_else(|| dims.too_small())?;
        Ok(Self {
            pixmap,
            dims,
            fonts: None,
        })
    }

    pub fn with_fonts(mut self, fonts: Option<Fonts>) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn pixel_width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn pixel_height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Raw premultiplied RGBA bytes.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Straight-alpha copy for encoding or uploading as a texture.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let width = self.pixmap.width();
        let pixels = self.pixmap.pixels();
        ImageBuffer::from_fn(width, self.pixmap.height(), |x, y| {
            let c = pixels[(y * width + x) as usize].demultiply();
            image::Rgba([c.red(), c.green(), c.blue(), c.alpha()])
        })
    }

    fn transform(&self) -> Transform {
        let ratio = self.dims.device_pixel_ratio as f32;
        Transform::from_scale(ratio, ratio)
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.pixmap.width() || y >= self.pixmap.height() {
            return;
        }

        let alpha = coverage.clamp(0.0, 1.0) * f32::from(color.a) / 255.0;
        if alpha <= 0.0 {
            return;
        }
        let idx = ((y * self.pixmap.width() + x) * 4) as usize;
        let data = self.pixmap.data_mut();
        let src = [color.r, color.g, color.b];
        for (channel, value) in src.iter().enumerate() {
            let dst = f32::from(data[idx + channel]);
            let out = f32::from(*value) * alpha + dst * (1.0 - alpha);
            data[idx + channel] = out.round().min(255.0) as u8;
        }
        let dst_a = f32::from(data[idx + 3]);
        let out_a = (alpha * 255.0 + dst_a * (1.0 - alpha)).round().min(255.0) as u8;
        data[idx + 3] = out_a;
        // Keep the premultiplied invariant (channel <= alpha).
        for channel in 0..3 {
            data[idx + channel] = data[idx + channel].min(out_a);
        }
    }
}

fn skia_color(c: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn skia_point(p: Point) -> tiny_skia::Point {
    tiny_skia::Point::from_xy(p.x as f32, p.y as f32)
}

fn skia_stops(stops: &[ColorStop]) -> Vec<GradientStop> {
    stops
        .iter()
        .map(|s| GradientStop::new(s.offset as f32, skia_color(s.color)))
        .collect()
}

fn shader(paint: &Paint) -> Shader<'static> {
    let fallback = |stops: &[ColorStop]| {
        stops
            .first()
            .map(|s| Shader::SolidColor(skia_color(s.color)))
            .unwrap_or(Shader::SolidColor(tiny_skia::Color::TRANSPARENT))
    };

    match paint {
        Paint::Solid(color) => Shader::SolidColor(skia_color(*color)),
        Paint::LinearGradient { start, end, stops } => LinearGradient::new(
            skia_point(*start),
            skia_point(*end),
            skia_stops(stops),
            SpreadMode::Pad,
            Transform::identity(),
        )
        .unwrap_or_else(|| fallback(stops)),
        Paint::RadialGradient {
            center,
            radius,
            stops,
        } => RadialGradient::new(
            skia_point(*center),
            skia_point(*center),
            *radius as f32,
            skia_stops(stops),
            SpreadMode::Pad,
            Transform::identity(),
        )
        .unwrap_or_else(|| fallback(stops)),
    }
}

fn skia_paint(paint: &Paint) -> tiny_skia::Paint<'static> {
    let mut out = tiny_skia::Paint::default();
    out.shader = shader(paint);
    out.anti_alias = true;
    out
}

/// Append a clockwise arc as cubic Béziers, at most a quarter turn each.
fn push_arc(
    pb: &mut PathBuilder,
    has_current: bool,
    center: Point,
    radius: f64,
    start: f64,
    end: f64,
) {
    let sweep = (end - start).clamp(0.0, TAU);
    let first = center.polar(start, radius);
    if has_current {
        pb.line_to(first.x as f32, first.y as f32);
    } else {
        pb.move_to(first.x as f32, first.y as f32);
    }
    if sweep <= 0.0 || radius <= 0.0 {
        return;
    }

    let pieces = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / pieces as f64;
    let k = 4.0 / 3.0 * (step / 4.0).tan() * radius;
    for i in 0..pieces {
        let a0 = start + step * i as f64;
        let a1 = a0 + step;
        let p0 = center.polar(a0, radius);
        let p3 = center.polar(a1, radius);
        let c1 = Point::new(p0.x - k * a0.sin(), p0.y + k * a0.cos());
        let c2 = Point::new(p3.x + k * a1.sin(), p3.y - k * a1.cos());
        pb.cubic_to(
            c1.x as f32,
            c1.y as f32,
            c2.x as f32,
            c2.y as f32,
            p3.x as f32,
            p3.y as f32,
        );
    }
}

fn skia_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    let mut has_current = false;
    for segment in path.segments() {
        match *segment {
            PathSegment::MoveTo(p) => {
                pb.move_to(p.x as f32, p.y as f32);
                has_current = true;
            }
            PathSegment::LineTo(p) => {
                if has_current {
                    pb.line_to(p.x as f32, p.y as f32);
                } else {
                    pb.move_to(p.x as f32, p.y as f32);
                }
                has_current = true;
            }
            PathSegment::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => {
                push_arc(&mut pb, has_current, center, radius, start_angle, end_angle);
                has_current = true;
            }
            PathSegment::Close => pb.close(),
        }
    }
    pb.finish()
}

/// Width of `text` in device pixels at `scale`.
fn measure(font: &Font<'_>, scale: Scale, text: &str) -> f32 {
    font.layout(text, scale, rusttype::point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

impl Surface for PixmapSurface {
    fn dimensions(&self) -> Dimensions {
        self.dims
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        let Some(path) = skia_path(path) else {
            return;
        };
        let transform = self.transform();
        self.pixmap
            .fill_path(&path, &skia_paint(paint), FillRule::Winding, transform, None);
    }

    fn stroke_path(&mut self, path: &Path, color: Color, width: f64) {
        let Some(path) = skia_path(path) else {
            return;
        };
        let stroke = Stroke {
            width: width as f32,
            ..Stroke::default()
        };
        let transform = self.transform();
        self.pixmap.stroke_path(
            &path,
            &skia_paint(&Paint::Solid(color)),
            &stroke,
            transform,
            None,
        );
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        let Some(rect) = tiny_skia::Rect::from_xywh(
            rect.x as f32,
            rect.y as f32,
            rect.width as f32,
            rect.height as f32,
        ) else {
            return;
        };
        let transform = self.transform();
        self.pixmap
            .fill_rect(rect, &skia_paint(paint), transform, None);
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        let Some(fonts) = self.fonts.as_ref() else {
            return;
        };
        let font = fonts.face(style.weight).clone();
        let ratio = self.dims.device_pixel_ratio as f32;
        let scale = Scale::uniform(style.size as f32 * ratio);

        let width = measure(&font, scale, text);
        let x = at.x as f32 * ratio;
        let x = match style.align {
            TextAlign::Left => x,
            TextAlign::Center => x - width / 2.0,
            TextAlign::Right => x - width,
        };
        let baseline = at.y as f32 * ratio;

        for glyph in font.layout(text, scale, rusttype::point(x, baseline)) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                self.blend_pixel(bb.min.x + gx as i32, bb.min.y + gy as i32, style.color, coverage);
            });
        }
    }
}
