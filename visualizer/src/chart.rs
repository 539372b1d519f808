use iced::{
    mouse,
    widget::canvas::{self, Frame, Geometry, Path, Stroke},
    Color, Pixels, Point, Rectangle, Renderer, Size, Theme,
};
use wavecore::chart::{
    nearest_by_distance, nearest_by_x, payload_config, ChartConfig, ChartPoint, TooltipItem,
    WAVE_SERIES,
};

const PADDING: f32 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartStyle {
    Line,
    Scatter,
}

/// Maps data coordinates onto the padded drawing area of a canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
    size: Size,
}

impl PlotArea {
    /// `None` when no point has finite coordinates.
    pub fn fit(points: &[ChartPoint], size: Size) -> Option<Self> {
        let finite = points
            .iter()
            .filter(|point| point.x.is_finite() && point.y.is_finite());
        let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
        for point in finite {
            min_x = min_x.min(point.x);
            max_x = max_x.max(point.x);
            min_y = min_y.min(point.y);
            max_y = max_y.max(point.y);
        }
        if !min_x.is_finite() {
            return None;
        }
        // Flat series still get a visible band.
        if max_y - min_y < f64::EPSILON {
            min_y -= 1.0;
            max_y += 1.0;
        }
        if max_x - min_x < f64::EPSILON {
            max_x = min_x + 1.0;
        }
        Some(Self {
            min_x,
            max_x,
            min_y,
            max_y,
            size,
        })
    }

    fn inner(&self) -> (f64, f64) {
        (
            (self.size.width - 2.0 * PADDING).max(1.0) as f64,
            (self.size.height - 2.0 * PADDING).max(1.0) as f64,
        )
    }

    pub fn to_screen(&self, point: &ChartPoint) -> Point {
        let (width, height) = self.inner();
        let nx = (point.x - self.min_x) / (self.max_x - self.min_x);
        let ny = (point.y - self.min_y) / (self.max_y - self.min_y);
        Point::new(
            PADDING + (nx * width) as f32,
            PADDING + ((1.0 - ny) * height) as f32,
        )
    }

    pub fn to_data(&self, position: Point) -> (f64, f64) {
        let (width, height) = self.inner();
        let nx = (position.x - PADDING) as f64 / width;
        let ny = 1.0 - (position.y - PADDING) as f64 / height;
        (
            self.min_x + nx * (self.max_x - self.min_x),
            self.min_y + ny * (self.max_y - self.min_y),
        )
    }

    /// Screen pixels per data unit on each axis.
    pub fn pixel_scale(&self) -> (f64, f64) {
        let (width, height) = self.inner();
        (
            width / (self.max_x - self.min_x),
            height / (self.max_y - self.min_y),
        )
    }

    pub fn zero_line(&self) -> Option<f32> {
        if self.min_y <= 0.0 && self.max_y >= 0.0 {
            Some(self.to_screen(&ChartPoint { x: self.min_x, y: 0.0 }).y)
        } else {
            None
        }
    }
}

pub trait TooltipPicker {
    fn pick(&self, points: &[ChartPoint], plot: &PlotArea, cursor: Point) -> Option<usize>;
}

/// Line-chart tooltip: the sample under the cursor's x position.
pub struct ChartTooltip;

impl TooltipPicker for ChartTooltip {
    fn pick(&self, points: &[ChartPoint], plot: &PlotArea, cursor: Point) -> Option<usize> {
        let (x, _) = plot.to_data(cursor);
        nearest_by_x(points, x)
    }
}

/// Scatter tooltip: the dot nearest to the cursor on screen.
pub struct ScatterTooltip;

impl TooltipPicker for ScatterTooltip {
    fn pick(&self, points: &[ChartPoint], plot: &PlotArea, cursor: Point) -> Option<usize> {
        let (x, y) = plot.to_data(cursor);
        nearest_by_distance(points, x, y, plot.pixel_scale())
    }
}

/// Canvas program that plots one series and a hover tooltip.
pub struct ChartContainer {
    points: Vec<ChartPoint>,
    config: ChartConfig,
    style: ChartStyle,
}

impl ChartContainer {
    pub fn new(points: Vec<ChartPoint>, config: ChartConfig, style: ChartStyle) -> Self {
        Self {
            points,
            config,
            style,
        }
    }

    fn picker(&self) -> &dyn TooltipPicker {
        match self.style {
            ChartStyle::Line => &ChartTooltip,
            ChartStyle::Scatter => &ScatterTooltip,
        }
    }

    fn series_color(&self) -> (String, Color) {
        let item = TooltipItem::for_series(WAVE_SERIES);
        payload_config(&self.config, &item, "dataKey")
            .map(|series| {
                (
                    series.label.clone(),
                    parse_hex(&series.color).unwrap_or(Color::WHITE),
                )
            })
            .unwrap_or_else(|| (WAVE_SERIES.to_string(), Color::WHITE))
    }
}

impl<Message> canvas::Program<Message> for ChartContainer {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &canvas::Event,
        _bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        match event {
            canvas::Event::Mouse(mouse::Event::CursorMoved { .. })
            | canvas::Event::Mouse(mouse::Event::CursorLeft) => {
                Some(canvas::Action::request_redraw())
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.05, 0.05, 0.05),
        );

        let Some(plot) = PlotArea::fit(&self.points, bounds.size()) else {
            return vec![frame.into_geometry()];
        };
        let (label, color) = self.series_color();

        if let Some(y) = plot.zero_line() {
            let axis = Path::line(Point::new(PADDING, y), Point::new(bounds.width - PADDING, y));
            frame.stroke(
                &axis,
                Stroke::default()
                    .with_width(1.0)
                    .with_color(Color::from_rgb(0.3, 0.3, 0.35)),
            );
        }

        match self.style {
            ChartStyle::Line => {
                let path = Path::new(|builder| {
                    for run in finite_runs(&self.points) {
                        let mut screen = run.iter().map(|point| plot.to_screen(point));
                        if let Some(start) = screen.next() {
                            builder.move_to(start);
                        }
                        for next in screen {
                            builder.line_to(next);
                        }
                    }
                });
                frame.stroke(&path, Stroke::default().with_width(2.5).with_color(color));
            }
            ChartStyle::Scatter => {
                for point in finite_runs(&self.points).into_iter().flatten() {
                    let marker = Path::circle(plot.to_screen(point), 2.5);
                    frame.fill(&marker, color);
                }
            }
        }

        if let Some(position) = cursor.position_in(bounds) {
            if let Some(idx) = self.picker().pick(&self.points, &plot, position) {
                let point = self.points[idx];
                let anchor = plot.to_screen(&point);
                frame.fill(&Path::circle(anchor, 4.5), Color::from_rgb(0.95, 0.55, 0.2));
                frame.fill_text(canvas::Text {
                    content: format!("t={:.2}s  {}={:.4}", point.x, label, point.y),
                    position: Point::new(PADDING, 2.0),
                    color: Color::from_rgb(0.9, 0.9, 0.9),
                    size: Pixels(12.0),
                    ..canvas::Text::default()
                });
            }
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if cursor.is_over(bounds) {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}

/// Splits the series at non-finite points so gaps are not stroked.
fn finite_runs(points: &[ChartPoint]) -> Vec<&[ChartPoint]> {
    points
        .split(|point| !point.x.is_finite() || !point.y.is_finite())
        .filter(|run| !run.is_empty())
        .collect()
}

/// `#rrggbb` -> color.
fn parse_hex(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    Some(Color::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
