use std::fs;
use std::path::{Path, PathBuf};

use plotters::coord::ranged1d::SegmentValue;
use plotters::element::Pie;
use plotters::prelude::*;
use tracing::{info, warn};

use crate::error::FreightError;
use crate::visualization::charts::{slice_label, BarChart, Chart, ChartRenderer, PieChart};

const BAR_COLOR: RGBColor = RGBColor(70, 130, 180);
const NEGATIVE_BAR_COLOR: RGBColor = RGBColor(205, 92, 92);
const ON_TIME_COLOR: RGBColor = RGBColor(102, 179, 255);
const DELAYED_COLOR: RGBColor = RGBColor(255, 153, 153);

/// Writes each chart as an SVG file into a directory.
#[derive(Debug, Clone)]
pub struct SvgCharts {
    dir: PathBuf,
    width: u32,
    height: u32,
}

impl SvgCharts {
    pub fn new(dir: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            dir: dir.into(),
            width,
            height,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the chart will be written to.
    pub fn path_for(&self, chart: &Chart) -> PathBuf {
        self.dir.join(format!("{}.svg", chart.file_stem()))
    }

    /// Render one chart. Returns `None` when the chart has no data and was skipped.
    pub fn save(&self, chart: &Chart) -> Result<Option<PathBuf>, FreightError> {
        let has_data = match chart {
            Chart::Bar(bar) => bar.has_data(),
            Chart::Pie(pie) => pie.has_data(),
        };
        if !has_data {
            warn!(chart = chart.title(), "no data to plot, skipping chart");
            return Ok(None);
        }
        if let Chart::Bar(bar) = chart {
            if value_range(bar).is_none() {
                warn!(chart = chart.title(), "values too large to plot, skipping chart");
                return Ok(None);
            }
        }

        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(chart);
        match chart {
            Chart::Bar(bar) => self.draw_bar(bar, &path)?,
            Chart::Pie(pie) => self.draw_pie(pie, &path)?,
        }
        info!(path = %path.display(), "chart written");
        Ok(Some(path))
    }

    /// Render every chart in order, returning the files written.
    pub fn save_all(&self, charts: &[Chart]) -> Result<Vec<PathBuf>, FreightError> {
        let mut written = Vec::new();
        for chart in charts {
            if let Some(path) = self.save(chart)? {
                written.push(path);
            }
        }
        Ok(written)
    }

    fn draw_bar(&self, bar: &BarChart, path: &Path) -> Result<(), FreightError> {
        let root = SVGBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let (y_min, y_max) = value_range(bar).ok_or_else(|| {
            FreightError::Chart(format!("'{}' has no finite value range", bar.title))
        })?;
        let slots = bar.bars.len() as i32;
        let labels: Vec<&str> = bar.bars.iter().map(|b| b.label.as_str()).collect();

        let mut chart = ChartBuilder::on(&root)
            .caption(&bar.title, ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d((0..slots).into_segmented(), y_min..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(bar.bars.len())
            .x_label_formatter(&|v: &SegmentValue<i32>| match v {
                SegmentValue::CenterOf(i) => labels
                    .get(*i as usize)
                    .map(|l| l.to_string())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .x_desc(bar.x_label.as_str())
            .y_desc(bar.y_label.as_str())
            .draw()?;

        chart.draw_series(bar.bars.iter().enumerate().filter_map(|(i, b)| {
            let value = b.value?;
            let color = if value < 0.0 {
                NEGATIVE_BAR_COLOR
            } else {
                BAR_COLOR
            };
            let i = i as i32;
            let mut rect = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), value),
                ],
                color.filled(),
            );
            rect.set_margin(0, 0, 8, 8);
            Some(rect)
        }))?;

        root.present()?;
        Ok(())
    }

    fn draw_pie(&self, pie: &PieChart, path: &Path) -> Result<(), FreightError> {
        let root = SVGBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;
        let area = root.titled(&pie.title, ("sans-serif", 24))?;

        let (w, h) = area.dim_in_pixel();
        let center = (w as i32 / 2, h as i32 / 2);
        let radius = f64::from(w.min(h)) * 0.35;

        let sizes: Vec<f64> = pie.slices.iter().map(|s| s.percent).collect();
        let colors: Vec<RGBColor> = [ON_TIME_COLOR, DELAYED_COLOR]
            .into_iter()
            .cycle()
            .take(sizes.len())
            .collect();
        let labels: Vec<String> = pie.slices.iter().map(slice_label).collect();

        let mut element = Pie::new(&center, &radius, &sizes, &colors, &labels);
        element.start_angle(90.0);
        element.label_style(("sans-serif", 18).into_font().color(&BLACK));
        area.draw(&element)?;

        root.present()?;
        Ok(())
    }
}

impl ChartRenderer for SvgCharts {
    fn render(&self, chart: &Chart) -> Result<(), FreightError> {
        self.save(chart).map(|_| ())
    }
}

/// Y-axis range that always includes zero, padded by 10%.
///
/// `None` when a value is not finite or the span between the bounds
/// overflows, since the axis could not be laid out.
fn value_range(bar: &BarChart) -> Option<(f64, f64)> {
    let mut lo = 0.0f64;
    let mut hi = 0.0f64;
    for value in bar.bars.iter().filter_map(|b| b.value) {
        if !value.is_finite() {
            return None;
        }
        lo = lo.min(value);
        hi = hi.max(value);
    }
    if (hi - lo).abs() <= f64::EPSILON {
        return Some((lo - 1.0, hi + 1.0));
    }

    let pad = hi * 0.1 - lo * 0.1;
    let upper = Some(hi + pad).filter(|v| v.is_finite()).unwrap_or(hi);
    let lower = if lo < 0.0 {
        Some(lo - pad).filter(|v| v.is_finite()).unwrap_or(lo)
    } else {
        lo
    };
    (upper - lower).is_finite().then_some((lower, upper))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visualization::charts::{Bar, PieSlice};
    use tempfile::tempdir;

    fn sample_bar(values: &[Option<f64>]) -> BarChart {
        BarChart {
            file_stem: "volume".to_string(),
            title: "Shipment Volume by Carrier".to_string(),
            x_label: "Carrier Name".to_string(),
            y_label: "Number of Shipments".to_string(),
            bars: values
                .iter()
                .enumerate()
                .map(|(i, v)| Bar {
                    label: format!("C{i}"),
                    value: *v,
                })
                .collect(),
        }
    }

    #[test]
    fn test_value_range_includes_zero() {
        let (lo, hi) = value_range(&sample_bar(&[Some(10.0), Some(20.0)])).unwrap();
        assert_eq!(lo, 0.0);
        assert!((hi - 22.0).abs() < 1e-9);

        let (lo, hi) = value_range(&sample_bar(&[Some(-10.0), Some(10.0)])).unwrap();
        assert!((lo + 12.0).abs() < 1e-9);
        assert!((hi - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_value_range_degenerate() {
        let range = value_range(&sample_bar(&[Some(0.0)]));
        assert_eq!(range, Some((-1.0, 1.0)));
    }

    #[test]
    fn test_value_range_near_float_limits() {
        let (lo, hi) = value_range(&sample_bar(&[Some(1.7e308)])).unwrap();
        assert_eq!(lo, 0.0);
        assert_eq!(hi, 1.7e308);

        assert_eq!(value_range(&sample_bar(&[Some(-1.7e308), Some(1.7e308)])), None);
        assert_eq!(value_range(&sample_bar(&[Some(f64::INFINITY)])), None);
        assert_eq!(value_range(&sample_bar(&[Some(1.0), Some(f64::NAN)])), None);
    }

    #[test]
    fn test_unplottable_chart_skipped() {
        let dir = tempdir().unwrap();
        let renderer = SvgCharts::new(dir.path(), 600, 400);
        let chart = Chart::Bar(sample_bar(&[Some(-1.7e308), Some(1.7e308)]));
        assert!(renderer.save(&chart).unwrap().is_none());
        assert!(!dir.path().join("volume.svg").exists());
    }

    #[test]
    fn test_huge_bar_chart_written() {
        let dir = tempdir().unwrap();
        let renderer = SvgCharts::new(dir.path(), 600, 400);
        let chart = Chart::Bar(sample_bar(&[Some(1.7e308), Some(2.0)]));
        let path = renderer.save(&chart).unwrap().unwrap();
        assert!(std::fs::read_to_string(path).unwrap().contains("<svg"));
    }

    #[test]
    fn test_bar_chart_written() {
        let dir = tempdir().unwrap();
        let renderer = SvgCharts::new(dir.path().join("charts"), 800, 400);
        let chart = Chart::Bar(sample_bar(&[Some(3.0), None, Some(-1.5)]));

        let path = renderer.save(&chart).unwrap().unwrap();
        assert_eq!(path, dir.path().join("charts").join("volume.svg"));
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Shipment Volume by Carrier"));
    }

    #[test]
    fn test_pie_chart_written() {
        let dir = tempdir().unwrap();
        let renderer = SvgCharts::new(dir.path(), 600, 600);
        let chart = Chart::Pie(PieChart {
            file_stem: "status".to_string(),
            title: "Percentage of On-Time vs Delayed Shipments".to_string(),
            slices: vec![
                PieSlice {
                    label: "On-Time".to_string(),
                    percent: 75.0,
                },
                PieSlice {
                    label: "Delayed".to_string(),
                    percent: 25.0,
                },
            ],
        });

        let path = renderer.save(&chart).unwrap().unwrap();
        let svg = std::fs::read_to_string(path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Percentage of On-Time vs Delayed Shipments"));
    }

    #[test]
    fn test_empty_chart_skipped() {
        let dir = tempdir().unwrap();
        let renderer = SvgCharts::new(dir.path(), 600, 400);
        let chart = Chart::Bar(sample_bar(&[None, None]));
        assert!(renderer.save(&chart).unwrap().is_none());
        assert!(!dir.path().join("volume.svg").exists());
    }

    #[test]
    fn test_save_all_skips_empty() {
        let dir = tempdir().unwrap();
        let renderer = SvgCharts::new(dir.path(), 600, 400);
        let mut full = sample_bar(&[Some(1.0)]);
        full.file_stem = "full".to_string();
        let charts = vec![Chart::Bar(full), Chart::Bar(sample_bar(&[]))];
        let written = renderer.save_all(&charts).unwrap();
        assert_eq!(written, vec![dir.path().join("full.svg")]);
    }
}
