use std::path::Path;

use anyhow::{Context, Result, bail};
use plotters::coord::CoordTranslate;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::results::{AveragedRecord, load_and_average, speedup_series};

// Canvas matches the 12x8 inch figures the benchmark reports have always used.
const CANVAS_SIZE: (u32, u32) = (1200, 800);

const TITLE_FONT_SIZE: u32 = 36;
const AXIS_LABEL_FONT_SIZE: u32 = 22;
const TICK_LABEL_FONT_SIZE: u32 = 18;
const LEGEND_FONT_SIZE: u32 = 20;

const MARKER_SIZE: i32 = 4;
const LINE_WIDTH: u32 = 2;

const X_DESC: &str = "Array Size (multiples of M, where M=50MB)";

/// Mean execution time per algorithm at each multiplier, linear scale.
pub fn time_comparison(
    mergesort_csv: &Path,
    quicksort_csv: &Path,
    output_dir: &Path,
) -> Result<()> {
    let merge = sorted_averages(mergesort_csv)?;
    let quick = sorted_averages(quicksort_csv)?;

    let merge_times: Vec<(f64, f64)> = merge
        .iter()
        .map(|r| (r.multiplier as f64, r.time))
        .collect();
    let quick_times: Vec<(f64, f64)> = quick
        .iter()
        .map(|r| (r.multiplier as f64, r.time))
        .collect();

    let (x_min, x_max) = multiplier_range(&[&merge, &quick]);
    let max_time = merge_times
        .iter()
        .chain(&quick_times)
        .map(|&(_, t)| t)
        .fold(0.0_f64, |a, b| a.max(b));

    let path = output_dir.join("time_comparison.png");
    let root = BitMapBackend::new(&path, CANVAS_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Average Execution Time vs Array Size",
            ("sans-serif", TITLE_FONT_SIZE),
        )
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, 0.0..(max_time * 1.1).max(1e-6))?;

    chart
        .configure_mesh()
        .x_desc(X_DESC)
        .y_desc("Execution Time (seconds)")
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()?;

    draw_line_with_markers(&mut chart, &merge_times, BLUE, "MergeSort")?;
    draw_line_with_markers(&mut chart, &quick_times, RED, "QuickSort")?;

    draw_legend(&mut chart)?;
    root.present()?;
    println!("Generated: {}", path.display());
    Ok(())
}

/// Mean total disk operations (reads + writes) per algorithm, log scale.
pub fn disk_operations(
    mergesort_csv: &Path,
    quicksort_csv: &Path,
    output_dir: &Path,
) -> Result<()> {
    let merge = sorted_averages(mergesort_csv)?;
    let quick = sorted_averages(quicksort_csv)?;

    let merge_ops: Vec<(f64, f64)> = merge
        .iter()
        .map(|r| (r.multiplier as f64, r.disk_ops()))
        .collect();
    let quick_ops: Vec<(f64, f64)> = quick
        .iter()
        .map(|r| (r.multiplier as f64, r.disk_ops()))
        .collect();

    let (x_min, x_max) = multiplier_range(&[&merge, &quick]);
    let (y_min, y_max) = log_range(merge_ops.iter().chain(&quick_ops).map(|&(_, y)| y))?;

    let path = output_dir.join("disk_operations_comparison.png");
    let root = BitMapBackend::new(&path, CANVAS_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Average Disk Operations vs Array Size (Log Scale)",
            ("sans-serif", TITLE_FONT_SIZE),
        )
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(100)
        .build_cartesian_2d(x_min..x_max, (y_min..y_max).log_scale())?;

    chart
        .configure_mesh()
        .x_desc(X_DESC)
        .y_desc("Number of Disk Operations (log scale)")
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()?;

    draw_line_with_markers(&mut chart, &merge_ops, BLUE, "MergeSort")?;
    draw_line_with_markers(&mut chart, &quick_ops, RED, "QuickSort")?;

    draw_legend(&mut chart)?;
    root.present()?;
    println!("Generated: {}", path.display());
    Ok(())
}

/// Mean disk reads and writes as separate series per algorithm, log scale.
/// Reads are drawn solid, writes dashed.
pub fn detailed_disk_operations(
    mergesort_csv: &Path,
    quicksort_csv: &Path,
    output_dir: &Path,
) -> Result<()> {
    let merge = sorted_averages(mergesort_csv)?;
    let quick = sorted_averages(quicksort_csv)?;

    let reads = |records: &[AveragedRecord]| -> Vec<(f64, f64)> {
        records
            .iter()
            .map(|r| (r.multiplier as f64, r.disk_reads))
            .collect()
    };
    let writes = |records: &[AveragedRecord]| -> Vec<(f64, f64)> {
        records
            .iter()
            .map(|r| (r.multiplier as f64, r.disk_writes))
            .collect()
    };

    let series = [
        (reads(&merge), BLUE, false, "MergeSort Reads"),
        (writes(&merge), BLUE, true, "MergeSort Writes"),
        (reads(&quick), RED, false, "QuickSort Reads"),
        (writes(&quick), RED, true, "QuickSort Writes"),
    ];

    let (x_min, x_max) = multiplier_range(&[&merge, &quick]);
    let (y_min, y_max) = log_range(
        series
            .iter()
            .flat_map(|(points, ..)| points.iter().map(|&(_, y)| y)),
    )?;

    let path = output_dir.join("detailed_disk_operations.png");
    let root = BitMapBackend::new(&path, CANVAS_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Average Disk Reads and Writes vs Array Size (Log Scale)",
            ("sans-serif", TITLE_FONT_SIZE),
        )
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(100)
        .build_cartesian_2d(x_min..x_max, (y_min..y_max).log_scale())?;

    chart
        .configure_mesh()
        .x_desc(X_DESC)
        .y_desc("Number of Disk Operations (log scale)")
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()?;

    for (points, color, dashed, label) in &series {
        if *dashed {
            chart
                .draw_series(DashedLineSeries::new(
                    points.iter().copied(),
                    8,
                    6,
                    color.stroke_width(LINE_WIDTH),
                ))?
                .label(*label)
                .legend({
                    let color = *color;
                    move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH))
                    }
                });
            chart.draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), MARKER_SIZE, color.filled())),
            )?;
        } else {
            draw_line_with_markers(&mut chart, points, *color, label)?;
        }
    }

    draw_legend(&mut chart)?;
    root.present()?;
    println!("Generated: {}", path.display());
    Ok(())
}

/// Mergesort mean time divided by quicksort mean time at each common
/// multiplier, with a dashed reference line at ratio 1.
pub fn speedup_ratio(mergesort_csv: &Path, quicksort_csv: &Path, output_dir: &Path) -> Result<()> {
    let merge = sorted_averages(mergesort_csv)?;
    let quick = sorted_averages(quicksort_csv)?;

    let ratios = speedup_series(&merge, &quick)?;
    let points: Vec<(f64, f64)> = ratios
        .iter()
        .map(|&(multiplier, ratio)| (multiplier as f64, ratio))
        .collect();

    let x_min = points[0].0 - 0.5;
    let x_max = points[points.len() - 1].0 + 0.5;
    let max_ratio = points.iter().map(|&(_, r)| r).fold(0.0_f64, |a, b| a.max(b));

    let path = output_dir.join("speedup_ratio.png");
    let root = BitMapBackend::new(&path, CANVAS_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Algorithm Speedup Ratio (MergeSort time / QuickSort time)",
            ("sans-serif", TITLE_FONT_SIZE),
        )
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, 0.0..(max_ratio.max(1.0) * 1.2))?;

    chart
        .configure_mesh()
        .x_desc(X_DESC)
        .y_desc("Speedup Ratio")
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()?;

    // The ratio line itself is unlabeled; only the reference line gets a
    // legend entry.
    chart.draw_series(LineSeries::new(
        points.iter().copied(),
        GREEN.stroke_width(LINE_WIDTH),
    ))?;
    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), MARKER_SIZE, GREEN.filled())),
    )?;

    // Reference line: above it mergesort is slower, below it quicksort is.
    chart
        .draw_series(DashedLineSeries::new(
            vec![(x_min, 1.0), (x_max, 1.0)],
            8,
            6,
            RED.stroke_width(LINE_WIDTH),
        ))?
        .label("Equal performance")
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(LINE_WIDTH))
        });

    draw_legend(&mut chart)?;
    root.present()?;
    println!("Generated: {}", path.display());
    Ok(())
}

/// Load one results table, refuse empty data, and sort by multiplier so the
/// plotted lines connect points left to right.
fn sorted_averages(path: &Path) -> Result<Vec<AveragedRecord>> {
    let mut records =
        load_and_average(path).with_context(|| format!("cannot load {}", path.display()))?;
    if records.is_empty() {
        bail!("no data rows in {}", path.display());
    }
    records.sort_unstable_by_key(|r| r.multiplier);
    Ok(records)
}

fn multiplier_range(datasets: &[&[AveragedRecord]]) -> (f64, f64) {
    let mut min = u32::MAX;
    let mut max = 0;
    for records in datasets {
        for record in *records {
            min = min.min(record.multiplier);
            max = max.max(record.multiplier);
        }
    }
    (min as f64 - 0.5, max as f64 + 0.5)
}

/// Bounds for a log-scale axis over disk-operation counts. Zero counts are
/// clamped out of the lower bound since log(0) has no pixel.
fn log_range(values: impl Iterator<Item = f64> + Clone) -> Result<(f64, f64)> {
    let max = values.clone().fold(0.0_f64, |a, b| a.max(b));
    if max <= 0.0 {
        bail!("no positive disk operation counts to plot");
    }

    let min = values
        .filter(|&v| v > 0.0)
        .fold(f64::MAX, |a, b| a.min(b))
        .max(1.0)
        .min(max);

    Ok((min / 2.0, max * 2.0))
}

fn draw_line_with_markers<'a, DB, CT>(
    chart: &mut ChartContext<'a, DB, CT>,
    points: &[(f64, f64)],
    color: RGBColor,
    label: &str,
) -> Result<()>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
    CT: CoordTranslate<From = (f64, f64)>,
{
    chart
        .draw_series(LineSeries::new(
            points.iter().copied(),
            color.stroke_width(LINE_WIDTH),
        ))?
        .label(label)
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH))
        });

    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), MARKER_SIZE, color.filled())),
    )?;

    Ok(())
}

fn draw_legend<'a, DB, CT>(chart: &mut ChartContext<'a, DB, CT>) -> Result<()>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
    CT: CoordTranslate,
{
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", LEGEND_FONT_SIZE))
        .draw()?;
    Ok(())
}
