use approx::assert_relative_eq;
use certstat::api::{LineChart, LineChartOptions, RedrawOutcome};
use certstat::core::{AxisUnit, BackingSize, Series};
use certstat::render::{Color, DrawingSurface, HeadlessSurface, TextHAlign};

fn years(count: usize) -> Vec<String> {
    (0..count).map(|i| (2019 + i).to_string()).collect()
}

fn series(points: &[Option<f64>]) -> Series {
    Series::new("응시자수", points.to_vec(), Color::rgba(0.2, 0.8, 0.5, 1.0))
}

fn chart(categories: usize) -> LineChart<HeadlessSurface> {
    LineChart::new(
        HeadlessSurface::new(640, 320),
        years(categories),
        LineChartOptions::default(),
    )
    .expect("line chart init")
}

#[test]
fn gaps_break_the_line_into_isolated_markers() {
    let mut chart = chart(5);
    let outcome = chart
        .set_datasets(vec![series(&[Some(12.0), None, Some(8.0), None, Some(5.0)])])
        .expect("set datasets");
    assert_eq!(outcome, RedrawOutcome::Drawn);

    let frame = chart.surface().last_frame().expect("presented frame");
    assert!(frame.paths.is_empty(), "no segment may cross a gap");
    assert_eq!(frame.circles.len(), 3);

    // plot: left 64, top 28, width 552, height 252; axis 0..12
    let first = frame.circles[0];
    assert_relative_eq!(first.cx, 64.0);
    assert_relative_eq!(first.cy, 28.0);
    let last = frame.circles[2];
    assert_relative_eq!(last.cx, 64.0 + 552.0);
    assert_relative_eq!(last.cy, 280.0 - 5.0 / 12.0 * 252.0);
}

#[test]
fn contiguous_runs_are_stroked_separately() {
    let mut chart = chart(5);
    chart
        .set_datasets(vec![series(&[
            Some(10.0),
            Some(20.0),
            None,
            Some(30.0),
            Some(40.0),
        ])])
        .expect("set datasets");

    let frame = chart.surface().last_frame().expect("presented frame");
    assert_eq!(frame.paths.len(), 2);
    assert!(frame.paths.iter().all(|path| path.points.len() == 2));
    assert_eq!(frame.circles.len(), 4);
    assert_relative_eq!(frame.paths[1].points[0].0, 64.0 + 3.0 * 138.0);
}

#[test]
fn value_axis_labels_follow_unit() {
    let mut chart = chart(3);
    chart
        .set_datasets(vec![series(&[Some(12.0), Some(6.0), None])])
        .expect("set datasets");

    let frame = chart.surface().last_frame().expect("presented frame");
    let tick_labels: Vec<&str> = frame
        .texts
        .iter()
        .filter(|text| text.h_align == TextHAlign::Right)
        .map(|text| text.text.as_str())
        .collect();
    assert_eq!(tick_labels, vec!["0명", "3명", "6명", "9명", "12명"]);
    assert_eq!(frame.lines.len(), 5);

    let category_labels: Vec<&str> = frame
        .texts
        .iter()
        .filter(|text| text.h_align == TextHAlign::Center)
        .map(|text| text.text.as_str())
        .collect();
    assert_eq!(category_labels, vec!["2019", "2020", "2021"]);
}

#[test]
fn percent_chart_keeps_full_range_without_data() {
    let options = LineChartOptions::default()
        .with_unit(AxisUnit::Percent)
        .with_suggested_max(Some(100.0));
    let mut chart = LineChart::new(HeadlessSurface::new(640, 320), years(3), options)
        .expect("line chart init");
    chart
        .set_datasets(vec![series(&[None, None, None])])
        .expect("set datasets");

    assert!(!chart.has_data());
    assert_eq!(chart.axis().max, 100.0);
    let frame = chart.surface().last_frame().expect("grid still drawn");
    assert!(frame.circles.is_empty());
    assert_eq!(frame.texts[0].text, "0.0%");
    assert_eq!(frame.texts[4].text, "100.0%");
}

#[test]
fn single_category_sits_at_plot_midpoint() {
    let mut chart = chart(1);
    chart
        .set_datasets(vec![series(&[Some(4.0)])])
        .expect("set datasets");

    let frame = chart.surface().last_frame().expect("presented frame");
    assert!(frame.paths.is_empty());
    assert_eq!(frame.circles.len(), 1);
    assert_relative_eq!(frame.circles[0].cx, 64.0 + 276.0);
}

#[test]
fn series_are_aligned_to_category_count() {
    let mut chart = chart(3);
    chart
        .set_datasets(vec![
            series(&[Some(1.0)]),
            series(&[Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
        ])
        .expect("set datasets");

    assert!(chart.series().iter().all(|series| series.points.len() == 3));
    assert_eq!(chart.series()[0].points, vec![Some(1.0), None, None]);
    assert_eq!(chart.legend().len(), 2);
}

#[test]
fn non_finite_points_are_treated_as_missing() {
    let mut chart = chart(3);
    chart
        .set_datasets(vec![series(&[Some(f64::NAN), Some(f64::INFINITY), None])])
        .expect("set datasets");

    assert!(!chart.has_data());
    assert!(chart.series()[0].points.iter().all(Option::is_none));
}

#[test]
fn hand_built_series_with_only_non_finite_points_has_no_data() {
    let mut chart = chart(3);
    let raw = Series {
        label: "합격률".to_owned(),
        points: vec![Some(f64::NAN), Some(f64::INFINITY), Some(f64::NEG_INFINITY)],
        color: Color::rgba(0.9, 0.3, 0.3, 1.0),
    };
    chart.set_datasets(vec![raw]).expect("set datasets");

    assert!(!chart.has_data());
    assert!(chart.series()[0].points.iter().all(Option::is_none));
    let frame = chart.surface().last_frame().expect("presented frame");
    assert!(frame.paths.is_empty());
    assert!(frame.circles.is_empty());
}

#[test]
fn each_series_gets_its_own_paint_layer() {
    let mut chart = chart(3);
    chart
        .set_datasets(vec![
            series(&[Some(1.0), Some(2.0), Some(3.0)]),
            series(&[Some(3.0), None, Some(1.0)]),
        ])
        .expect("set datasets");

    let frame = chart.surface().last_frame().expect("presented frame");
    assert_eq!(frame.layer_count(), 2);
    assert_eq!(frame.layer_paths(0).count(), 1);
    assert_eq!(frame.layer_circles(0).count(), 3);
    assert_eq!(frame.layer_paths(1).count(), 0);
    assert_eq!(frame.layer_circles(1).count(), 2);
}

#[test]
fn redraw_is_idempotent() {
    let mut chart = chart(4);
    chart
        .set_datasets(vec![series(&[Some(3.0), Some(9.0), None, Some(1.0)])])
        .expect("set datasets");
    let first = chart.surface().last_frame().cloned().expect("first frame");

    chart.redraw().expect("redraw");
    chart.redraw().expect("redraw");
    let again = chart.surface().last_frame().cloned().expect("later frame");

    assert_eq!(first, again);
    assert_eq!(chart.surface().presented_count(), 3);
}

#[test]
fn backing_buffer_follows_pixel_ratio_and_resizes_once() {
    let surface = HeadlessSurface::new(400, 200).with_pixel_ratio(2.0);
    let mut chart =
        LineChart::new(surface, years(3), LineChartOptions::default()).expect("line chart init");

    chart
        .set_datasets(vec![series(&[Some(1.0), Some(2.0), Some(3.0)])])
        .expect("set datasets");
    chart.redraw().expect("redraw");
    chart.redraw().expect("redraw");
    assert_eq!(chart.surface().backing_size(), BackingSize::new(800, 400));
    assert_eq!(chart.surface().backing_resize_count(), 1);

    let frame = chart.surface().last_frame().expect("presented frame");
    assert_eq!(frame.pixel_ratio, 2.0);

    chart.surface_mut().set_pixel_ratio(3.0);
    chart.redraw().expect("redraw");
    assert_eq!(chart.surface().backing_size(), BackingSize::new(1200, 600));
    assert_eq!(chart.surface().backing_resize_count(), 2);
}

#[test]
fn invalid_pixel_ratio_falls_back_to_one() {
    let surface = HeadlessSurface::new(300, 150).with_pixel_ratio(f64::NAN);
    let mut chart =
        LineChart::new(surface, years(2), LineChartOptions::default()).expect("line chart init");
    chart.redraw().expect("redraw");
    assert_eq!(chart.surface().backing_size(), BackingSize::new(300, 150));
}

#[test]
fn unlaid_out_surface_is_not_ready() {
    let mut chart = LineChart::new(HeadlessSurface::default(), years(3), LineChartOptions::default())
        .expect("line chart init");
    let outcome = chart
        .set_datasets(vec![series(&[Some(1.0), Some(2.0), Some(3.0)])])
        .expect("set datasets");

    assert_eq!(outcome, RedrawOutcome::NotReady);
    assert!(chart.has_data());
    assert_eq!(chart.surface().presented_count(), 0);

    chart.surface_mut().set_logical_size(320, 200);
    assert_eq!(chart.redraw().expect("redraw"), RedrawOutcome::Drawn);
    assert_eq!(chart.surface().presented_count(), 1);
}

#[test]
fn options_reject_zero_tick_count() {
    let result = LineChart::new(
        HeadlessSurface::new(100, 100),
        years(2),
        LineChartOptions::default().with_tick_count(0),
    );
    assert!(result.is_err());
}
