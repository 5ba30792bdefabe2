use approx::assert_relative_eq;
use certstat::core::{
    AxisUnit, LinearScale, Padding, PlotArea, Viewport, compute_axis, compute_bar_geometry,
    compute_category_positions,
};

#[test]
fn axis_starts_at_zero_and_reaches_pool_maximum() {
    let axis = compute_axis([12.0, 8.0, 5.0], None, 4, &AxisUnit::default());
    assert_eq!(axis.min, 0.0);
    assert_eq!(axis.max, 12.0);
    assert_eq!(axis.ticks(), vec![0.0, 3.0, 6.0, 9.0, 12.0]);
}

#[test]
fn suggested_max_acts_as_floor_not_cap() {
    let floored = compute_axis([40.0, 55.5], Some(100.0), 4, &AxisUnit::Percent);
    assert_eq!(floored.max, 100.0);

    let exceeded = compute_axis([40.0, 120.0], Some(100.0), 4, &AxisUnit::Percent);
    assert_eq!(exceeded.max, 120.0);
}

#[test]
fn non_positive_pools_fall_back_per_unit() {
    let zeros = compute_axis([0.0, 0.0], None, 4, &AxisUnit::count("명"));
    assert_eq!(zeros.max, 1.0);

    let negative = compute_axis([-3.0], None, 4, &AxisUnit::count("명"));
    assert_eq!(negative.max, 1.0);

    let percent = compute_axis([0.0], None, 4, &AxisUnit::Percent);
    assert_eq!(percent.max, 100.0);
}

#[test]
fn non_finite_values_and_suggestions_are_ignored() {
    let axis = compute_axis(
        [f64::NAN, 7.0, f64::INFINITY],
        Some(f64::NAN),
        4,
        &AxisUnit::default(),
    );
    assert_eq!(axis.max, 7.0);
}

#[test]
fn ticks_always_hold_tick_count_plus_one_entries() {
    for tick_count in 1..=8 {
        let axis = compute_axis([10.0], None, tick_count, &AxisUnit::default());
        let ticks = axis.ticks();
        assert_eq!(ticks.len(), tick_count + 1);
        assert_eq!(ticks.first().copied(), Some(0.0));
        assert_relative_eq!(ticks[tick_count], 10.0);
    }
}

#[test]
fn category_positions_span_plot_edge_to_edge() {
    assert!(compute_category_positions(0, 500.0).is_empty());
    assert_eq!(compute_category_positions(1, 500.0), vec![250.0]);
    assert_eq!(
        compute_category_positions(5, 400.0),
        vec![0.0, 100.0, 200.0, 300.0, 400.0]
    );
}

#[test]
fn bar_geometry_clamps_width_between_bounds() {
    let wide = compute_bar_geometry(1, 600.0);
    assert_eq!(wide.step, 600.0);
    assert_eq!(wide.bar_width, 64.0);
    assert_eq!(wide.center(0), 300.0);

    let medium = compute_bar_geometry(10, 600.0);
    assert_relative_eq!(medium.bar_width, 33.0);
    assert_relative_eq!(medium.center(3), 210.0);

    let narrow = compute_bar_geometry(100, 600.0);
    assert_eq!(narrow.bar_width, 12.0);

    let empty = compute_bar_geometry(0, 600.0);
    assert_eq!(empty.step, 600.0);
}

#[test]
fn padding_leaves_at_least_one_pixel_of_plot() {
    let padding = Padding::new(28.0, 24.0, 40.0, 64.0);
    let plot = padding.plot_area(Viewport::new(640, 320));
    assert_eq!(
        plot,
        PlotArea {
            left: 64.0,
            top: 28.0,
            width: 552.0,
            height: 252.0,
        }
    );

    let cramped = padding.plot_area(Viewport::new(50, 40));
    assert_eq!(cramped.width, 1.0);
    assert_eq!(cramped.height, 1.0);
}

#[test]
fn padding_rejects_negative_sides() {
    let err = Padding::new(0.0, -1.0, 0.0, 0.0)
        .validate()
        .expect_err("negative padding must fail");
    assert!(err.to_string().contains("right"));
}

#[test]
fn linear_scale_maps_axis_onto_inverted_y() {
    let axis = compute_axis([200.0], None, 4, &AxisUnit::default());
    let scale = LinearScale::from_axis(&axis);
    let plot = PlotArea {
        left: 10.0,
        top: 20.0,
        width: 300.0,
        height: 100.0,
    };

    assert_relative_eq!(scale.value_to_y(0.0, plot), 120.0);
    assert_relative_eq!(scale.value_to_y(200.0, plot), 20.0);
    assert_relative_eq!(scale.value_to_y(50.0, plot), 95.0);
}

