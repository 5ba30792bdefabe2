use certstat::api::{CardState, DashboardPhase, DashboardSurfaces, DashboardText};
use certstat::render::{Color, HeadlessSurface};
use certstat::stats::MetricKind;
use certstat::{Dashboard, DashboardConfig, LoadError};

const BUNDLE: &str = r#"{
  "years": ["2022", "2023"],
  "sessions": [
    {
      "key": "s1",
      "series": {
        "registered": [10, 12],
        "applicants": [8, 11],
        "passers": [4, 5],
        "pass_rate": [50.0, 45.5]
      },
      "metrics": {
        "2023": { "registered": 12, "applicants": 11, "passers": 5, "pass_rate": 45.5 }
      }
    }
  ],
  "tagComparisons": [
    {
      "id": "t1",
      "name": "보안",
      "sessions": [
        {
          "key": "s1",
          "label": "1회",
          "years": ["2023"],
          "metrics": {
            "2023": [
              { "title": "A", "isPrimary": true, "applicants": 11 },
              { "title": "B", "applicants": 20 }
            ]
          }
        }
      ]
    }
  ]
}"#;

fn surfaces() -> DashboardSurfaces<HeadlessSurface> {
    DashboardSurfaces {
        volume: HeadlessSurface::new(640, 320),
        rate: HeadlessSurface::new(640, 320),
        comparison: HeadlessSurface::new(640, 360),
    }
}

fn dashboard() -> Dashboard<HeadlessSurface> {
    Dashboard::new(surfaces(), DashboardConfig::default()).expect("dashboard init")
}

#[test]
fn cards_start_loading_and_events_are_ignored() {
    let mut dashboard = dashboard();
    assert_eq!(dashboard.phase(), &DashboardPhase::Loading);
    assert_eq!(dashboard.view().cards.session_volume, CardState::Loading);
    assert_eq!(dashboard.view().cards.tag_comparison, CardState::Loading);

    assert!(!dashboard.select_session("s1").expect("ignored"));
    assert!(!dashboard.select_metric(MetricKind::PassRate).expect("ignored"));
    assert!(dashboard.controller().is_none());
}

#[test]
fn loading_a_payload_makes_the_dashboard_ready() {
    let mut dashboard = dashboard();
    dashboard.load_json(BUNDLE, None).expect("load");

    assert!(dashboard.is_ready());
    let view = dashboard.view();
    assert_eq!(view.cards.session_volume, CardState::Ready);
    assert_eq!(view.cards.session_rate, CardState::Ready);
    assert_eq!(view.cards.summary, CardState::Ready);
    assert_eq!(view.cards.tag_comparison, CardState::Ready);
    assert_eq!(view.comparison_title, "보안 태그 · 1회 · 2023 · 응시자수");

    let rate = dashboard.charts().rate.borrow();
    assert_eq!(rate.axis().max, 100.0);
    let frame = rate.surface().last_frame().expect("rate chart drawn");
    assert_eq!(frame.circles.len(), 2);
}

#[test]
fn events_flow_through_once_ready() {
    let mut dashboard = dashboard();
    dashboard.load_json(BUNDLE, None).expect("load");

    assert!(dashboard.select_metric_key("registered").expect("select"));
    assert_eq!(dashboard.view().cards.tag_comparison, CardState::Empty);
    assert!(dashboard.select_metric(MetricKind::Applicants).expect("select"));
    assert_eq!(dashboard.view().cards.tag_comparison, CardState::Ready);
    assert!(!dashboard.select_session("s1").expect("same session"));
}

#[test]
fn fetch_failure_moves_every_card_to_error() {
    let mut dashboard = dashboard();
    dashboard.fail(LoadError::Status(503));

    assert_eq!(dashboard.phase(), &DashboardPhase::Failed(LoadError::Status(503)));
    let cards = dashboard.view().cards;
    assert_eq!(cards.session_volume, CardState::Error);
    assert_eq!(cards.session_rate, CardState::Error);
    assert_eq!(cards.summary, CardState::Error);
    assert_eq!(cards.tag_comparison, CardState::Error);

    dashboard.load_json(BUNDLE, None).expect("late payload ignored");
    assert!(!dashboard.is_ready());
    assert!(!dashboard.select_session("s1").expect("ignored"));
}

#[test]
fn malformed_payload_fails_with_parse_error() {
    let mut dashboard = dashboard();
    dashboard.load_json("not json", None).expect("handled");
    assert!(matches!(dashboard.phase(), DashboardPhase::Failed(LoadError::Parse(_))));
    assert_eq!(dashboard.view().cards.summary, CardState::Error);
}

#[test]
fn second_payload_is_ignored_once_ready() {
    let mut dashboard = dashboard();
    dashboard.load_json(BUNDLE, None).expect("load");
    dashboard.load_json("{}", None).expect("ignored");
    dashboard.fail(LoadError::Network("offline".to_owned()));

    assert!(dashboard.is_ready());
    assert_eq!(dashboard.view().cards.session_volume, CardState::Ready);
}

#[test]
fn empty_tag_comparisons_leave_comparison_card_empty() {
    let mut dashboard = dashboard();
    dashboard
        .load_json(
            r#"{ "years": ["2023"], "sessions": [{ "key": "s1", "series": { "applicants": [3] } }], "tagComparisons": [] }"#,
            None,
        )
        .expect("load");

    assert_eq!(dashboard.view().cards.tag_comparison, CardState::Empty);
    assert!(dashboard.view().tag_select.disabled);
    assert!(!dashboard.charts().comparison.borrow().has_data());
}

#[test]
fn resize_burst_redraws_all_three_charts_once() {
    let mut dashboard = dashboard();
    dashboard.load_json(BUNDLE, None).expect("load");
    let before = dashboard.charts().volume.borrow().surface().presented_count();

    let mut last = None;
    for _ in 0..5 {
        last = Some(dashboard.on_resize().schedule);
    }
    let pass = dashboard
        .on_animation_frame(last.expect("request"))
        .expect("pass");
    assert_eq!(pass.drawn, 3);
    assert_eq!(
        dashboard.charts().volume.borrow().surface().presented_count(),
        before + 1
    );
    assert_eq!(dashboard.scheduler().completed_passes(), 1);
}

#[test]
fn config_overrides_are_read_from_json() {
    let config = DashboardConfig::from_json_str(
        r#"{ "max_comparison_bars": 5, "default_metric": "pass_rate", "count_suffix": "" }"#,
    )
    .expect("config");
    assert_eq!(config.max_comparison_bars, 5);
    assert_eq!(config.default_metric, MetricKind::PassRate);
    assert_eq!(config.text, DashboardText::default());

    let mut dashboard = Dashboard::new(surfaces(), config).expect("dashboard init");
    dashboard.load_json(BUNDLE, None).expect("load");
    assert_eq!(
        dashboard.controller().map(|c| c.state().metric),
        Some(MetricKind::PassRate)
    );
    assert_eq!(dashboard.view().summary[0].text, "12");
}

#[test]
fn configured_comparison_colors_paint_legend_and_bars_alike() {
    let current = Color::rgba(1.0, 0.0, 0.0, 1.0);
    let related = Color::rgba(0.0, 0.0, 1.0, 0.5);
    let config = DashboardConfig {
        comparison_current_color: current,
        comparison_related_color: related,
        ..DashboardConfig::default()
    };
    let mut dashboard = Dashboard::new(surfaces(), config).expect("dashboard init");
    dashboard.load_json(BUNDLE, None).expect("load");

    let legend = &dashboard.view().comparison_legend;
    assert_eq!(legend[0].color, current);
    assert_eq!(legend[1].color, related);

    let comparison = dashboard.charts().comparison.borrow();
    let frame = comparison.surface().last_frame().expect("comparison chart drawn");
    assert_eq!(frame.rects.len(), 2);
    let primary = frame
        .rects
        .iter()
        .find(|rect| rect.fill_color == current)
        .expect("primary bar uses current color");
    assert_eq!(primary.border_color, current.with_alpha(0.9));
    assert!(frame.rects.iter().any(|rect| rect.fill_color == related));
}

#[test]
fn invalid_config_is_rejected() {
    assert!(DashboardConfig::from_json_str(r#"{ "max_comparison_bars": 0 }"#).is_err());
    assert!(DashboardConfig::from_json_str(r#"{ "tick_count": 0 }"#).is_err());
    assert!(DashboardConfig::from_json_str("[").is_err());
}
