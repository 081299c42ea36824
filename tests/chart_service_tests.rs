use treemap_rs::api::{ChartOptions, ChartOptionsPatch, ChartService, LabelStyle};
use treemap_rs::core::{ContentItem, FallbackLabels, Hierarchy, SurfaceSize, build_hierarchy};
use treemap_rs::render::RecordingBackend;

fn labels() -> FallbackLabels {
    FallbackLabels {
        unknown_country: "Unknown".to_owned(),
        unnamed_set: "No set".to_owned(),
    }
}

fn sample_hierarchy() -> Hierarchy {
    build_hierarchy(
        &[
            ContentItem::new("FR", "A", 100),
            ContentItem::new("DE", "C", 30),
        ],
        &labels(),
    )
    .expect("build")
}

fn create_service(probe: &RecordingBackend) -> ChartService<RecordingBackend> {
    ChartService::create(
        probe.clone(),
        SurfaceSize::new(800, 500),
        ChartOptions::default(),
    )
    .expect("service create")
}

#[test]
fn create_rejects_unmeasurable_surface() {
    let result = ChartService::create(
        RecordingBackend::new(),
        SurfaceSize::new(0, 300),
        ChartOptions::default(),
    );
    assert!(result.is_err());
}

#[test]
fn render_is_idempotent_for_unchanged_trees() {
    let probe = RecordingBackend::new();
    let mut service = create_service(&probe);
    let hierarchy = sample_hierarchy();

    assert!(service.render(&hierarchy).expect("first render"));
    assert!(!service.render(&hierarchy).expect("second render"));
    assert_eq!(probe.draw_calls(), 1);

    // A different tree draws again.
    let changed = build_hierarchy(&[ContentItem::new("FR", "A", 101)], &labels()).expect("build");
    assert!(service.render(&changed).expect("third render"));
    assert_eq!(probe.draw_calls(), 2);
}

#[test]
fn failed_draw_keeps_last_good_tree() {
    let probe = RecordingBackend::new();
    let mut service = create_service(&probe);
    let hierarchy = sample_hierarchy();
    service.render(&hierarchy).expect("first render");

    let changed = build_hierarchy(&[ContentItem::new("SE", "X", 5)], &labels()).expect("build");
    probe.fail_next_draw();
    assert!(service.render(&changed).is_err());

    // The last-good tree is still what the service believes is displayed,
    // so the retry actually reaches the backend.
    assert_eq!(service.last_rendered_root(), Some(&hierarchy.root));
    assert_eq!(probe.last_root(), Some(hierarchy.root.clone()));
    assert!(service.render(&changed).expect("retry render"));
    assert_eq!(probe.last_root(), Some(changed.root));
}

#[test]
fn resize_is_a_no_op_for_unchanged_dimensions() {
    let probe = RecordingBackend::new();
    let mut service = create_service(&probe);

    service.resize(SurfaceSize::new(800, 500)).expect("resize");
    assert_eq!(probe.resize_calls(), 0);

    service.resize(SurfaceSize::new(1024, 500)).expect("resize");
    assert_eq!(probe.resize_calls(), 1);
    assert_eq!(service.surface(), SurfaceSize::new(1024, 500));
}

#[test]
fn update_options_merges_without_redraw() {
    let probe = RecordingBackend::new();
    let mut service = create_service(&probe);
    service.render(&sample_hierarchy()).expect("render");

    let patch = ChartOptionsPatch::new()
        .with_zoom_enabled(false)
        .with_label_style(LabelStyle {
            font_size_px: 16.0,
            show_counts: false,
        });
    service.update_options(&patch).expect("update options");

    assert_eq!(probe.apply_calls(), 1);
    assert_eq!(probe.draw_calls(), 1);
    assert!(!service.options().zoom_enabled);
    assert_eq!(service.options().label_style.font_size_px, 16.0);
}

#[test]
fn empty_patch_never_reaches_the_backend() {
    let probe = RecordingBackend::new();
    let mut service = create_service(&probe);

    service
        .update_options(&ChartOptionsPatch::new())
        .expect("empty patch");
    assert_eq!(probe.apply_calls(), 0);
}

#[test]
fn destroy_twice_releases_resources_once() {
    let probe = RecordingBackend::new();
    let mut service = create_service(&probe);

    service.destroy();
    service.destroy();
    assert_eq!(probe.unmount_calls(), 1);
    assert!(service.is_destroyed());
}

#[test]
fn destroyed_service_rejects_further_calls() {
    let probe = RecordingBackend::new();
    let mut service = create_service(&probe);
    service.destroy();

    assert!(service.render(&sample_hierarchy()).is_err());
    assert!(service.resize(SurfaceSize::new(10, 10)).is_err());
    assert_eq!(probe.draw_calls(), 0);
    assert_eq!(probe.resize_calls(), 0);
}
