use bizdash::charts::{
    ChartError, ChartKind, ChartOutcome, ChartSurfaces, DashboardRenderer, Dimensions,
    PixmapSurface, Surface,
};
use bizdash::config::DashboardConfig;
use bizdash::data::{mock, DashboardData};
use bizdash::export::export_charts;
use tempfile::tempdir;

fn setup() -> (DashboardConfig, DashboardData) {
    let config = DashboardConfig::default();
    let data = mock::dashboard(&config.palette);
    (config, data)
}

fn surface(dims: Dimensions) -> PixmapSurface {
    PixmapSurface::new(dims).unwrap()
}

fn opaque_pixels(surface: &PixmapSurface) -> usize {
    surface.data().chunks_exact(4).filter(|px| px[3] > 0).count()
}

#[test]
fn renders_every_chart_onto_pixmaps() {
    let (config, data) = setup();
    let renderer = DashboardRenderer::new(&config);
    let dims = Dimensions::logical(600.0, 300.0);
    let (mut a, mut b, mut c) = (surface(dims), surface(dims), surface(dims));

    let report = renderer.render_all(
        ChartSurfaces {
            revenue: Some(&mut a),
            sales: Some(&mut b),
            demographics: Some(&mut c),
        },
        &data,
    );

    assert_eq!(report.rendered(), 3);
    for s in [&a, &b, &c] {
        assert!(opaque_pixels(s) > 1000);
    }
}

#[test]
fn missing_surfaces_are_skipped() {
    let (config, data) = setup();
    let renderer = DashboardRenderer::new(&config);
    let mut pie = surface(Dimensions::logical(400.0, 300.0));

    let report = renderer.render_all(
        ChartSurfaces {
            demographics: Some(&mut pie),
            ..ChartSurfaces::default()
        },
        &data,
    );

    assert_eq!(report.outcome(ChartKind::Revenue), &ChartOutcome::Skipped);
    assert_eq!(report.outcome(ChartKind::Sales), &ChartOutcome::Skipped);
    assert_eq!(report.outcome(ChartKind::Demographics), &ChartOutcome::Rendered);
}

#[test]
fn one_failing_chart_leaves_the_others_drawn() {
    let (config, mut data) = setup();
    data.sales[2].value = f64::NAN;
    let renderer = DashboardRenderer::new(&config);
    let dims = Dimensions::logical(600.0, 300.0);
    let (mut a, mut b, mut c) = (surface(dims), surface(dims), surface(dims));

    let report = renderer.render_all(
        ChartSurfaces {
            revenue: Some(&mut a),
            sales: Some(&mut b),
            demographics: Some(&mut c),
        },
        &data,
    );

    assert!(matches!(
        report.outcome(ChartKind::Sales),
        ChartOutcome::Failed(ChartError::InvalidValue { label, .. }) if label == "Home & Garden"
    ));
    assert_eq!(opaque_pixels(&b), 0);
    assert!(opaque_pixels(&a) > 0);
    assert!(opaque_pixels(&c) > 0);
}

#[test]
fn rendering_is_pixel_identical() {
    let (config, data) = setup();
    let renderer = DashboardRenderer::new(&config);
    let dims = Dimensions::new(500.0, 280.0, 2.0);

    let render = || {
        let (mut a, mut b, mut c) = (surface(dims), surface(dims), surface(dims));
        renderer.render_all(
            ChartSurfaces {
                revenue: Some(&mut a),
                sales: Some(&mut b),
                demographics: Some(&mut c),
            },
            &data,
        );
        [a.data().to_vec(), b.data().to_vec(), c.data().to_vec()]
    };

    assert_eq!(render(), render());
}

#[test]
fn rerender_on_same_surface_matches_fresh_render() {
    let (config, data) = setup();
    let renderer = DashboardRenderer::new(&config);
    let dims = Dimensions::logical(600.0, 300.0);

    let mut reused = surface(dims);
    renderer
        .render_one(ChartKind::Revenue, &mut reused, &data)
        .unwrap();
    renderer
        .render_one(ChartKind::Revenue, &mut reused, &data)
        .unwrap();

    let mut fresh = surface(dims);
    renderer
        .render_one(ChartKind::Revenue, &mut fresh, &data)
        .unwrap();

    assert_eq!(reused.data(), fresh.data());
}

#[test]
fn device_pixel_ratio_scales_backing_store() {
    let (config, data) = setup();
    let renderer = DashboardRenderer::new(&config);
    let mut s = surface(Dimensions::new(400.0, 300.0, 2.0));
    assert_eq!((s.pixel_width(), s.pixel_height()), (800, 600));
    assert_eq!(s.dimensions().width, 400.0);

    renderer
        .render_one(ChartKind::Demographics, &mut s, &data)
        .unwrap();
    // Pie center in device pixels.
    let idx = ((300 * 800 + 400) * 4) as usize;
    assert!(s.data()[idx + 3] > 0);
}

#[test]
fn export_writes_pngs() {
    let (config, data) = setup();
    let dir = tempdir().unwrap();
    let out = dir.path().join("charts");

    let summary = export_charts(
        &config,
        &data,
        &out,
        Dimensions::new(320.0, 240.0, 1.5),
        None,
    )
    .unwrap();

    assert_eq!(summary.report.rendered(), 3);
    for name in ["revenue.png", "sales.png", "demographics.png"] {
        let path = out.join(name);
        assert!(summary.written.contains(&path));
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (480, 360));
    }
}

#[test]
fn export_skips_failed_charts() {
    let (config, mut data) = setup();
    data.revenue.clear();
    let dir = tempdir().unwrap();

    let summary = export_charts(
        &config,
        &data,
        dir.path(),
        Dimensions::logical(320.0, 240.0),
        None,
    )
    .unwrap();

    assert_eq!(summary.written.len(), 2);
    assert!(!dir.path().join("revenue.png").exists());
    assert_eq!(summary.report.failures().len(), 1);
}

#[test]
fn export_rejects_empty_surface() {
    let (config, data) = setup();
    let dir = tempdir().unwrap();
    assert!(export_charts(
        &config,
        &data,
        dir.path(),
        Dimensions::logical(0.0, 240.0),
        None
    )
    .is_err());
}
