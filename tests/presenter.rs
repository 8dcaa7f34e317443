// Chart presenter lifecycle against a recording charting library.

use finchart::charts::{
    format_value, BarChartConfig, ChartError, ChartPresenter, ChartingLibrary, PresenterState,
    RenderSurface, HIGHLIGHT_COLOR, MUTED_COLOR,
};
use finchart::data::{MetricKey, FINANCIALS};
use finchart::export::{ExportError, ExportFormat};
use image::{Rgb, RgbImage};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Default, Clone)]
struct Ledger {
    created: Rc<Cell<usize>>,
    destroyed: Rc<Cell<usize>>,
    configs: Rc<RefCell<Vec<BarChartConfig>>>,
    fail_next: Rc<Cell<bool>>,
}

impl Ledger {
    fn created(&self) -> usize {
        self.created.get()
    }

    fn destroyed(&self) -> usize {
        self.destroyed.get()
    }

    fn live(&self) -> usize {
        self.created() - self.destroyed()
    }
}

struct RecordingLibrary {
    ledger: Ledger,
}

struct RecordingSurface {
    image: RgbImage,
    destroyed: Rc<Cell<usize>>,
}

impl RenderSurface for RecordingSurface {
    fn pixels(&self) -> &RgbImage {
        &self.image
    }

    fn destroy(self) {
        self.destroyed.set(self.destroyed.get() + 1);
    }
}

impl ChartingLibrary for RecordingLibrary {
    type Surface = RecordingSurface;

    fn create(&mut self, config: &BarChartConfig) -> Result<RecordingSurface, ChartError> {
        if self.ledger.fail_next.replace(false) {
            return Err(ChartError::Draw("backend unavailable".to_string()));
        }
        self.ledger.created.set(self.ledger.created() + 1);
        self.ledger.configs.borrow_mut().push(config.clone());
        Ok(RecordingSurface {
            image: RgbImage::from_pixel(8, 4, Rgb([255, 255, 255])),
            destroyed: self.ledger.destroyed.clone(),
        })
    }
}

fn mount() -> (ChartPresenter<RecordingLibrary>, Ledger) {
    let ledger = Ledger::default();
    let library = RecordingLibrary {
        ledger: ledger.clone(),
    };
    let presenter = ChartPresenter::mount(library, &FINANCIALS).expect("mount should render");
    (presenter, ledger)
}

fn bar_values(presenter: &ChartPresenter<RecordingLibrary>) -> Vec<f64> {
    let config = presenter.config().expect("rendered config");
    config
        .dataset()
        .unwrap()
        .resolve()
        .unwrap()
        .iter()
        .map(|p| p.value)
        .collect()
}

#[test]
fn mount_renders_sales_by_default() {
    let (presenter, ledger) = mount();

    assert_eq!(presenter.active_metric(), MetricKey::Sale);
    assert_eq!(presenter.state(), PresenterState::Rendered(MetricKey::Sale));
    assert_eq!(ledger.created(), 1);
    assert_eq!(ledger.destroyed(), 0);
    assert_eq!(
        bar_values(&presenter),
        vec![122953.0, 132902.0, 146649.0, 167895.0, 191141.0]
    );
}

#[test]
fn clicking_eps_rerenders_with_eps_values_and_labels() {
    let (mut presenter, _ledger) = mount();

    presenter.select_metric(MetricKey::Eps).unwrap();

    assert_eq!(presenter.active_metric(), MetricKey::Eps);
    let points = presenter.config().unwrap().dataset().unwrap().resolve().unwrap();
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![204.2, 216.0, 219.7, 247.9, 263.5]);

    let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, ["204.2", "216", "219.7", "247.9", "263.5"]);
    for point in &points {
        assert_eq!(point.label, format_value(point.value));
    }
}

#[test]
fn every_metric_resolves_its_own_field() {
    let (mut presenter, ledger) = mount();

    for key in MetricKey::ALL {
        presenter.select_metric(key).unwrap();
        let config = presenter.config().unwrap();
        assert_eq!(
            config.dataset().unwrap().parsing.y_axis_key,
            format!("financials.{}", key)
        );
        let expected: Vec<f64> = FINANCIALS.iter().map(|r| r.value(key)).collect();
        assert_eq!(bar_values(&presenter), expected);
    }

    let recorded = ledger.configs.borrow();
    assert_eq!(recorded.len(), 1 + MetricKey::ALL.len());
    assert_eq!(recorded.last(), presenter.config());
}

#[test]
fn highlight_stays_on_latest_year_for_every_metric() {
    let (mut presenter, _ledger) = mount();

    for key in MetricKey::ALL {
        presenter.select_metric(key).unwrap();
        let points = presenter.config().unwrap().dataset().unwrap().resolve().unwrap();
        let (latest, earlier) = points.split_last().unwrap();
        assert_eq!(latest.category, "FY 23-24");
        assert_eq!((latest.fill, latest.border), (HIGHLIGHT_COLOR, HIGHLIGHT_COLOR));
        assert!(earlier
            .iter()
            .all(|p| p.fill == MUTED_COLOR && p.border == MUTED_COLOR));
    }
}

#[test]
fn each_switch_destroys_one_surface_and_creates_one() {
    let (mut presenter, ledger) = mount();

    for (switches, key) in [MetricKey::Profit, MetricKey::Capex, MetricKey::Patax]
        .into_iter()
        .enumerate()
    {
        presenter.select_metric(key).unwrap();
        assert_eq!(ledger.created(), switches + 2);
        assert_eq!(ledger.destroyed(), switches + 1);
        assert_eq!(ledger.live(), 1);
    }
}

#[test]
fn reselecting_active_metric_still_rerenders() {
    let (mut presenter, ledger) = mount();

    presenter.select_metric(MetricKey::Sale).unwrap();

    assert_eq!(ledger.created(), 2);
    assert_eq!(ledger.destroyed(), 1);
    assert_eq!(presenter.state(), PresenterState::Rendered(MetricKey::Sale));
}

#[test]
fn failed_render_leaves_presenter_idle() {
    let (mut presenter, ledger) = mount();

    ledger.fail_next.set(true);
    let err = presenter.select_metric(MetricKey::Dpshare).unwrap_err();

    assert!(matches!(err, ChartError::Draw(_)));
    assert_eq!(presenter.active_metric(), MetricKey::Dpshare);
    assert_eq!(presenter.state(), PresenterState::Idle);
    assert!(presenter.config().is_none());
    assert_eq!(ledger.live(), 0);

    presenter.select_metric(MetricKey::Dpshare).unwrap();
    assert_eq!(presenter.state(), PresenterState::Rendered(MetricKey::Dpshare));
}

#[test]
fn mount_fails_when_library_cannot_draw() {
    let ledger = Ledger::default();
    ledger.fail_next.set(true);
    let library = RecordingLibrary {
        ledger: ledger.clone(),
    };

    assert!(ChartPresenter::mount(library, &FINANCIALS).is_err());
    assert_eq!(ledger.created(), 0);
}

#[test]
fn unmount_and_drop_release_the_surface() {
    let (mut presenter, ledger) = mount();
    presenter.select_metric(MetricKey::Eps).unwrap();

    presenter.unmount();
    assert_eq!(presenter.state(), PresenterState::Idle);
    assert_eq!(ledger.live(), 0);

    presenter.select_metric(MetricKey::Capex).unwrap();
    assert_eq!(ledger.live(), 1);
    drop(presenter);
    assert_eq!(ledger.live(), 0);
    assert_eq!(ledger.created(), ledger.destroyed());
}

#[test]
fn export_names_file_after_format() {
    let (presenter, _ledger) = mount();

    let png = presenter.export_image(ExportFormat::Png).unwrap();
    assert!(png.file_name.ends_with(".png"));
    assert_eq!(png.file_name, "chart.png");

    let jpeg = presenter.export_image(ExportFormat::Jpeg).unwrap();
    assert!(jpeg.file_name.ends_with(".jpeg"));
    assert_eq!(jpeg.mime_type, "image/jpeg");
}

#[test]
fn export_without_surface_is_an_error() {
    let (mut presenter, _ledger) = mount();
    presenter.unmount();

    assert!(matches!(
        presenter.export_image(ExportFormat::Png),
        Err(ExportError::NoSurface)
    ));
}
