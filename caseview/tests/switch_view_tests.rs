#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use std::fmt;
use std::sync::OnceLock;

use caseview::{Element, FromStore, HasView, Store, View, with_switch_case_view};
use rstest::rstest;

fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// ------------  Payload states and their views  ------------

pub struct Info {
    pub number: i64,
}

pub struct InfoView<'a> {
    store: Store<'a, Info>,
}

impl<'a> FromStore<'a, Info> for InfoView<'a> {
    fn from_store(store: Store<'a, Info>) -> Self {
        Self { store }
    }
}

impl View for InfoView<'_> {
    fn body(&self) -> Element {
        let number = self.store.state().number;
        let parity = if number % 2 == 0 { "even" } else { "odd" };
        Element::text(format!("{number} is {parity}"))
    }
}

pub struct Settings {
    pub tint: String,
}

pub struct SettingsView<'a> {
    store: Store<'a, Settings>,
}

impl<'a> FromStore<'a, Settings> for SettingsView<'a> {
    fn from_store(store: Store<'a, Settings>) -> Self {
        Self { store }
    }
}

impl View for SettingsView<'_> {
    fn body(&self) -> Element {
        Element::text(format!("tint: {}", self.store.state().tint))
    }
}

/// Renders [`Info`] without going through `InfoView`.
pub struct CompactInfo<'a> {
    store: Store<'a, Info>,
}

impl<'a> FromStore<'a, Info> for CompactInfo<'a> {
    fn from_store(store: Store<'a, Info>) -> Self {
        Self { store }
    }
}

impl View for CompactInfo<'_> {
    fn body(&self) -> Element {
        Element::text(format!("#{}", self.store.state().number))
    }
}

pub struct Value<T> {
    pub value: T,
}

pub struct ValueView<'a, T> {
    store: Store<'a, Value<T>>,
}

impl<'a, T> FromStore<'a, Value<T>> for ValueView<'a, T> {
    fn from_store(store: Store<'a, Value<T>>) -> Self {
        Self { store }
    }
}

impl<T: fmt::Display> View for ValueView<'_, T> {
    fn body(&self) -> Element {
        Element::text(self.store.state().value.to_string())
    }
}

// ------------  Annotated unions  ------------

#[with_switch_case_view]
pub enum Sheet {
    Info(Info),
    Settings(Settings),
}

#[with_switch_case_view]
pub enum Home {}

#[with_switch_case_view]
pub enum Panel {
    Settings { settings: Settings, dirty: bool },
    Both(Info, Settings),
    Closed,
    Coordinates((i32, i32)),
    Label(&'static str),
}

#[with_switch_case_view(renderers(Info = CompactInfo))]
pub enum Sidebar {
    Info(Info),
    Settings(Settings),
}

#[with_switch_case_view]
pub enum Wrapper<T: fmt::Display> {
    Value(Value<T>),
    Missing,
}

mod ui {
    pub use caseview::*;
}

#[with_switch_case_view(runtime = crate::ui)]
pub enum Detail {
    Info(Info),
}

fn render<'a, U: HasView + 'a>(state: &'a U) -> String {
    U::view(Store::new(state)).body().to_string()
}

fn assert_has_view<U: HasView>() {}

// ------------  Tests  ------------

#[test]
fn test_sheet_renders_active_variant() {
    init_test_logger();

    let info = Sheet::Info(Info { number: 7 });
    assert_eq!(render(&info), "7 is odd");

    let settings = Sheet::Settings(Settings {
        tint: "blue".to_owned(),
    });
    assert_eq!(render(&settings), "tint: blue");
}

#[test]
fn test_sheet_view_is_built_from_a_store() {
    init_test_logger();

    let sheet = Sheet::Info(Info { number: 4 });
    let view = SheetView::from_store(Store::new(&sheet));
    assert_eq!(view.body(), Element::text("4 is even"));
    assert_eq!(sheet.render(), Element::text("4 is even"));
}

#[test]
fn test_empty_union_still_has_a_view() {
    assert_has_view::<Home>();
}

#[rstest]
#[case::named_first_field(
    Panel::Settings { settings: Settings { tint: "red".to_owned() }, dirty: true },
    "tint: red"
)]
#[case::first_payload_only(
    Panel::Both(Info { number: 2 }, Settings { tint: "green".to_owned() }),
    "2 is even"
)]
#[case::unit_variant(Panel::Closed, "")]
#[case::tuple_payload(Panel::Coordinates((3, 4)), "")]
#[case::reference_payload(Panel::Label("hello"), "")]
fn test_panel_variants(#[case] panel: Panel, #[case] expected: &str) {
    init_test_logger();
    assert_eq!(render(&panel), expected);
}

#[test]
fn test_unit_variant_renders_empty_element() {
    assert_eq!(Panel::Closed.render(), Element::Empty);
}

#[test]
fn test_renderer_override() {
    init_test_logger();

    let info = Sidebar::Info(Info { number: 11 });
    assert_eq!(render(&info), "#11");

    let settings = Sidebar::Settings(Settings {
        tint: "teal".to_owned(),
    });
    assert_eq!(render(&settings), "tint: teal");
}

#[test]
fn test_generic_union() {
    let wrapped = Wrapper::Value(Value { value: 2.5 });
    assert_eq!(render(&wrapped), "2.5");

    let missing: Wrapper<String> = Wrapper::Missing;
    assert_eq!(render(&missing), "");
}

#[test]
fn test_custom_runtime_path() {
    let detail = Detail::Info(Info { number: 1 });
    assert_eq!(render(&detail), "1 is odd");
}
