#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use rstest::rstest;

const SHEET: &str = "\
#[with_switch_case_view]
pub enum Sheet {
    Info(Info),
    Settings(Settings),
}
";

const HOME: &str = "\
#[with_switch_case_view]
pub enum Home {}
";

fn caseview(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_caseview"))
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_generates_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("sheet.rs"), SHEET).unwrap();

    let output = caseview(dir.path(), &["sheet.rs", "--raw"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let code = stdout(&output);
    assert!(code.starts_with("// SheetView for Sheet (sheet.rs)"), "{code}");
    assert!(code.contains("pub struct SheetView"), "{code}");
    assert!(code.contains("InfoView :: from_store (store)"), "{code}");
}

#[test]
fn test_output_is_formatted_when_rustfmt_is_available() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("sheet.rs"), SHEET).unwrap();

    let output = caseview(dir.path(), &["sheet.rs"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let code = stdout(&output);
    assert!(code.starts_with("// SheetView for Sheet (sheet.rs)"), "{code}");
    syn::parse_file(&code).unwrap();
    if which::which("rustfmt").is_ok() {
        assert!(code.contains("pub struct SheetView<'store> {"), "{code}");
        assert!(code.contains("InfoView::from_store(store)"), "{code}");
    }
}

#[test]
fn test_writes_output_file_for_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("screens")).unwrap();
    fs::write(dir.path().join("screens/sheet.rs"), SHEET).unwrap();
    fs::write(
        dir.path().join("screens/settings.rs"),
        "pub enum Tab { Settings(Settings) }\n",
    )
    .unwrap();

    let output = caseview(dir.path(), &["screens", "--type", "Tab", "-o", "views.rs"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).is_empty());

    let code = fs::read_to_string(dir.path().join("views.rs")).unwrap();
    let tab = code.find("pub struct TabView").unwrap();
    let sheet = code.find("pub struct SheetView").unwrap();
    assert!(tab < sheet, "files are processed in name order");
}

#[rstest]
#[case::plain(&["home.rs"], true)]
#[case::deny_warnings(&["home.rs", "--deny-warnings"], false)]
fn test_empty_enum_warning(#[case] args: &[&str], #[case] succeeds: bool) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("home.rs"), HOME).unwrap();

    let output = caseview(dir.path(), args);
    assert_eq!(output.status.success(), succeeds);
    assert!(stderr(&output).contains("home.rs:2:5: warning: "), "{}", stderr(&output));
    assert!(stdout(&output).contains("pub struct HomeView"));
}

#[rstest]
#[case::not_an_enum("#[with_switch_case_view]\npub struct Details;\n", "details.rs:2:5: error: ")]
#[case::not_rust("pub enum {", "details.rs:1:")]
fn test_errors_fail_the_run(#[case] source: &str, #[case] expected: &str) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("details.rs"), source).unwrap();

    let output = caseview(dir.path(), &["details.rs"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains(expected), "{}", stderr(&output));
}

#[test]
fn test_renderer_flag_and_config_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("sheet.rs"), SHEET).unwrap();
    fs::write(
        dir.path().join("caseview.json"),
        r#"{ "runtime": "crate::ui", "renderers": { "Settings": "panels::SettingsPanel" } }"#,
    )
    .unwrap();

    let output = caseview(
        dir.path(),
        &["sheet.rs", "--raw", "-c", "caseview.json", "-r", "Info=panels::InfoPanel"],
    );
    assert!(output.status.success(), "{}", stderr(&output));

    let code = stdout(&output);
    assert!(code.contains("crate :: ui :: Store"), "{code}");
    assert!(code.contains("panels :: InfoPanel :: from_store"), "{code}");
    assert!(code.contains("panels :: SettingsPanel :: from_store"), "{code}");
}

#[test]
fn test_unknown_type_is_a_warning() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("sheet.rs"), SHEET).unwrap();

    let output = caseview(dir.path(), &["sheet.rs", "--type", "Missing"]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("no declaration named `Missing`"));
}
