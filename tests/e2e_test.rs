use clap::Parser;
use rusty_library_catalog::application::catalog::{CatalogError, CatalogStore};
use rusty_library_catalog::cli::{self, Cli, CliError};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tempfile::TempDir;

// ============================================================================
// E2Eテスト用のヘルパー関数
// ============================================================================

/// 引数を解析し、JSONファイルを開いてコマンドを1回実行する
///
/// 標準入力の代わりに`stdin`を、標準出力の代わりにバッファを使う。
fn run_cli(dir: &TempDir, args: &[&str], stdin: &str) -> (Result<(), CliError>, String) {
    let path = dir.path().join("books.json");
    let path_arg = path.to_str().unwrap().to_string();

    let mut argv = vec!["library", "--file", path_arg.as_str()];
    argv.extend_from_slice(args);
    let parsed = Cli::try_parse_from(argv).expect("Failed to parse arguments");

    let mut store = CatalogStore::open(parsed.file.clone());
    let mut output = Vec::new();
    let result = cli::run(
        &mut store,
        parsed.command,
        Cursor::new(stdin.as_bytes()),
        &mut output,
    );

    (result, String::from_utf8(output).unwrap())
}

fn read_backing_file(dir: &TempDir) -> serde_json::Value {
    let contents = fs::read_to_string(dir.path().join("books.json")).unwrap();
    serde_json::from_str(&contents).unwrap()
}

fn backing_file_exists(dir: &TempDir) -> bool {
    Path::new(&dir.path().join("books.json")).exists()
}

// ============================================================================
// ワンショットコマンド
// ============================================================================

#[test]
fn test_add_list_search_status_delete() {
    let dir = TempDir::new().unwrap();

    let (result, output) = run_cli(
        &dir,
        &["add", "--title", "Dune", "--author", "Herbert", "--year", "1965"],
        "",
    );
    assert!(result.is_ok());
    assert_eq!(output, "Book 'Dune' added successfully with ID 1.\n");

    let (result, _) = run_cli(
        &dir,
        &[
            "add",
            "--title",
            "Dune Messiah",
            "--author",
            "Herbert",
            "--year",
            "1969",
        ],
        "",
    );
    assert!(result.is_ok());

    let (result, output) = run_cli(&dir, &["list"], "");
    assert!(result.is_ok());
    assert!(output.contains("Dune Messiah"));
    assert!(output.contains("1969"));

    let (_, output) = run_cli(&dir, &["search", "year", "1965"], "");
    assert!(output.starts_with("Found 1 book(s):"));

    let (_, output) = run_cli(&dir, &["search", "year", "196"], "");
    assert_eq!(output, "No matching books found.\n");

    let (result, output) = run_cli(&dir, &["status", "2", "borrowed"], "");
    assert!(result.is_ok());
    assert_eq!(output, "Book ID 2 status updated to 'borrowed'.\n");

    let (result, output) = run_cli(&dir, &["delete", "1"], "");
    assert!(result.is_ok());
    assert_eq!(output, "Book ID 1 deleted successfully.\n");

    assert_eq!(
        read_backing_file(&dir),
        serde_json::json!([{
            "id": 2,
            "title": "Dune Messiah",
            "author": "Herbert",
            "year": 1969,
            "status": "borrowed"
        }])
    );
}

#[test]
fn test_duplicate_add_exits_with_error() {
    let dir = TempDir::new().unwrap();
    let add = ["add", "--title", "Dune", "--author", "Herbert", "--year", "1965"];

    run_cli(&dir, &add, "").0.unwrap();
    let (result, _) = run_cli(
        &dir,
        &["add", "--title", "dune", "--author", "HERBERT", "--year", "1965"],
        "",
    );

    let err = result.unwrap_err();
    assert!(matches!(err, CliError::Catalog(CatalogError::DuplicateBook)));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(read_backing_file(&dir).as_array().unwrap().len(), 1);
}

#[test]
fn test_invalid_year_is_rejected() {
    let dir = TempDir::new().unwrap();

    let (result, _) = run_cli(
        &dir,
        &["add", "--title", "Dune", "--author", "Herbert", "--year", "-5"],
        "",
    );

    assert!(matches!(
        result,
        Err(CliError::Catalog(CatalogError::InvalidInput(_)))
    ));
    assert!(!backing_file_exists(&dir));
}

#[test]
fn test_commands_on_empty_library_are_informational() {
    let dir = TempDir::new().unwrap();

    for args in [
        vec!["list"],
        vec!["delete", "1"],
        vec!["status", "1", "borrowed"],
        vec!["search", "title", "dune"],
    ] {
        let (result, output) = run_cli(&dir, &args, "");
        assert!(result.is_ok(), "{args:?} should succeed");
        assert_eq!(output, "No books in the library.\n");
    }
    assert!(!backing_file_exists(&dir));
}

#[test]
fn test_corrupted_file_is_not_overwritten_by_reads() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("books.json"), "{ broken").unwrap();

    let (result, output) = run_cli(&dir, &["list"], "");

    assert!(result.is_ok());
    assert_eq!(output, "No books in the library.\n");
    assert_eq!(
        fs::read_to_string(dir.path().join("books.json")).unwrap(),
        "{ broken"
    );
}

// ============================================================================
// 対話メニュー
// ============================================================================

#[test]
fn test_menu_session_persists_changes() {
    let dir = TempDir::new().unwrap();

    let script = "1\nDune\nHerbert\n1965\n1\nEmma\nAusten\n1815\n5\n2\n2\n4\n6\n";
    let (result, output) = run_cli(&dir, &[], script);

    assert!(result.is_ok());
    assert!(output.contains("Book 'Dune' added successfully with ID 1."));
    assert!(output.contains("Book 'Emma' added successfully with ID 2."));
    assert!(output.contains("Book ID 2 status updated to 'borrowed'."));
    assert!(output.contains("Goodbye!"));

    let saved = read_backing_file(&dir);
    assert_eq!(saved[0]["title"], "Dune");
    assert_eq!(saved[1]["status"], "borrowed");
}

#[test]
fn test_menu_subcommand_and_end_of_input() {
    let dir = TempDir::new().unwrap();

    let (result, output) = run_cli(&dir, &["menu"], "4\n");

    assert!(result.is_ok());
    assert!(output.contains("No books in the library."));
}
