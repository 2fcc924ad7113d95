//! Integration test: project analysis over a temporary directory tree.

use codegrade::{
    Analyzer, AnalyzerError, Config, FileReport, FunctionRecord, LanguageExtractor, LineMetrics,
    ParseErrorKind,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn sample_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "app/main.py",
        "# entry point\nimport sys\n\nVERSION = \"1.0\"\n\ndef main(argv):\n    code = run(argv)\n    return code\n",
    );
    write(
        root,
        "app/util.py",
        "def run(args, verbose=False):\n    def log(msg):\n        print(msg)\n    return 0\n",
    );
    write(root, "app/broken.py", "if x = 5\n");
    write(root, "README.md", "# not python\n");
    write(root, ".venv/lib/site.py", "def ignored():\n    pass\n");
    write(root, "build/gen.py", "generated = True\n");
    write(root, ".gitignore", "build/\n");
    dir
}

fn paths(report: &codegrade::AnalysisReport) -> Vec<PathBuf> {
    report.files.iter().map(|f| f.file_path.clone()).collect()
}

#[test]
fn analyzes_python_files_sorted_by_path() {
    let dir = sample_project();
    let analyzer = Analyzer::builder().root(dir.path()).build().unwrap();
    let report = analyzer.analyze().unwrap();

    assert_eq!(
        paths(&report),
        [
            PathBuf::from("app/broken.py"),
            PathBuf::from("app/main.py"),
            PathBuf::from("app/util.py"),
        ]
    );
    assert_eq!(report.files_checked, 3);
}

#[test]
fn records_facts_per_file() {
    let dir = sample_project();
    let report = Analyzer::builder()
        .root(dir.path())
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    let main = &report.files[1];
    assert!(main.is_valid());
    let vars: Vec<_> = main.variables.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(vars, ["VERSION", "code"]);
    assert_eq!(main.functions.len(), 1);
    assert_eq!(main.functions[0].args, ["argv"]);
    assert_eq!(main.metrics.comment_lines, 1);
    assert_eq!(main.metrics.total_lines, 9);

    let util = &report.files[2];
    let funcs: Vec<_> = util.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(funcs, ["run", "log"]);
    assert_eq!(util.functions[0].args, ["args", "verbose"]);
}

#[test]
fn invalid_file_is_reported_not_fatal() {
    let dir = sample_project();
    let report = Analyzer::builder()
        .root(dir.path())
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    let invalid = report.invalid_files();
    assert_eq!(invalid.len(), 1);
    let broken = invalid[0];
    assert_eq!(broken.file_path, PathBuf::from("app/broken.py"));
    assert!(broken.variables.is_empty());
    assert!(broken.functions.is_empty());
    assert_eq!(broken.metrics.total_lines, 2);
    let error = broken.parse_error.as_ref().unwrap();
    assert_ne!(error.kind, ParseErrorKind::Unavailable);
    assert!(!error.message.is_empty());
}

#[test]
fn fail_on_parse_error_aborts() {
    let dir = sample_project();
    let err = Analyzer::builder()
        .root(dir.path())
        .fail_on_parse_error(true)
        .build()
        .unwrap()
        .analyze()
        .unwrap_err();

    match err {
        AnalyzerError::Parse { path, .. } => assert_eq!(path, PathBuf::from("app/broken.py")),
        other => panic!("expected parse error, got {other}"),
    }
}

#[test]
fn gitignore_can_be_disabled() {
    let dir = sample_project();
    let mut config = Config::default();
    config.analyzer.respect_gitignore = false;

    let report = Analyzer::builder()
        .root(dir.path())
        .config(config)
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    assert!(paths(&report).contains(&PathBuf::from("build/gen.py")));
    assert!(!paths(&report).contains(&PathBuf::from(".venv/lib/site.py")));
}

#[test]
fn explicit_excludes_apply() {
    let dir = sample_project();
    let report = Analyzer::builder()
        .root(dir.path())
        .exclude("**/broken.py")
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    assert!(report.invalid_files().is_empty());
    assert_eq!(report.files_checked, 2);
}

#[test]
fn config_file_sets_comment_prefix() {
    let dir = sample_project();
    write(
        dir.path(),
        "codegrade.toml",
        "[metrics]\ncomment_prefix = \"import\"\n",
    );

    let report = Analyzer::builder()
        .root(dir.path())
        .config_file(&dir.path().join("codegrade.toml"))
        .unwrap()
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    // `import sys` is the only line starting with the custom prefix.
    assert_eq!(report.files[1].metrics.comment_lines, 1);
}

#[test]
fn report_serializes_to_json() {
    let dir = sample_project();
    let report = Analyzer::builder()
        .root(dir.path())
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    let json = report.to_json().unwrap();
    assert!(json.contains("\"app/main.py\""));
    assert!(json.contains("\"invalid-syntax\"") || json.contains("\"missing-token\""));
}

/// Records every file it handles as a single `stub()` function.
struct StubExtractor {
    extensions: &'static [&'static str],
}

impl LanguageExtractor for StubExtractor {
    fn language_id(&self) -> &'static str {
        "stub"
    }

    fn extensions(&self) -> &'static [&'static str] {
        self.extensions
    }

    fn analyze(&self, source: &str) -> FileReport {
        let mut report = FileReport::new("");
        let stub = FunctionRecord::new("stub", Vec::<String>::new(), 1);
        report.functions.push(stub);
        report.metrics = LineMetrics::from_source(source);
        report
    }
}

#[test]
fn custom_extractor_adds_a_language() {
    let dir = sample_project();
    write(dir.path(), "app/speedups.pyx", "cdef int n = 0\n");

    let report = Analyzer::builder()
        .root(dir.path())
        .extractor(Box::new(StubExtractor {
            extensions: &[".pyx"],
        }))
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    assert_eq!(report.files_checked, 4);
    let pyx = report
        .files
        .iter()
        .find(|f| f.file_path == Path::new("app/speedups.pyx"))
        .unwrap();
    assert!(pyx.is_valid());
    assert_eq!(pyx.functions[0].name, "stub");

    // Python files still go through the built-in extractor.
    let main = &report.files[1];
    assert_eq!(main.file_path, PathBuf::from("app/main.py"));
    assert_eq!(main.functions[0].name, "main");
}

#[test]
fn custom_extractor_overrides_python() {
    let dir = sample_project();
    let report = Analyzer::builder()
        .root(dir.path())
        .extractor(Box::new(StubExtractor {
            extensions: &[".py"],
        }))
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    assert_eq!(report.files_checked, 3);
    assert!(report.invalid_files().is_empty());
    for file in &report.files {
        let names: Vec<_> = file.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["stub"], "{}", file.file_path.display());
    }
}

#[test]
fn unclaimed_extensions_are_skipped() {
    let dir = sample_project();
    write(dir.path(), "app/speedups.pyx", "cdef int n = 0\n");

    let report = Analyzer::builder()
        .root(dir.path())
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    assert!(!paths(&report).contains(&PathBuf::from("app/speedups.pyx")));
}

#[test]
fn excludes_accepts_several_patterns() {
    let dir = sample_project();
    let report = Analyzer::builder()
        .root(dir.path())
        .excludes(["**/broken.py", "app/util.py"])
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    assert_eq!(paths(&report), [PathBuf::from("app/main.py")]);
}
