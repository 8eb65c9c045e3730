use std::{
    io::Write,
    path::PathBuf,
    process::{Command, Stdio},
    sync::atomic::{AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

static TEMP_NONCE: AtomicU64 = AtomicU64::new(0);

fn aspid_bin() -> PathBuf {
    if let Some(path) = option_env!("CARGO_BIN_EXE_aspid") {
        return PathBuf::from(path);
    }

    let mut exe = std::env::current_exe().expect("test executable path should be known");
    exe.pop();
    if exe.file_name().and_then(|name| name.to_str()) == Some("deps") {
        exe.pop();
    }
    exe.join("aspid")
}

fn temp_source_path(prefix: &str) -> PathBuf {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should move forward")
        .as_nanos();
    let counter = TEMP_NONCE.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("{prefix}-{timestamp}-{counter}.aspid"))
}

fn run_script(prefix: &str, source: &str) -> String {
    let path = temp_source_path(prefix);
    std::fs::write(&path, source).expect("temp source write should succeed");

    let output = Command::new(aspid_bin())
        .arg(&path)
        .output()
        .expect("aspid should execute");

    let _ = std::fs::remove_file(path);

    assert_eq!(
        output.status.code(),
        Some(0),
        "script exited nonzero; stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn print_expression_stdout() {
    assert_eq!(run_script("aspid-print", "print(1 + 2 * 3)\n"), "7\n");
}

#[test]
fn two_line_program_stdout() {
    assert_eq!(run_script("aspid-decl", "x: int = 10\nprint(x)\n"), "10\n");
}

#[test]
fn conditional_prints_five() {
    let source = "n: int = 5
if n == 5:
    print(\"five\")
else:
    print(\"other\")
";
    assert_eq!(run_script("aspid-if", source), "five\n");
}

#[test]
fn while_counter_prints_each_step() {
    let source = "i: int = 0
while i < 3:
    print(i)
    i += 1
";
    assert_eq!(run_script("aspid-while", source), "0\n1\n2\n");
}

#[test]
fn fstring_function_prints_greeting() {
    let source = "fn greet(name):
    return f\"hello {name}\"
print(greet(\"world\"))
";
    assert_eq!(run_script("aspid-fstring", source), "hello world\n");
}

#[test]
fn arrays_print_with_brackets() {
    let source = "a: int[] = [10, 20, 30]
print(a[-1])
a[0] = 99
print(a)
";
    assert_eq!(run_script("aspid-array", source), "30\n[99, 20, 30]\n");
}

#[test]
fn runtime_errors_go_to_stderr_and_execution_continues() {
    let path = temp_source_path("aspid-rte");
    std::fs::write(&path, "print([1][5])\nprint(\"still here\")\n")
        .expect("temp source write should succeed");

    let output = Command::new(aspid_bin())
        .arg(&path)
        .output()
        .expect("aspid should execute");

    let _ = std::fs::remove_file(path);

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Runtime Error:"), "stderr was: {stderr}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("still here"), "stdout was: {stdout}");
}

#[test]
fn missing_file_exits_nonzero() {
    let output = Command::new(aspid_bin())
        .arg("definitely-does-not-exist.aspid")
        .output()
        .expect("aspid should execute");

    assert_ne!(output.status.code(), Some(0));
}

#[test]
fn repl_reads_lines_until_eof() {
    let mut child = Command::new(aspid_bin())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("aspid repl should start");

    child
        .stdin
        .as_mut()
        .expect("stdin should be piped")
        .write_all(b"print(2 + 3)\nx: int = 4\nprint(x * x)\n")
        .expect("writing to the repl should succeed");

    let output = child.wait_with_output().expect("repl should exit at EOF");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains('5'), "stdout was: {stdout}");
    assert!(stdout.contains("16"), "stdout was: {stdout}");
}
