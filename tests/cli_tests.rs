//! CLI 통합 테스트
//!
//! 빌드된 바이너리를 실행해 입력 선택, 출력, 종료 코드를 검증

use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::{tempdir, NamedTempFile};

const BIN: &str = env!("CARGO_BIN_EXE_trade_stats");

const VALID: &str = "symbol,venue,price,quantity,timestamp\nZETA,X,2,1,5\nALPHA,Y,10,1,6\nALPHA,Y,20,3,7\n";
const EXPECTED: &str = "symbol,first_ts,last_ts,open,close,high,low,avg_px,vwap\n\
ALPHA,6,7,10.000,20.000,20.000,10.000,15.000,17.500\n\
ZETA,5,5,2.000,2.000,2.000,2.000,2.000,2.000\n";

fn command() -> Command {
  let mut cmd = Command::new(BIN);
  // 작업 디렉터리의 설정 파일과 환경 변수 영향 차단
  cmd.current_dir(tempdir().unwrap().into_path())
    .env_remove("RUST_LOG")
    .env_remove("TRADE_STATS_DELIMITER")
    .env_remove("TRADE_STATS_PROGRESS_INTERVAL")
    .env("TRADE_STATS_LOG_LEVEL", "off");
  cmd
}

fn run_with_stdin(mut cmd: Command, input: &str) -> Output {
  let mut child = cmd
    .stdin(Stdio::piped())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .spawn()
    .unwrap();
  // 프로세스가 입력을 다 읽기 전에 종료할 수 있으므로 쓰기 오류는 무시
  let _ = child.stdin.take().unwrap().write_all(input.as_bytes());
  child.wait_with_output().unwrap()
}

fn input_file(contents: &str) -> NamedTempFile {
  let mut file = NamedTempFile::new().unwrap();
  file.write_all(contents.as_bytes()).unwrap();
  file
}

#[test]
fn test_reads_file_argument() {
  let file = input_file(VALID);
  let output = command().arg(file.path()).output().unwrap();

  assert!(output.status.success());
  assert_eq!(String::from_utf8(output.stdout).unwrap(), EXPECTED);
}

#[test]
fn test_reads_stdin_when_no_argument() {
  let output = run_with_stdin(command(), VALID);

  assert!(output.status.success());
  assert_eq!(String::from_utf8(output.stdout).unwrap(), EXPECTED);
}

#[test]
fn test_dash_means_stdin() {
  let mut cmd = command();
  cmd.arg("-");
  let output = run_with_stdin(cmd, VALID);

  assert!(output.status.success());
  assert_eq!(String::from_utf8(output.stdout).unwrap(), EXPECTED);
}

#[test]
fn test_output_flag_writes_file() {
  let file = input_file(VALID);
  let dir = tempdir().unwrap();
  let out_path = dir.path().join("stats.csv");

  let output = command().arg(file.path()).arg("--output").arg(&out_path).output().unwrap();

  assert!(output.status.success());
  assert!(output.stdout.is_empty());
  assert_eq!(std::fs::read_to_string(&out_path).unwrap(), EXPECTED);
}

#[test]
fn test_schema_error_exit_code() {
  let output = run_with_stdin(command(), "symbol,venue,price,timestamp\nA,V,1,1\n");

  assert_eq!(output.status.code(), Some(3));
  assert!(output.stdout.is_empty());
  let stderr = String::from_utf8(output.stderr).unwrap();
  assert!(stderr.contains("error: "));
  assert!(stderr.contains("Schema error"));
}

#[test]
fn test_malformed_row_exit_code_and_no_output() {
  let output = run_with_stdin(
    command(),
    "symbol,venue,price,quantity,timestamp\nA,V,1,1,1\nAAPL,NASDAQ,foo,10,1000\n",
  );

  assert_eq!(output.status.code(), Some(4));
  assert!(output.stdout.is_empty());
  let stderr = String::from_utf8(output.stderr).unwrap();
  assert!(stderr.contains("line 3"));
  assert!(stderr.contains("AAPL,NASDAQ,foo,10,1000"));
}

#[test]
fn test_missing_input_file_exit_code() {
  let output = command().arg("/no/such/input.csv").output().unwrap();

  assert_eq!(output.status.code(), Some(5));
  assert!(String::from_utf8(output.stderr).unwrap().contains("cannot open input"));
}

#[test]
fn test_config_file_delimiter() {
  let config = input_file(r#"{"input": {"delimiter": ";"}}"#);
  let data = input_file("symbol;venue;price;quantity;timestamp\nA;V;1.5;2;3\n");

  let output = command().arg("--config").arg(config.path()).arg(data.path()).output().unwrap();

  assert!(output.status.success());
  assert_eq!(
    String::from_utf8(output.stdout).unwrap().lines().nth(1),
    Some("A,3,3,1.500,1.500,1.500,1.500,1.500,1.500")
  );
}

#[test]
fn test_bad_config_exit_code() {
  let config = input_file("{ not json");
  let data = input_file(VALID);
  let output = command().arg("--config").arg(config.path()).arg(data.path()).output().unwrap();

  assert_eq!(output.status.code(), Some(6));
}

#[test]
fn test_undecodable_header_exit_code() {
  let mut file = NamedTempFile::new().unwrap();
  file.write_all(b"symbol,venue,pr\xffice,quantity,timestamp\nA,V,1,1,1\n").unwrap();

  let output = command().arg(file.path()).output().unwrap();

  assert_eq!(output.status.code(), Some(3));
  assert!(output.stdout.is_empty());
}
