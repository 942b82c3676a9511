//! Integration tests for the `cstemplate` binary.
//!
//! Argument parsing, help output, completions, and configuration errors run
//! without a management server; the end-to-end cases talk to a wiremock
//! stand-in configured through a temporary INI file.
#![allow(clippy::unwrap_used)]

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::NamedTempFile;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

const API_PATH: &str = "/client/api";

/// Build a [`Command`] for the binary with env isolation.
fn cstemplate_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("cstemplate");
    cmd.env_remove("CSTEMPLATE_INI").env_remove("RUST_LOG");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn ini_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn server_ini(server: &MockServer, extra: &str) -> NamedTempFile {
    ini_file(&format!(
        "[main]\n\
         endpoint = {}{API_PATH}\n\
         apikey = test-key\n\
         secretkey = test-secret\n\
         zonename = zone1\n\
         format = QCOW2\n\
         hypervisor = KVM\n\
         ostype = CentOS%\n\
         \n{extra}",
        server.uri()
    ))
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = cstemplate_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_flag() {
    cstemplate_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("CloudStack templates")
            .and(predicate::str::contains("register"))
            .and(predicate::str::contains("delete"))
            .and(predicate::str::contains("list")),
    );
}

#[test]
fn test_version_flag() {
    cstemplate_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cstemplate"));
}

#[test]
fn test_register_help_lists_flags() {
    cstemplate_cmd()
        .args(["register", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--ostype").and(predicate::str::contains("--passwordenabled")),
        );
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_zsh() {
    cstemplate_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_bash() {
    cstemplate_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = cstemplate_cmd().arg("foobar").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("foobar"));
}

#[test]
fn test_register_name_requires_url() {
    let output = cstemplate_cmd()
        .args(["register", "only-a-name"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_invalid_password_flag() {
    let output = cstemplate_cmd()
        .args(["register", "-p", "maybe"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_missing_ini_file() {
    cstemplate_cmd()
        .args(["--ini", "/nonexistent/cstemplate.ini", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("configuration file"));
}

#[test]
fn test_ini_from_env() {
    cstemplate_cmd()
        .env("CSTEMPLATE_INI", "/nonexistent/from-env.ini")
        .arg("delete")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("from-env.ini"));
}

#[test]
fn test_missing_credentials() {
    let ini = ini_file("[main]\nendpoint = http://127.0.0.1:9/client/api\n");
    cstemplate_cmd()
        .arg("--ini")
        .arg(ini.path())
        .arg("list")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("credentials"));
}

// ── End to end against a mock management server ─────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_list_renders_selected_columns() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("command", "listTemplates"))
        .and(query_param("templatefilter", "all"))
        .and(query_param("keyword", "cent%"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "listtemplatesresponse": {
                "count": 1,
                "template": [{
                    "id": "tpl-1",
                    "name": "centos65",
                    "isready": true,
                    "zonename": "zone1",
                    "size": 1024
                }]
            }
        })))
        .mount(&server)
        .await;

    let ini = server_ini(&server, "[list]\nkeyword = all\nzonename = true\n");

    let output = cstemplate_cmd()
        .arg("--ini")
        .arg(ini.path())
        .args(["list", "--keyword", "cent%", "--columns", "id,name"])
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(stdout.starts_with("total: 1\n"), "{stdout}");
    assert!(stdout.contains("| id    | name     |"), "{stdout}");
    assert!(stdout.contains("| tpl-1 | centos65 |"), "{stdout}");
    assert!(!stdout.contains("zone1"), "{stdout}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_ids_from_config() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("command", "deleteTemplate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "deletetemplateresponse": { "jobid": "job-1" }
        })))
        .expect(2)
        .mount(&server)
        .await;

    let ini = server_ini(&server, "[delete]\nid1 = tpl-1\nid2 = tpl-2\n");

    cstemplate_cmd()
        .arg("--ini")
        .arg(ini.path())
        .arg("delete")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("tpl-1\n")
                .and(predicate::str::contains("\"jobid\": \"job-1\""))
                .and(predicate::str::ends_with("delete 2 templates.\n")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_register_unknown_ostype_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("command", "listOsTypes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "listostypesresponse": {}
        })))
        .mount(&server)
        .await;

    let ini = server_ini(&server, "[register]\ncentos = http://mirror/centos.qcow2\n");

    let output = cstemplate_cmd()
        .arg("--ini")
        .arg(ini.path())
        .arg("register")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("OS type 'CentOS%' not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_session_is_closed_when_lookup_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(body_string_contains("command=login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "loginresponse": { "sessionkey": "sess-1" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("command", "listOsTypes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "listostypesresponse": {}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("command", "logout"))
        .and(query_param("sessionkey", "sess-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "logoutresponse": { "description": "success" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ini = ini_file(&format!(
        "[main]\n\
         endpoint = {}{API_PATH}\n\
         username = admin\n\
         password = secret\n\
         zonename = zone1\n\
         ostype = Missing%\n\
         \n[register]\ncentos = http://mirror/centos.qcow2\n",
        server.uri()
    ));

    let output = cstemplate_cmd()
        .arg("--ini")
        .arg(ini.path())
        .arg("register")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1), "{}", combined_output(&output));
    let commands: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter_map(|r| {
            r.url
                .query_pairs()
                .find(|(k, _)| k == "command")
                .map(|(_, v)| v.into_owned())
        })
        .collect();
    assert_eq!(commands, vec!["listOsTypes", "logout"]);
}
