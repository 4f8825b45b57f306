use std::{
    io::{BufRead, BufReader, Read, Write},
    net::TcpListener,
    path::PathBuf,
    thread,
};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Isolated environment: its own database, profile and config file.
struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self::with_remote("http://127.0.0.1:9", "")
    }

    /// Points both remote services at `base_url` with the given API key.
    fn with_remote(base_url: &str, api_key: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temporary directory");
        let config = serde_json::json!({
            "places": {"base_url": base_url, "api_key": api_key},
            "chat": {"base_url": base_url, "api_key": api_key},
            "storage": {
                "database_path": dir.path().join("trips.db"),
                "profile_path": dir.path().join("profile.json"),
            },
            "timeout_secs": 5,
        });
        std::fs::write(dir.path().join("config.json"), config.to_string())
            .expect("Failed to write config");
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("itin").expect("Failed to find itin binary");
        cmd.env_remove("ITINERIA_PLACES_API_KEY")
            .env_remove("ITINERIA_CHAT_API_KEY")
            .arg("--no-color")
            .arg("--config")
            .arg(self.path("config.json"));
        cmd
    }

    fn run(&self, args: &[&str]) -> String {
        let output = self.cmd().args(args).assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Invalid UTF-8")
    }
}

/// Pulls the id out of "# <id>. ..." or "ID: <id>" lines.
fn extract_id_from_output(output: &str) -> String {
    for line in output.lines() {
        if let Some(rest) = line.trim_start_matches('#').strip_prefix(' ') {
            if let Some((id, _)) = rest.split_once('.') {
                if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) {
                    return id.to_string();
                }
            }
        }
    }

    if let Some(start) = output.find("ID: ") {
        return output[start + 4..]
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
    }
    panic!("No ID found in output: {output}");
}

/// Serves one canned JSON response and hands back the request line.
fn serve_once(body: &'static str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();

        let mut content_length = 0;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if line == "\r\n" || line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap();
                }
            }
        }
        let mut request_body = vec![0; content_length];
        reader.read_exact(&mut request_body).unwrap();

        let mut stream = reader.into_inner();
        write!(
            stream,
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        request_line
    });

    (base_url, handle)
}

#[test]
fn test_cli_list_empty_trips() {
    let env = TestEnv::new();

    env.cmd()
        .args(["trip", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No itineraries found."));
}

#[test]
fn test_cli_no_command_lists_trips() {
    let env = TestEnv::new();
    env.run(&["trip", "create", "Norway", "Fjords"]);

    env.cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("## Norway (ID: 1)"));
}

#[test]
fn test_cli_database_file_overrides_config() {
    let env = TestEnv::new();
    let db_path = env.path("other.db");

    env.cmd()
        .args(["--database-file", db_path.to_str().unwrap()])
        .args(["trip", "create", "Elsewhere", "Other db"])
        .assert()
        .success();

    assert!(db_path.exists());
    env.cmd()
        .args(["trip", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No itineraries found."));
}

#[test]
fn test_cli_create_and_show_trip() {
    let env = TestEnv::new();

    let output = env.run(&[
        "trip",
        "create",
        "Japan",
        "Cherry blossoms",
        "--start",
        "2030-03-28",
        "--end",
        "2030-04-10",
    ]);
    assert!(output.contains("Created itinerary with ID: 1"));
    let id = extract_id_from_output(&output);

    env.cmd()
        .args(["trip", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("# 1. Japan"))
        .stdout(predicate::str::contains("28 Mar 2030 to 10 Apr 2030 (14 days)"))
        .stdout(predicate::str::contains("Cherry blossoms"))
        .stdout(predicate::str::contains("No destinations planned yet."));
}

#[test]
fn test_cli_create_trip_rejects_reversed_dates() {
    let env = TestEnv::new();

    env.cmd()
        .args(["trip", "create", "Backwards", "Oops"])
        .args(["--start", "2030-05-02", "--end", "2030-05-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to create itinerary"));
}

#[test]
fn test_cli_list_filters_by_name() {
    let env = TestEnv::new();
    env.run(&["trip", "create", "Iceland", "Ring road"]);
    env.run(&["trip", "create", "Chile", "Patagonia"]);

    env.cmd()
        .args(["trip", "list", "--name", "ice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Iceland"))
        .stdout(predicate::str::contains("Chile").not());
}

#[test]
fn test_cli_update_trip() {
    let env = TestEnv::new();
    let id = extract_id_from_output(&env.run(&["trip", "create", "Peru", "Andes"]));

    env.cmd()
        .args(["trip", "update", &id, "--name", "Peru and Bolivia"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated itinerary with ID: 1"))
        .stdout(predicate::str::contains("- Name: Peru and Bolivia"))
        .stdout(predicate::str::contains("# 1. Peru and Bolivia"));
}

#[test]
fn test_cli_update_trip_without_changes_fails() {
    let env = TestEnv::new();
    let id = extract_id_from_output(&env.run(&["trip", "create", "Peru", "Andes"]));

    env.cmd()
        .args(["trip", "update", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to update"));
}

#[test]
fn test_cli_show_missing_trip_fails() {
    let env = TestEnv::new();

    env.cmd()
        .args(["trip", "show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("42"));
}

#[test]
fn test_cli_items_lifecycle() {
    let env = TestEnv::new();
    let trip = extract_id_from_output(&env.run(&["trip", "create", "Italy", "Summer"]));

    let output = env.run(&[
        "item", "add", &trip, "Rome", "--start", "2030-07-01", "--end", "2030-07-03",
    ]);
    assert!(output.contains("Added planner item with ID: 1 to itinerary 1"));
    env.run(&["item", "add", &trip, "Florence", "--notes", "Uffizi"]);

    env.cmd()
        .args(["trip", "show", &trip])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Planner"))
        .stdout(predicate::str::contains("### 1. Rome"))
        .stdout(predicate::str::contains("### 2. Florence"));

    env.cmd()
        .args(["item", "update", "2", "--destination", "Firenze"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated planner item with ID: 2"))
        .stdout(predicate::str::contains("Firenze"));

    env.cmd()
        .args(["item", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted planner item 'Rome' (ID: 1)"));

    env.cmd()
        .args(["item", "show", "1"])
        .assert()
        .failure();
}

#[test]
fn test_cli_add_item_to_missing_trip_fails() {
    let env = TestEnv::new();

    env.cmd()
        .args(["item", "add", "7", "Atlantis"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to add planner item"));
}

#[test]
fn test_cli_delete_trip_requires_confirmation() {
    let env = TestEnv::new();
    let trip = extract_id_from_output(&env.run(&["trip", "create", "Spain", "Tapas"]));
    env.run(&["item", "add", &trip, "Madrid"]);
    env.run(&["item", "add", &trip, "Seville"]);

    env.cmd()
        .args(["trip", "delete", &trip])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--confirm"));

    env.cmd()
        .args(["trip", "delete", &trip, "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Deleted itinerary 'Spain' (ID: 1) and 2 planner items",
        ));

    env.cmd()
        .args(["item", "show", "1"])
        .assert()
        .failure();
}

#[test]
fn test_cli_trip_photo_round_trip() {
    let env = TestEnv::new();
    let trip = extract_id_from_output(&env.run(&["trip", "create", "Morocco", "Desert"]));
    let input = env.path("cover.png");
    let output = env.path("out.png");
    std::fs::write(&input, b"\x89PNG\r\n\x1a\nfake").unwrap();

    env.cmd()
        .args(["trip", "photo", &trip, "--file", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Stored photo for itinerary 1"));

    env.cmd()
        .args(["trip", "photo", &trip, "--output", output.to_str().unwrap()])
        .assert()
        .success();
    assert_eq!(std::fs::read(&output).unwrap(), std::fs::read(&input).unwrap());

    env.cmd()
        .args(["trip", "photo", &trip, "--clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Removed photo from itinerary 1"));

    env.cmd()
        .args(["trip", "photo", &trip, "--clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: No photo stored for itinerary 1"));
}

#[test]
fn test_cli_profile_save_and_show() {
    let env = TestEnv::new();

    env.cmd()
        .args(["profile", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No profile saved."));

    env.cmd()
        .args(["profile", "save", "--name", "Daniel La"])
        .args(["--email", "daniel@icloud.com", "--username", "Daniel4la"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Daniel La (DL)"))
        .stdout(predicate::str::contains("Success: Saved profile to"));

    env.cmd()
        .args(["profile", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("daniel@icloud.com"))
        .stdout(predicate::str::contains("Daniel4la"));

    assert!(env.path("profile.json").exists());
}

#[test]
fn test_cli_profile_save_warns_on_invalid_email() {
    let env = TestEnv::new();

    env.cmd()
        .args(["profile", "save", "--name", "Ada", "--email", "ada@example.org"])
        .args(["--username", "ada"])
        .assert()
        .success()
        .stderr(predicate::str::contains("not a valid email address"));
}

#[test]
fn test_cli_check_email_and_initials() {
    let env = TestEnv::new();

    env.cmd()
        .args(["profile", "check-email", "daniel@icloud.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success:"));
    env.cmd()
        .args(["profile", "check-email", "daniel@icloud.con"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error:"));

    env.cmd()
        .args(["profile", "initials", "grace brewster hopper"])
        .assert()
        .success()
        .stdout(predicate::str::diff("GH\n"));
    env.cmd()
        .args(["profile", "initials", "1"])
        .assert()
        .failure();
}

#[test]
fn test_cli_remote_commands_need_api_keys() {
    let env = TestEnv::new();

    env.cmd()
        .args(["places", "nearby", "--lat", "-37.81", "--lng", "144.96"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ITINERIA_PLACES_API_KEY"));

    env.cmd()
        .args(["chat", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ITINERIA_CHAT_API_KEY"));
}

#[test]
fn test_cli_places_search_against_local_server() {
    let (base_url, server) = serve_once(
        r#"{"results": [{"place_id": "p-1", "name": "Queen Victoria Market",
            "formatted_address": "Queen St, Melbourne",
            "geometry": {"location": {"lat": -37.8076, "lng": 144.9568},
                "viewport": {"northeast": {"lat": -37.80, "lng": 144.96},
                             "southwest": {"lat": -37.81, "lng": 144.95}}}}],
            "status": "OK"}"#,
    );
    let env = TestEnv::with_remote(&base_url, "secret");

    env.cmd()
        .args(["places", "search", "night market", "--lat", "-37.8136", "--lng", "144.9631"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Queen Victoria Market"));

    let request_line = server.join().unwrap();
    assert!(request_line.starts_with(
        "GET /textsearch/json?query=night%20market&location=-37.8136,144.9631&key=secret "
    ));
}

#[test]
fn test_cli_chat_one_shot_against_local_server() {
    let (base_url, server) = serve_once(
        r#"{"id": "chatcmpl-1", "choices": [{"message": {"role": "assistant", "content": "\"Visit Hobart.\""}}]}"#,
    );
    let env = TestEnv::with_remote(&base_url, "sk-test");

    env.cmd()
        .args(["chat", "Where", "should", "I", "go?"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Visit Hobart.\n"));

    assert!(server.join().unwrap().starts_with("POST /chat/completions "));
}
