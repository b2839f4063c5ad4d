#![allow(dead_code)]

use assert_cmd::Command;
use chrono::{Duration, Utc};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use temp_dir::TempDir;

pub const OLD_BUILD_DATE: &str = "Mon 01 Jan 2024 12:00:00 UTC";

pub fn setup_test_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Build date `days` ago in the format pacman prints.
pub fn build_date_days_ago(days: i64) -> String {
    (Utc::now() - Duration::days(days))
        .format("%a %d %b %Y %H:%M:%S UTC")
        .to_string()
}

/// Behaviour of the fake `pacman` script.
pub struct FakePacman {
    pub listing: String,
    pub listing_status: i32,
    pub listing_stderr: String,
    /// `(name, info block)`; names not listed fail with status 1.
    pub infos: Vec<(String, String)>,
    pub update_status: i32,
}

impl Default for FakePacman {
    fn default() -> Self {
        Self {
            listing: String::new(),
            listing_status: 0,
            listing_stderr: String::new(),
            infos: Vec::new(),
            update_status: 0,
        }
    }
}

impl FakePacman {
    pub fn with_listing(mut self, listing: &str) -> Self {
        self.listing = listing.to_string();
        self
    }

    pub fn with_listing_failure(mut self, status: i32, stderr: &str) -> Self {
        self.listing_status = status;
        self.listing_stderr = stderr.to_string();
        self
    }

    pub fn with_build_date(mut self, name: &str, build_date: &str) -> Self {
        self.infos.push((
            name.to_string(),
            format!("Name            : {name}\nBuild Date      : {build_date}\n"),
        ));
        self
    }

    pub fn with_info(mut self, name: &str, info: &str) -> Self {
        self.infos.push((name.to_string(), info.to_string()));
        self
    }

    pub fn with_update_status(mut self, status: i32) -> Self {
        self.update_status = status;
        self
    }

    fn script(&self) -> String {
        let info_cases: String = self
            .infos
            .iter()
            .map(|(name, info)| format!("      {name}) printf '%s' '{info}' ;;\n"))
            .collect();

        format!(
            r#"#!/bin/sh
case "$1" in
  -Qu)
    printf '%s' '{listing}'
    printf '%s' '{listing_stderr}' >&2
    exit {listing_status}
    ;;
  -Si)
    case "$2" in
{info_cases}      *) echo "error: package '$2' was not found" >&2; exit 1 ;;
    esac
    ;;
  -Sy)
    shift
    echo "updating $*"
    exit {update_status}
    ;;
esac
"#,
            listing = self.listing,
            listing_stderr = self.listing_stderr,
            listing_status = self.listing_status,
            update_status = self.update_status,
        )
    }

    /// Writes the fake `pacman` and a pass-through `sudo` into `dir`.
    pub fn install(&self, dir: &TempDir) -> (PathBuf, PathBuf) {
        let pacman = write_executable(dir.path(), "pacman", &self.script());
        let sudo = write_executable(
            dir.path(),
            "sudo",
            "#!/bin/sh\necho \"elevated: $1\"\nexec \"$@\"\n",
        );
        (pacman, sudo)
    }
}

fn write_executable(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write script");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make script executable");
    path
}

pub fn get_bin() -> Command {
    let mut cmd = Command::cargo_bin("arch-update").expect("Failed to find binary");
    cmd.env_remove("RUST_LOG")
        .env_remove("ARCH_UPDATE_JOBS")
        .env_remove("ARCH_UPDATE_TIMEOUT")
        .env("ARCH_UPDATE_PACMAN", "pacman")
        .env("ARCH_UPDATE_SUDO", "sudo");
    cmd
}

/// Binary wired to a fake pacman installed in a fresh temp dir.
pub fn get_bin_with_pacman(pacman: &FakePacman) -> (Command, TempDir) {
    let temp_dir = setup_test_dir();
    let (pacman_path, sudo_path) = pacman.install(&temp_dir);

    let mut cmd = get_bin();
    cmd.current_dir(temp_dir.path())
        .env("ARCH_UPDATE_PACMAN", pacman_path)
        .env("ARCH_UPDATE_SUDO", sudo_path);
    (cmd, temp_dir)
}
