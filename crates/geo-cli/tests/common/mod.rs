#![allow(dead_code)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

pub fn cargo_bin() -> PathBuf {
    if let Ok(path) = env::var("CARGO_BIN_EXE_geodata") {
        return PathBuf::from(path);
    }

    let target_dir = env::var("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| repo_root().join("target"));
    let fallback = target_dir
        .join("debug")
        .join(format!("geodata{}", env::consts::EXE_SUFFIX));

    if fallback.exists() {
        return fallback;
    }

    panic!(
        "CARGO_BIN_EXE_geodata is not set and fallback binary was not found at {}",
        fallback.display()
    );
}

pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).expect("target directory should be created");
    for entry in fs::read_dir(from).expect("testdata should be readable") {
        let entry = entry.expect("directory entry should be readable");
        let target = to.join(entry.file_name());
        if entry.path().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), target).expect("file should be copied");
        }
    }
}

/// A scratch data root seeded with the workspace test dataset
pub fn scratch_root() -> TempDir {
    let dir = tempfile::tempdir().expect("temporary directory should be created");
    copy_dir(&repo_root().join("testdata"), dir.path());
    dir
}

pub fn geodata(root: &Path, args: &[&str]) -> Output {
    Command::new(cargo_bin())
        .arg("--root")
        .arg(root)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("geodata should execute")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
