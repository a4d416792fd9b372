//! Shared testing harness for `foundry-role` integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::fake_bin;

pub(crate) const TENANT_ID: &str = "tenant-test";

/// Isolated working directory, fake `PATH`, and a mock Azure endpoint.
pub(crate) struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
    bin_dir: PathBuf,
    pub(crate) server: mockito::ServerGuard,
}

impl TestContext {
    /// Create a new isolated environment.
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        let bin_dir = root.path().join("bin");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        fs::create_dir_all(&bin_dir).expect("Failed to create fake bin directory");

        Self { root, work_dir, bin_dir, server: mockito::Server::new() }
    }

    pub(crate) fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub(crate) fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }

    /// Command with a service-principal credential pointed at the mock server.
    pub(crate) fn cli(&self) -> Command {
        let mut cmd = self.cli_without_secret();
        cmd.env("AZURE_TENANT_ID", TENANT_ID)
            .env("AZURE_CLIENT_ID", "client-test")
            .env("AZURE_CLIENT_SECRET", "secret-test");
        cmd
    }

    /// Command with no environment credential; token must come from `az`.
    pub(crate) fn cli_without_secret(&self) -> Command {
        let mut cmd = Command::cargo_bin("foundry-role").expect("Failed to locate foundry-role binary");
        cmd.current_dir(&self.work_dir)
            .env_clear()
            .env("HOME", self.root.path())
            .env("PATH", &self.bin_dir)
            .env("AZURE_AUTHORITY_HOST", self.server.url())
            .env("AZURE_RESOURCE_MANAGER_URL", self.server.url());
        cmd
    }

    pub(crate) fn install_powershell(&self, user_id: &str) {
        fake_bin::install_powershell(&self.bin_dir, user_id);
    }

    pub(crate) fn install_failing_powershell(&self) {
        fake_bin::install_failing_powershell(&self.bin_dir);
    }

    pub(crate) fn install_az(&self, token: &str) {
        fake_bin::install_az(&self.bin_dir, token);
    }

    /// Write a file relative to the work directory.
    pub(crate) fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(relative);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }
}
