use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

/// Write an executable `/bin/sh` script named `name` into `bin_dir`.
pub(crate) fn install_script(bin_dir: &Path, name: &str, body: &str) {
    let path = bin_dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write fake binary");
    let mut perms = fs::metadata(&path).expect("Failed to stat fake binary").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("Failed to chmod fake binary");
}

/// Fake `powershell` answering the access-token UserId query.
pub(crate) fn install_powershell(bin_dir: &Path, user_id: &str) {
    install_script(bin_dir, "powershell", &format!("echo '{}'", user_id));
}

/// Fake `powershell` that fails like a missing Az module.
pub(crate) fn install_failing_powershell(bin_dir: &Path) {
    install_script(
        bin_dir,
        "powershell",
        "echo \"Get-AzAccessToken: The term 'Get-AzAccessToken' is not recognized\" >&2\nexit 1",
    );
}

/// Fake `az` printing an access token that expires far in the future.
pub(crate) fn install_az(bin_dir: &Path, token: &str) {
    install_script(
        bin_dir,
        "az",
        &format!(
            "echo '{{\"accessToken\":\"{}\",\"expiresOn\":\"2099-01-01 00:00:00.000000\",\"expires_on\":4070908800,\"tokenType\":\"Bearer\"}}'",
            token
        ),
    );
}
