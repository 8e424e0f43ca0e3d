use std::process::Command;

/// Settings read with `option_env!`; a change must rebuild the client.
const CONFIG_VARS: &[&str] = &[
    "GATEHOUSE_FIREBASE_API_KEY",
    "GATEHOUSE_FIREBASE_AUTH_DOMAIN",
    "GATEHOUSE_FIREBASE_PROJECT_ID",
    "GATEHOUSE_FIREBASE_STORAGE_BUCKET",
    "GATEHOUSE_FIREBASE_MESSAGING_SENDER_ID",
    "GATEHOUSE_FIREBASE_APP_ID",
    "GATEHOUSE_FIREBASE_MEASUREMENT_ID",
    "GATEHOUSE_LOG_LEVEL",
];

fn short_sha() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=10", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let sha = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (!sha.is_empty()).then_some(sha)
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");
    for var in CONFIG_VARS {
        println!("cargo:rerun-if-env-changed={var}");
    }

    let sha = short_sha().unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=GATEHOUSE_WEB_GIT_SHA={sha}");
}
