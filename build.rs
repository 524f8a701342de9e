use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");

    let revision = match git(&["rev-parse", "--short", "HEAD"]).filter(|hash| !hash.is_empty()) {
        Some(hash) if git(&["status", "--porcelain"]).is_some_and(|status| !status.is_empty()) => {
            format!("{hash}-dirty")
        }
        Some(hash) => hash,
        None => "unknown".to_string(),
    };
    println!("cargo:rustc-env=BALANCE_PROJECTOR_REVISION={revision}");

    let built = chrono::Utc::now().format("%Y-%m-%d");
    println!("cargo:rustc-env=BALANCE_PROJECTOR_BUILT={built}");
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout).ok().map(|text| text.trim().to_string())
}
