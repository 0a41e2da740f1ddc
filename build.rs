fn main() {
    // Stamp the binary with the build time, shown in the startup log line
    let built_at = chrono::Utc::now().format("%Y-%m-%dT%H:%MZ").to_string();
    println!("cargo:rustc-env=BUILD_DATE={}", built_at);
}
