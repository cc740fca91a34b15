fn main() {
    // Stamp the build date so `toolmotion::BUILD_DATE` can be logged at startup
    let build_date = chrono::Utc::now().format("%Y-%m-%d").to_string();
    println!("cargo:rustc-env=BUILD_DATE={}", build_date);
    println!("cargo:rerun-if-changed=build.rs");
}
