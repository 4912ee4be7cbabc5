fn main() {
    // Build date reported by the binary at startup
    let build_date = chrono::Utc::now()
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string();
    println!("cargo:rustc-env=SEATKIT_BUILD_DATE={}", build_date);
    println!("cargo:rerun-if-changed=build.rs");
}
