fn main() {
    println!("cargo:rerun-if-env-changed=VERSION");

    // Release builds pass VERSION (eg: a git tag); fall back to the crate version.
    let version = std::env::var("VERSION").unwrap_or_else(|_| {
        format!("v{}", std::env::var("CARGO_PKG_VERSION").unwrap_or_default())
    });
    println!("cargo:rustc-env=VERSION={}", version);
}
