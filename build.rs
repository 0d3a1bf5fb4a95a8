fn main() {
    // include_dir! embeds frontend/dist at compile time, but cargo does
    // not track non-Rust files on its own.
    println!("cargo:rerun-if-changed=frontend/dist");
}
