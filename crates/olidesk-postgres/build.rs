#![forbid(unsafe_code)]

/// Due to limitations in Rust's proc-macro API, there is currently no way to
/// signal that a specific procedural macro should be rerun if
/// an external file changes or is added.
///
/// `embed_migrations!` therefore cannot pick up edited migration files on its
/// own; this build script forces a rebuild whenever the directory changes.
fn main() {
    println!("cargo:rerun-if-changed=./migrations");
}
