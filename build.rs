// build.rs

fn main() {
    // --- Link against X11 ---
    // pkg-config first; fall back to plain linker flags when it cannot find
    // the library (e.g. the .pc file is missing).
    if let Err(e) = pkg_config::probe_library("x11") {
        eprintln!(
            "pkg-config failed for library 'x11' ({}). Falling back to manual linking.",
            e
        );
        println!("cargo:rustc-link-lib=X11");
        println!("cargo:rustc-link-search=/usr/lib");
        eprintln!("Manual linking flags applied. Ensure the X11 development library is installed.");
    } else {
        eprintln!("pkg-config successfully found X11. Linking configured automatically.");
    }
}
