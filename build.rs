fn main() {
    println!("cargo:rerun-if-changed=assets/gui.ico");
    if std::env::var("CARGO_CFG_TARGET_OS").unwrap() == "windows" {
        let icon_path = "assets/gui.ico";
        if std::path::Path::new(icon_path).exists() {
            let mut res = winres::WindowsResource::new();
            res.set_icon(icon_path);
            res.compile().unwrap();
        } else {
            println!(
                "cargo:warning=Window icon not found at {}, building without an embedded icon",
                icon_path
            );
        }
    }
}
