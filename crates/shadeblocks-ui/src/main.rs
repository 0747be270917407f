//! Showcase binary: mounts the wizard and poll demo page in the browser.

#[cfg(target_arch = "wasm32")]
fn main() {
    shadeblocks_ui::run_app();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::io::Result<()> {
    use std::io::Write;

    writeln!(
        std::io::stderr().lock(),
        "shadeblocks showcase renders in the browser only; serve it with `trunk serve` from crates/shadeblocks-ui."
    )
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    #[test]
    fn native_build_points_at_the_browser_showcase() -> std::io::Result<()> {
        super::main()
    }
}
