#[cfg(target_arch = "wasm32")]
fn main() {
    qrshare::web::launch();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("qrshare is a WebAssembly app; build it for wasm32-unknown-unknown (e.g. `dx serve` or `trunk serve`).");
    std::process::exit(1);
}
