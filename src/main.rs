#[cfg(any(target_arch = "wasm32", test))]
mod config;
#[cfg(any(target_arch = "wasm32", test))]
mod console;
#[cfg(any(target_arch = "wasm32", test))]
mod controller;
#[cfg(any(target_arch = "wasm32", test))]
mod counter;
#[cfg(any(target_arch = "wasm32", test))]
mod dom;
#[cfg(any(target_arch = "wasm32", test))]
mod menu;
#[cfg(any(target_arch = "wasm32", test))]
mod scheduler;
#[cfg(any(target_arch = "wasm32", test))]
mod scroll;
#[cfg(any(target_arch = "wasm32", test))]
mod tilt;
#[cfg(any(target_arch = "wasm32", test))]
mod typewriter;
#[cfg(any(target_arch = "wasm32", test))]
mod visibility;

#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(test)]
mod testing;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This project is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
