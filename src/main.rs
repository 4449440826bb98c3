// This binary crate is intentionally minimal.
// All training-engine logic lives in the library (src/lib.rs and its modules).
// Run the demo with:
//   cargo run --example vowel_grid
fn main() {
    println!("glyphnet: a from-scratch MLP for pixel-grid character classification.");
    println!("Run `cargo run --example vowel_grid` to see the demo.");
}
