// This binary crate is intentionally minimal.
// All training and inference logic lives in the library (src/lib.rs and its modules).
// Run the XOR demo with:
//   cargo run --example xor
fn main() {
    println!("sigmoid-mlp: a two-layer sigmoid MLP trained with momentum backpropagation.");
    println!("Run `cargo run --example xor` to see the XOR demo.");
}
