// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_source_lines(lines: usize) -> String {
    let mut content = String::new();
    for i in 0..lines {
        let indent = "\t".repeat(i % 4);
        content.push_str(&format!("{indent}let value_{i} = compute({i}, \"row\");\n"));
    }
    content
}

#[allow(dead_code)]
pub fn generate_mixed_delimiters(lines: usize) -> String {
    let delimiters = ["\n", "\r\n", "\r"];
    let mut content = String::new();
    for i in 0..lines {
        content.push_str(&format!("line {i} with some text"));
        content.push_str(delimiters[i % delimiters.len()]);
    }
    content
}
