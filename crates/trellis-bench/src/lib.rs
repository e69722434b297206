//! # Trellis Bench
//!
//! Input generators for the scanner benchmarks.
//!
//! Run with: `cargo bench -p trellis-bench`

/// A template of `blocks` repeated control-flow blocks, each wrapping a small
/// element tree with an interpolation.
pub fn generate_template(blocks: usize) -> String {
    let mut out = String::with_capacity(blocks * 48 + 32);
    for i in 0..blocks {
        out.push_str("@if (visible) {<div><span>{{item");
        out.push_str(&i.to_string());
        out.push_str("}}</span></div>}");
    }
    out
}

/// A script element whose body is `statements` repeated assignments.
pub fn generate_script(statements: usize) -> String {
    let mut out = String::with_capacity(statements * 24 + 32);
    out.push_str("<script>");
    for i in 0..statements {
        out.push_str("var x");
        out.push_str(&i.to_string());
        out.push_str(" = ");
        out.push_str(&i.to_string());
        out.push_str(";\n");
    }
    out.push_str("</script>");
    out
}

/// `depth` nested open divs, never closed — a worst-case stack for the state
/// codec.
pub fn generate_deep_nesting(depth: usize) -> String {
    "<div>".repeat(depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generators_produce_expected_shapes() {
        assert!(generate_template(2).starts_with("@if"));
        assert!(generate_script(1).ends_with("</script>"));
        assert_eq!(generate_deep_nesting(3), "<div><div><div>");
    }
}
