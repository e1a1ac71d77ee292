// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_recipe(lines: usize) -> String {
    const LINES: &[&str] = &[
        "200g dark chocolate, chopped",
        "100 g butter",
        "3 eggs, lightly beaten",
        "1 1/2 cups brown sugar and a pinch of salt",
        "2,5 ml vanilla extract",
        "Melt the butter with the chocolate over low heat.",
    ];
    (0..lines)
        .map(|i| LINES[i % LINES.len()])
        .collect::<Vec<_>>()
        .join("\n")
}

#[allow(dead_code)]
pub fn word_spans(text: &str) -> Vec<marginalia_engine::Span> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, unit) in text.encode_utf16().enumerate() {
        let is_space = unit == u16::from(b' ') || unit == u16::from(b'\n');
        match (start, is_space) {
            (None, false) => start = Some(i),
            (Some(from), true) => {
                spans.push(marginalia_engine::Span { from, to: i });
                start = None;
            }
            _ => {}
        }
    }
    spans
}
