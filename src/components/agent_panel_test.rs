use super::*;

#[test]
fn markdown_strips_raw_html() {
    let html = render_markdown_html("**bold** <script>alert(1)</script>\n\n<div>block</div>");
    assert!(html.contains("<strong>bold</strong>"));
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<div>"));
}

#[test]
fn markdown_renders_tables_task_lists_and_strikethrough() {
    let html = render_markdown_html("| a | b |\n|---|---|\n| 1 | 2 |\n\n- [x] done\n- [ ] todo\n\n~~old~~");
    assert!(html.contains("<table>"));
    assert!(html.contains("checkbox"));
    assert!(html.contains("<del>old</del>"));
}
