//! HTML shell wrapped around the expanded script: a full-viewport WebGL
//! canvas (`#c`) and an open `<script>` block that the expanded entry file
//! fills in.

/// Closes the script block opened by [`header`].
pub const FOOTER: &str = "\n</script>";

/// Document header up to and including the opening `<script>` tag.
pub fn header(title: &str) -> String {
    let title = escape_text(title);
    format!(
        r##"<!DOCTYPE html>
<title>{title}</title>
<style>
	html, body {{
		height: 100%;
		margin: 0;
  }}
	#c {{
		width: 100%;
		height: 100%;
		display: block;
	}}
</style>
<canvas id=c></canvas>
<script>
"##
    )
}

/// Wrap an already expanded script body in the full document.
pub fn wrap(title: &str, body: &str) -> String {
    let mut html = header(title);
    html.push_str(body);
    html.push_str(FOOTER);
    html
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
