//! Background page rendering.

use crate::config::output_file_name;
use crate::entry::EntryMap;

/// Marker in [`BACKGROUND_TEMPLATE`] replaced by the script tags.
pub const BACKGROUND_ENTRY_PLACEHOLDER: &str = "<!--background-entry-->";

pub const BACKGROUND_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">

<head>
    <meta charset="UTF-8">
    <meta http-equiv="X-UA-Compatible" content="IE=edge">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>chrome extension background</title>
    <!--background-entry-->
</head>

<body>
</body>

</html>
"#;

/// Render the background page, one module script per entry in entry order.
///
/// ```
/// use crx_bundler::{EntryMap, render_background_html};
///
/// let html = render_background_html(&EntryMap::single("main", "src/main.ts"));
/// assert!(html.contains(r#"<script type="module" src="main.js"></script>"#));
/// ```
pub fn render_background_html(entries: &EntryMap) -> String {
    let scripts = entries
        .names()
        .map(|name| {
            format!(
                r#"<script type="module" src="{}"></script>"#,
                output_file_name(name)
            )
        })
        .collect::<Vec<_>>()
        .join("\n    ");

    BACKGROUND_TEMPLATE.replacen(BACKGROUND_ENTRY_PLACEHOLDER, &scripts, 1)
}
