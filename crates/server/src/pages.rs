//! Server-rendered HTML for the query form page.
//!
//! One page, rendered with `format!`: the query form, an optional result
//! block, and an optional calculation-details block. All user-supplied
//! text is escaped before interpolation.

/// Minimal HTML escaping for text interpolated into the page.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the query page.
///
/// `result_text` and `details` are omitted when empty. Result blocks whose
/// text reads as an error get the error styling.
pub fn render_index(query: &str, result_text: &str, details: &str) -> String {
    let query = escape_html(query);

    let result_block = if result_text.is_empty() {
        String::new()
    } else {
        let class = if result_text.starts_with("Error")
            || result_text.contains("error")
            || result_text.contains("Missing")
            || result_text.contains("Could not")
        {
            "result error"
        } else {
            "result"
        };
        format!(
            r#"<div class="{class}"><h3>Result:</h3><p>{}</p></div>"#,
            escape_html(result_text)
        )
    };

    let details_block = if details.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="details"><h3>Calculation Process:</h3><pre>{}</pre></div>"#,
            escape_html(details)
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Financial NLP Calculator</title>
    <style>
        body {{ font-family: sans-serif; margin: 20px; background-color: #f4f4f4; color: #333; }}
        .container {{ max-width: 600px; margin: auto; background-color: #fff; padding: 20px; border-radius: 8px; box-shadow: 0 0 10px rgba(0,0,0,0.1); }}
        h1 {{ color: #333; text-align: center; }}
        label {{ display: block; margin-bottom: 5px; font-weight: bold; }}
        input[type="text"] {{ width: calc(100% - 22px); padding: 10px; margin-bottom: 15px; border: 1px solid #ddd; border-radius: 4px; }}
        button {{ background-color: #007bff; color: white; padding: 10px 15px; border: none; border-radius: 4px; cursor: pointer; font-size: 16px; }}
        button:hover {{ background-color: #0056b3; }}
        .result, .details {{ margin-top: 20px; padding: 15px; border: 1px solid #eee; border-radius: 4px; background-color: #e9f7ef; }}
        .result h3, .details h3 {{ margin-top: 0; color: #196f3d; }}
        .details {{ background-color: #f0f0f0; font-family: monospace; white-space: pre-wrap; font-size: 0.9em; }}
        .error {{ background-color: #f8d7da; color: #721c24; border-color: #f5c6cb; }}
    </style>
</head>
<body>
    <div class="container">
        <h1>Financial NLP Calculator</h1>
        <form action="/calculate" method="post">
            <label for="query">Ask a financial question:</label>
            <input type="text" id="query" name="query" value="{query}" placeholder="e.g., What is the future value of $1000 at 5% for 10 years?">
            <button type="submit">Calculate</button>
        </form>
        {result_block}
        {details_block}
    </div>
</body>
</html>"#
    )
}
