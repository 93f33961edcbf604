//! HTML views
//!
//! Pages are assembled from string fragments with embedded CSS, the same
//! way trace reports are: no template engine, every dynamic value escaped.

use serde_json::{Map, Value};

use crate::runner::TestKind;

/// Client script served at `/static/js/script.js`
pub const SCRIPT: &str = include_str!("../static/js/script.js");

/// Escape HTML special characters to prevent XSS
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate embedded CSS styles
fn generate_styles() -> &'static str {
    r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 0;
            background-color: #f5f5f5;
            color: #333;
        }
        body.dark-theme {
            background-color: #1e1e1e;
            color: #ddd;
        }
        nav {
            background-color: #4a90d9;
            padding: 12px 20px;
        }
        nav a {
            color: white;
            margin-right: 16px;
            text-decoration: none;
            font-weight: bold;
        }
        main {
            margin: 20px;
        }
        table {
            border-collapse: collapse;
            width: 100%;
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            margin-bottom: 20px;
        }
        th, td {
            border: 1px solid #ddd;
            padding: 8px;
            text-align: left;
        }
        th {
            background-color: #4a90d9;
            color: white;
        }
        tr:nth-child(even) {
            background-color: #f9f9f9;
        }
        .panel {
            background-color: white;
            padding: 16px;
            margin-bottom: 20px;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
        }
        .message-error {
            color: #cc0000;
        }
        .message-success {
            color: #2e7d32;
        }
        .result img {
            max-width: 100%;
        }
        .footer {
            margin-top: 20px;
            font-size: 0.8em;
            color: #888;
            text-align: center;
        }
        "#
}

/// Wrap `body` in the shared document skeleton
fn layout(title: &str, body: &str) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html lang=\"en\">\n");

    html.push_str("<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str(&format!("    <title>{}</title>\n", escape_html(title)));
    html.push_str("    <style>");
    html.push_str(generate_styles());
    html.push_str("</style>\n");
    html.push_str("</head>\n");

    html.push_str("<body>\n");
    html.push_str("    <nav>\n");
    html.push_str("        <a href=\"/\">Home</a>\n");
    html.push_str("        <a href=\"/tests\">Tests</a>\n");
    html.push_str("        <a href=\"/documentation\">Documentation</a>\n");
    html.push_str("        <a href=\"/about\">About</a>\n");
    html.push_str("        <button id=\"themeToggle\" type=\"button\">Dark mode</button>\n");
    html.push_str("    </nav>\n");
    html.push_str("    <main>\n");
    html.push_str(body);
    html.push_str("    </main>\n");
    html.push_str("    <div class=\"footer\">\n");
    html.push_str("        Non-parametric statistics lab\n");
    html.push_str("    </div>\n");
    html.push_str("    <script src=\"/static/js/script.js\"></script>\n");
    html.push_str("</body>\n");
    html.push_str("</html>\n");

    html
}

/// Landing page
pub fn index_page() -> String {
    let body = r#"        <h1>Non-parametric tests</h1>
        <div class="panel">
            <p>Run rank-based hypothesis tests on a built-in sample dataset or
            inspect your own CSV file. No distributional assumption is made about
            the data.</p>
            <p><a href="/tests">Open the test bench</a></p>
        </div>
"#;
    layout("Non-parametric tests", body)
}

/// Test bench: dataset preview, test selector, upload form
pub fn tests_page(columns: &[String], rows: &[Map<String, Value>]) -> String {
    let mut body = String::new();

    body.push_str("        <h1>Test bench</h1>\n");

    body.push_str("        <div class=\"panel\">\n");
    body.push_str("            <h2>Run a test</h2>\n");
    body.push_str("            <select id=\"testSelect\">\n");
    body.push_str("                <option value=\"\">Choose a test</option>\n");
    for kind in TestKind::ALL {
        body.push_str(&format!(
            "                <option value=\"{}\">{}</option>\n",
            kind.wire_name(),
            kind.display_name()
        ));
    }
    body.push_str("            </select>\n");
    body.push_str("            <button id=\"btnRunTest\" type=\"button\" disabled>Run</button>\n");
    body.push_str("            <div id=\"resultsContainer\" class=\"result\"></div>\n");
    body.push_str("        </div>\n");

    body.push_str("        <div class=\"panel\">\n");
    body.push_str("            <h2>Upload a CSV file</h2>\n");
    body.push_str("            <input id=\"fileInput\" type=\"file\" accept=\".csv\">\n");
    body.push_str("            <button id=\"btnUpload\" type=\"button\">Upload</button>\n");
    body.push_str("            <div id=\"uploadMessage\"></div>\n");
    body.push_str("        </div>\n");

    body.push_str("        <h2>Data preview</h2>\n");
    body.push_str(&render_table(columns, rows));

    layout("Test bench", &body)
}

/// Render rows as an HTML table, cells looked up by column name
pub fn render_table(columns: &[String], rows: &[Map<String, Value>]) -> String {
    let mut html = String::new();
    html.push_str("        <table id=\"dataPreview\">\n");

    let header: Vec<String> = columns
        .iter()
        .map(|c| format!("<th>{}</th>", escape_html(c)))
        .collect();
    html.push_str(&format!("            <tr>{}</tr>\n", header.join("")));

    for row in rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|c| format!("<td>{}</td>", escape_html(&format_cell(row.get(c)))))
            .collect();
        html.push_str(&format!("            <tr>{}</tr>\n", cells.join("")));
    }

    html.push_str("        </table>\n");
    html
}

fn format_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if n.is_f64() => format!("{:.3}", f),
            _ => n.to_string(),
        },
        Some(other) => other.to_string(),
    }
}

/// About page
pub fn about_page() -> String {
    let body = r#"        <h1>About</h1>
        <div class="panel">
            <p>A small lab for exploring non-parametric statistics. The sample
            dataset holds three groups of 30 observations with a continuous value,
            an integer score between 1 and 9 and an exponential time.</p>
            <p>The data is regenerated from a fixed seed on every request, so the
            same test always returns the same numbers.</p>
        </div>
"#;
    layout("About", body)
}

/// Documentation page
pub fn documentation_page() -> String {
    let body = r#"        <h1>Documentation</h1>
        <div class="panel">
            <h2>Wilcoxon signed-rank</h2>
            <p>Paired comparison of groups A and B on <code>value</code>. Exact
            null distribution for up to 50 untied pairs.</p>
            <h2>Mann-Whitney U</h2>
            <p>Independent comparison of groups A and B on <code>value</code>.
            The statistic is U for group A.</p>
            <h2>Kruskal-Wallis H</h2>
            <p>Compares <code>value</code> across every group, chi-square
            reference with k - 1 degrees of freedom.</p>
            <h2>Spearman</h2>
            <p>Rank correlation between <code>value</code> and
            <code>score</code>.</p>
            <h2>Friedman</h2>
            <p>Repeated-measures test over three synthetic treatments of 30
            blocks, generated independently of the sample dataset.</p>
        </div>
        <div class="panel">
            <h2>Reading the p-value</h2>
            <table>
                <tr><th>p-value</th><th>Interpretation</th></tr>
                <tr><td>p &lt; 0.001</td><td>very significant</td></tr>
                <tr><td>p &lt; 0.01</td><td>significant (0.01)</td></tr>
                <tr><td>p &lt; 0.05</td><td>significant (0.05)</td></tr>
                <tr><td>p &ge; 0.05</td><td>not significant</td></tr>
            </table>
        </div>
        <div class="panel">
            <h2>API</h2>
            <p><code>POST /execute_test</code> with
            <code>{"test_type": "wilcoxon"}</code> (also <code>mann_whitney</code>,
            <code>kruskal_wallis</code>, <code>spearman</code>,
            <code>friedman</code>).</p>
            <p><code>POST /upload_data</code> with a multipart field
            <code>file</code> holding a <code>.csv</code> file.</p>
        </div>
"#;
    layout("Documentation", body)
}
