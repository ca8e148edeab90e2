//! Index page bodies: plain text for command-line clients, HTML otherwise.

/// `User-Agent` prefix that selects the plain-text body.
pub const PLAIN_TEXT_AGENT: &str = "curl";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexFormat {
    PlainText,
    Html,
}

impl IndexFormat {
    /// Anything but a `curl` agent, including no agent at all, gets HTML.
    pub fn negotiate(user_agent: Option<&str>) -> Self {
        match user_agent {
            Some(ua) if ua.starts_with(PLAIN_TEXT_AGENT) => IndexFormat::PlainText,
            _ => IndexFormat::Html,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            IndexFormat::PlainText => "text/plain; charset=utf-8",
            IndexFormat::Html => "text/html; charset=utf-8",
        }
    }
}

pub fn plain_text(hostname: &str, count: i64, extra_text: Option<&str>) -> String {
    match extra_text {
        Some(extra) => format!("{extra} {hostname} {count}\n"),
        None => format!("{hostname} {count}\n"),
    }
}

pub fn html(hostname: &str, count: i64, extra_text: Option<&str>) -> String {
    let extra_block = extra_text
        .map(|t| format!("<h2>{}</h2>", escape_html(t)))
        .unwrap_or_default();
    let hostname = escape_html(hostname);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{hostname} {count}</title>
<link rel="icon" href="/favicon.ico">
<style>
html, body {{ height: 100%; margin: 0; }}
.center-parent {{ width: 100%; height: 100%; display: table; text-align: center; }}
.center-parent > .center-child {{ display: table-cell; vertical-align: middle; }}
h1 {{ font-family: Arial; font-size: 5em; }}
h2 {{ font-family: Arial; font-size: 2em; }}
</style>
</head>
<body>
<section class="center-parent">
  <div class="center-child">
    {extra_block}
    <h1>{count}</h1>
    <h2>{hostname}</h2>
  </div>
</section>
</body>
</html>
"#
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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
