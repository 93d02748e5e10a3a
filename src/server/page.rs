//! Gallery page markup.

use std::fmt::Write;

use crate::capture::retention::ALIAS_NAME;

/// Render the gallery page.
///
/// `listing` holds the kept capture names, newest first, or the error text from
/// listing the working directory.
pub fn render(prefix: &str, message: &str, listing: Result<&[String], &str>) -> String {
    let prefix = escape_html(prefix);
    let mut html = String::with_capacity(4096);

    let _ = write!(
        html,
        "<!DOCTYPE html>\n\
         <html><head><meta http-equiv=\"refresh\" content=\"60\" /><title>Camera</title></head>\n\
         <body>\n\
         <p>{message}</p>\n\
         <p><img src=\"{prefix}{ALIAS_NAME}\" width=\"640\" height=\"480\" alt=\"{ALIAS_NAME}\" /></p>\n",
        message = escape_html(message),
    );

    match listing {
        Ok(names) => {
            html.push_str("<ul>\n");
            for name in names {
                let name = escape_html(name);
                let _ = writeln!(html, "<li><a href=\"{prefix}{name}\">{name}</a></li>");
            }
            html.push_str("</ul>\n");
        }
        Err(error) => {
            let _ = writeln!(html, "<pre>{}</pre>", escape_html(error));
        }
    }

    html.push_str("</body></html>\n");
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
