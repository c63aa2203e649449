//! Bare HTML pages for browser traffic. No styling, values escaped.

/// Escape a value for interpolation into HTML text or attributes.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn error_block(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|e| format!("<li>{}</li>", escape(e)))
        .collect();
    format!("<ul>{items}</ul>\n")
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        body
    )
}

/// Registration form, re-rendered with messages and pre-filled fields on
/// failure. The password is never echoed back.
pub fn register_page(errors: &[String], name: &str, email: &str) -> String {
    let body = format!(
        "<h1>Register</h1>\n{errors}<form method=\"post\" action=\"/register\">\n\
         <p><label>Name <input type=\"text\" name=\"name\" value=\"{name}\"></label></p>\n\
         <p><label>Email <input type=\"email\" name=\"email\" value=\"{email}\"></label></p>\n\
         <p><label>Password <input type=\"password\" name=\"password\"></label></p>\n\
         <p><button type=\"submit\">Register</button></p>\n\
         </form>\n<p><a href=\"/login\">Already have an account? Log in</a></p>\n",
        errors = error_block(errors),
        name = escape(name),
        email = escape(email),
    );
    page("Register", &body)
}

/// Login form. `registered` shows the note displayed after a successful
/// registration redirect.
pub fn login_page(errors: &[String], email: &str, registered: bool) -> String {
    let notice = if registered {
        "<p>Registration completed. You can now log in.</p>\n"
    } else {
        ""
    };
    let body = format!(
        "<h1>Log in</h1>\n{notice}{errors}<form method=\"post\" action=\"/login\">\n\
         <p><label>Email <input type=\"email\" name=\"email\" value=\"{email}\"></label></p>\n\
         <p><label>Password <input type=\"password\" name=\"password\"></label></p>\n\
         <p><button type=\"submit\">Log in</button></p>\n\
         </form>\n<p><a href=\"/register\">Need an account? Register</a></p>\n",
        notice = notice,
        errors = error_block(errors),
        email = escape(email),
    );
    page("Log in", &body)
}

/// Landing page for a logged-in session.
pub fn landing_page(name: &str, email: &str) -> String {
    let body = format!(
        "<h1>Welcome, {name}</h1>\n<p>You are logged in as {email}.</p>\n",
        name = escape(name),
        email = escape(email),
    );
    page("Welcome", &body)
}
