//! Server-rendered pages.
//!
//! Handlers never build HTML themselves. They hand a view name and a JSON object of
//! values to a [`ViewRenderer`], which the application state holds as a trait object
//! so tests can swap in a renderer that fails or records its calls.
//!
//! [`HtmlViews`] is the built-in renderer. Every page shares one layout: the document
//! title is `Tasknest` followed by the `title` value, the navigation depends on
//! `fromProtected`, and the `errMsg`/`succMsg` flash messages are shown above the
//! page body. All interpolated values are HTML-escaped.

use std::fmt::Write as _;

use serde_json::{Map, Value};

/// Values available to a view, keyed by name.
pub type ViewData = Map<String, Value>;

pub const ERROR_400_VIEW: &str = "error_400";
pub const ERROR_404_VIEW: &str = "error_404";
pub const ERROR_500_VIEW: &str = "error_500";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("unknown view: {0}")]
    UnknownView(String),

    #[error("view {view} could not be rendered: {reason}")]
    Failed { view: String, reason: String },
}

pub trait ViewRenderer: Send + Sync {
    fn render(&self, view: &str, data: &ViewData) -> Result<String, RenderError>;
}

/// Builds [`ViewData`] from `key => value` pairs.
#[macro_export]
macro_rules! view_data {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut data = $crate::views::ViewData::new();
        $( data.insert(($key).to_string(), ::serde_json::json!($value)); )*
        data
    }};
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlViews;

impl ViewRenderer for HtmlViews {
    fn render(&self, view: &str, data: &ViewData) -> Result<String, RenderError> {
        let body = match view {
            "home" => home(data),
            "register" => register(),
            "login" => login(),
            "todo_list" => todo_list(data),
            "todo_create" => todo_create(),
            "todo_update" => todo_update(data),
            ERROR_400_VIEW => error_page("400", "Bad Request", data),
            ERROR_404_VIEW => error_page("404", "Not Found", data),
            ERROR_500_VIEW => error_page("500", "Internal Server Error", data),
            other => return Err(RenderError::UnknownView(other.to_string())),
        };

        Ok(layout(data, &body))
    }
}

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

fn text(data: &ViewData, key: &str) -> String {
    match data.get(key) {
        Some(Value::String(s)) => escape_html(s),
        Some(Value::Null) | None => String::new(),
        Some(other) => escape_html(&other.to_string()),
    }
}

fn flag(data: &ViewData, key: &str) -> bool {
    data.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn layout(data: &ViewData, body: &str) -> String {
    let nav = if flag(data, "fromProtected") {
        let username = text(data, "username");
        let greeting = if username.is_empty() {
            String::new()
        } else {
            format!("<span>Hi, {username}</span>")
        };
        format!(
            r#"{greeting}
      <a href="/todo">Tasks</a>
      <form method="post" action="/logout"><button type="submit">Logout</button></form>"#
        )
    } else {
        r#"<a href="/login">Login</a>
      <a href="/register">Register</a>"#
            .to_string()
    };

    let mut flashes = String::new();
    if !flag(data, "isError") {
        let err = text(data, "errMsg");
        let succ = text(data, "succMsg");
        if !err.is_empty() {
            let _ = write!(flashes, r#"<div class="flash flash-error">{err}</div>"#);
        }
        if !succ.is_empty() {
            let _ = write!(flashes, r#"<div class="flash flash-success">{succ}</div>"#);
        }
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Tasknest {title}</title>
    <link rel="stylesheet" href="/assets/css/styles.css">
    <script src="https://unpkg.com/htmx.org@2.0.4"></script>
    <script src="/assets/js/timezone.js"></script>
  </head>
  <body hx-boost="true">
    <nav>
      <a href="/">Tasknest</a>
      {nav}
    </nav>
    <main>
      {flashes}
      {body}
    </main>
  </body>
</html>
"#,
        title = text(data, "title"),
    )
}

fn home(data: &ViewData) -> String {
    let cta = if flag(data, "fromProtected") {
        r#"<a href="/todo">Go to your tasks</a>"#
    } else {
        r#"<a href="/login">Log in</a> or <a href="/register">create an account</a> to start."#
    };

    format!("<h1>Keep track of what matters</h1>\n      <p>{cta}</p>")
}

fn register() -> String {
    r#"<h1>Register</h1>
      <form method="post" action="/register">
        <label>Email <input type="email" name="email" required></label>
        <label>Password <input type="password" name="password" required></label>
        <label>Username <input type="text" name="username" required></label>
        <button type="submit">Register</button>
      </form>"#
        .to_string()
}

fn login() -> String {
    r#"<h1>Login</h1>
      <form method="post" action="/login">
        <label>Email <input type="email" name="email" required></label>
        <label>Password <input type="password" name="password" required></label>
        <button type="submit">Login</button>
      </form>"#
        .to_string()
}

fn todo_list(data: &ViewData) -> String {
    let mut rows = String::new();
    let todos = data
        .get("todos")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for todo in todos {
        let Some(todo) = todo.as_object() else {
            continue;
        };
        let id = text(todo, "id");
        let done = if flag(todo, "status") { "Done" } else { "Pending" };
        let _ = write!(
            rows,
            r#"
          <tr>
            <td>{id}</td>
            <td><a href="/edit?id={id}">{title}</a></td>
            <td>{done}</td>
            <td><button hx-delete="/delete?id={id}" hx-confirm="Delete this task?" hx-target="body">Delete</button></td>
          </tr>"#,
            title = text(todo, "title"),
        );
    }

    if rows.is_empty() {
        rows.push_str(r#"<tr><td colspan="4">No tasks yet.</td></tr>"#);
    }

    format!(
        r#"<h1>{username}'s tasks</h1>
      <a href="/create">New task</a>
      <table>
        <thead><tr><th>#</th><th>Title</th><th>Status</th><th></th></tr></thead>
        <tbody>{rows}
        </tbody>
      </table>"#,
        username = text(data, "username"),
    )
}

fn todo_create() -> String {
    r#"<h1>New task</h1>
      <form method="post" action="/create">
        <label>Title <input type="text" name="title" required></label>
        <label>Description <textarea name="description"></textarea></label>
        <button type="submit">Create</button>
      </form>"#
        .to_string()
}

fn todo_update(data: &ViewData) -> String {
    let checked = if flag(data, "taskStatus") { " checked" } else { "" };

    format!(
        r#"<h1>Edit task #{id}</h1>
      <p>Created {created}</p>
      <form method="post" action="/edit?id={id}">
        <label>Title <input type="text" name="title" value="{title}" required></label>
        <label>Description <textarea name="description">{desc}</textarea></label>
        <label>Done <input type="checkbox" name="status"{checked}></label>
        <button type="submit">Update</button>
      </form>"#,
        id = text(data, "taskID"),
        created = text(data, "createdAt"),
        title = text(data, "taskTitle"),
        desc = text(data, "taskDesc"),
    )
}

fn error_page(code: &str, reason: &str, data: &ViewData) -> String {
    let home = if flag(data, "fromProtected") { "/todo" } else { "/" };

    format!(
        r#"<h1>{code}</h1>
      <p>{reason}</p>
      <a href="{home}">Back</a>"#
    )
}
