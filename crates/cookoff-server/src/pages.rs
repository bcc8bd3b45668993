//! HTML pages, rendered as `format!` templates.

use std::fmt::Write;

use cookoff_core::Roster;

use crate::routes::round2;
use crate::storage::{EntrantAggregate, Rating};

const VOTE_JS: &str = include_str!("assets/vote.js");

const STYLE: &str = r#"
  * { margin: 0; padding: 0; box-sizing: border-box; }
  body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
         color: #e0e0e0; background: #0d1117; line-height: 1.6; }
  .container { max-width: 800px; margin: 0 auto; padding: 2rem 1rem; }
  h1 { font-size: 1.6rem; margin-bottom: 0.5rem; color: #f0f0f0; }
  h2 { font-size: 1.2rem; margin: 2rem 0 0.75rem; color: #c0c0c0; }
  p { margin-bottom: 1rem; color: #a0a0a0; }
  table { width: 100%; border-collapse: collapse; margin-bottom: 1.5rem; }
  th, td { padding: 0.5rem 0.75rem; text-align: left; border-bottom: 1px solid #21262d; }
  th { color: #8b949e; font-weight: 600; font-size: 0.85em; text-transform: uppercase; }
  a { color: #58a6ff; text-decoration: none; }
  a:hover { text-decoration: underline; }
  .card { background: #161b22; border: 1px solid #30363d; border-radius: 8px;
          padding: 1rem 1.25rem; margin-bottom: 1rem; }
  .card h3 { color: #f0f0f0; margin-bottom: 0.5rem; }
  label { color: #8b949e; font-size: 0.85em; margin-right: 0.25rem; }
  select, input[type=text], input[type=password] {
    background: #0d1117; color: #e0e0e0; border: 1px solid #30363d;
    border-radius: 4px; padding: 0.3rem 0.5rem; margin-right: 0.75rem; }
  button { background: #238636; color: #fff; border: 0; border-radius: 4px;
           padding: 0.4rem 1rem; cursor: pointer; }
  button:hover { background: #2ea043; }
  .status { margin-left: 0.5rem; font-size: 0.85em; color: #8b949e; }
  .error { color: #f85149; margin-bottom: 1rem; }
"#;

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<div class="container">
{body}
</div>
</body>
</html>"#,
        title = escape_html(title),
    )
}

/// Escape text for inclusion in HTML element or attribute content.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// The public voting form: one card per entrant, plus a live leaderboard.
pub fn vote_page(roster: &Roster) -> String {
    let mut cards = String::new();
    for (index, name) in roster.iter() {
        let _ = write!(
            cards,
            r#"<div class="card" data-index="{index}">
  <h3>{name}</h3>
  <label>Taste</label><select class="taste">{scores}</select>
  <label>Presentation</label><select class="presentation">{scores}</select>
  <label>Easy</label><select class="easy">{scores}</select>
  <label>Judge</label><input type="text" class="judge" maxlength="50" placeholder="optional">
  <button class="save">Save</button><span class="status"></span>
</div>"#,
            name = escape_html(name),
            scores = score_options(),
        );
    }

    let body = format!(
        r#"<h1>Cooking Competition</h1>
<p>Rate each entrant from 1 to 5. You can change your scores at any time.</p>
{cards}
<h2>Leaderboard</h2>
<table id="leaderboard">
  <thead>
    <tr><th>Entrant</th><th>Votes</th><th>Taste</th><th>Presentation</th><th>Easy</th><th>Total</th></tr>
  </thead>
  <tbody></tbody>
</table>
<script>{VOTE_JS}</script>"#,
    );

    page("Cooking Competition", &body)
}

fn score_options() -> String {
    let mut out = String::new();
    for score in 1..=5 {
        let _ = write!(out, r#"<option value="{score}">{score}</option>"#);
    }
    out
}

/// The admin password prompt, optionally with a rejection message.
pub fn admin_login_page(error: Option<&str>) -> String {
    let error_html = error.map_or_else(String::new, |msg| {
        format!(r#"<p class="error">{}</p>"#, escape_html(msg))
    });

    let body = format!(
        r#"<h1>Admin</h1>
{error_html}
<form method="post" action="/admin">
  <label>Password</label>
  <input type="password" name="password" autofocus>
  <button type="submit">Log in</button>
</form>"#,
    );

    page("Admin", &body)
}

/// The detailed admin view: every rating row plus the leaderboard snapshot.
pub fn admin_results_page(
    roster: &Roster,
    ratings: &[Rating],
    leaderboard: &[EntrantAggregate],
) -> String {
    let mut detail_rows = String::new();
    for r in ratings {
        let name = roster.name(r.entrant_index).unwrap_or("");
        let _ = write!(
            detail_rows,
            "<tr><td>{id}</td><td>{name}</td><td>{taste}</td><td>{presentation}</td>\
             <td>{easy}</td><td>{total}</td><td>{judge}</td><td>{device}</td><td>{created}</td></tr>",
            id = r.id,
            name = escape_html(name),
            taste = r.taste,
            presentation = r.presentation,
            easy = r.easy,
            total = r.total(),
            judge = escape_html(r.judge.as_deref().unwrap_or("")),
            device = escape_html(&r.device_id),
            created = r.created_at,
        );
    }

    let mut board_rows = String::new();
    for entry in leaderboard {
        let Some(name) = roster.name(entry.entrant_index) else {
            continue;
        };
        let _ = write!(
            board_rows,
            "<tr><td>{name}</td><td>{votes}</td><td>{avg_total:.2}</td></tr>",
            name = escape_html(name),
            votes = entry.votes,
            avg_total = round2(entry.avg_total),
        );
    }

    let body = format!(
        r#"<h1>Admin — Detailed Results</h1>
<p><a href="/export.csv">Download CSV</a> · <a href="/admin/logout">Log out</a></p>
<h2>Leaderboard</h2>
<table>
  <thead><tr><th>Entrant</th><th>Votes</th><th>Avg Total</th></tr></thead>
  <tbody>{board_rows}</tbody>
</table>
<h2>All Ratings</h2>
<table>
  <thead>
    <tr><th>Id</th><th>Entrant</th><th>Taste</th><th>Presentation</th><th>Easy</th>
        <th>Total</th><th>Judge</th><th>Device</th><th>Created</th></tr>
  </thead>
  <tbody>{detail_rows}</tbody>
</table>"#,
    );

    page("Admin Detailed Results", &body)
}
