//! Styled terminal output.

use colored::Colorize;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use pawlike::auth::AuthValues;
use pawlike::{ClientError, Feed, Form, View};

pub fn print_banner() {
    let title = "pawlike";
    println!();
    println!("{}", format!("╔{}╗", "═".repeat(38)).cyan());
    println!("{}", format!("║{title:^38}║").cyan().bold());
    println!("{}", format!("╚{}╝", "═".repeat(38)).cyan());
}

pub fn print_header(view: View, user_id: Option<&str>) {
    let who = match user_id {
        Some(id) => format!("signed in as {id}"),
        None => "not signed in".to_string(),
    };
    println!();
    println!("{}", "─".repeat(40).bright_black());
    println!("{}  {}", view.as_str().to_uppercase().bold().cyan(), who.bright_black());
    println!("{}", "─".repeat(40).bright_black());
}

pub fn print_success(msg: &str) {
    println!("  {} {}", "✓".green().bold(), msg);
}

pub fn print_warning(msg: &str) {
    println!("  {} {}", "⚠".yellow().bold(), msg);
}

pub fn print_info(msg: &str) {
    println!("  {} {}", "ℹ".blue(), msg);
}

/// Show the message users should see: the API's text when there is one.
pub fn print_error(err: &ClientError) {
    let msg = match err.api_error() {
        Some(api) => api.message.clone(),
        None => err.to_string(),
    };
    println!("  {} {}", "✗".red().bold(), msg.red());
}

pub fn print_image(feed: &Feed) {
    if let Some(err) = feed.error() {
        print_warning(&err.message);
    }
    let Some(image) = feed.current() else {
        print_info("no dog yet, press n to fetch one");
        return;
    };

    let heart = if feed.is_liked() {
        "♥ liked".red().bold()
    } else {
        "♡ not liked".bright_black()
    };
    println!("  {}", image.image_url.underline());
    println!("  {heart}");
}

pub fn print_form(form: &Form<AuthValues>) {
    let values = form.values();
    let password = "•".repeat(values.password.chars().count());

    for (field, shown) in [("email", values.email.as_str()), ("password", password.as_str())] {
        let shown = if shown.is_empty() {
            "(empty)".bright_black()
        } else {
            shown.normal()
        };
        println!("  {:<9} {}", format!("{field}:").bold(), shown);
        if let Some(err) = form.visible_error(field) {
            println!("  {:<9} {}", "", err.red());
        }
    }
}

pub fn liked_table(images: &[String]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold).fg(Color::Cyan),
            Cell::new("Liked image")
                .add_attribute(Attribute::Bold)
                .fg(Color::Cyan),
        ]);

    for (i, url) in images.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1).fg(Color::Yellow),
            Cell::new(url).fg(Color::White),
        ]);
    }

    table
}

pub fn menu(view: View, signed_in: bool) -> &'static str {
    match (view, signed_in) {
        (View::Home, true) => "[n]ext  [l]ike/unlike  [p]rofile  l[o]gout  [q]uit",
        (View::Home, false) => "[n]ext  log[i]n  [r]egister  [q]uit",
        (View::Login | View::Register, _) => "[e]mail  [w] password  [s]ubmit  [b]ack  [q]uit",
        (View::Profile, _) => "[b]ack  [r]efresh  l[o]gout  [q]uit",
    }
}
