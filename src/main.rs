use newsletter_site::models::page::with_page;
use newsletter_site::models::storage::FileStore;
use newsletter_site::utils::display::DisplayFormatter;
use newsletter_site::{Site, SiteConfig};
use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to stderr so the prompt stays readable
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = SiteConfig::from_env();
    info!("Starting newsletter site with proxy {}", config.proxy_url);

    let theme_store = Arc::new(FileStore::new(&config.theme_store_path));
    let site = Site::new(&config, theme_store);
    let display = DisplayFormatter::new();
    let mut system_dark = false;

    println!("=== Newsletter Site ===");
    println!("Commands:");
    println!("  load           - Page ready: init controls and load feeds");
    println!("  posts          - Show the posts of every feed");
    println!("  html <id>      - Show an element's markup");
    println!("  theme          - Toggle dark mode");
    println!("  system <mode>  - Change the system theme (dark|light)");
    println!("  menu           - Toggle the mobile menu");
    println!("  goto <anchor>  - Click an in-page link by element id");
    println!("  scroll <y>     - Scroll the page");
    println!("  hide | show    - Change tab visibility");
    println!("  exit           - Exit the program");

    let mut input = String::new();
    loop {
        input.clear();
        print!("> ");
        io::stdout().flush()?;
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }

        let mut parts = input.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let arg = parts.next();
        match (command, arg) {
            ("", _) => continue,
            ("exit", _) => {
                debug!("Received exit command");
                break;
            }
            ("load", _) => {
                for (key, outcome) in site.on_ready(system_dark).await {
                    println!("{}", display.format_outcome(&key, &outcome));
                }
                println!("Theme: {}", display.format_theme(site.theme().current()));
            }
            ("posts", _) => {
                for feed in site.loader().feeds() {
                    println!("{}", display.format_header(&feed.name));
                    match site.loader().cached(&feed.key) {
                        Some(data) => println!("{}", display.format_posts_table(&data.items)),
                        None => println!("(not loaded)"),
                    }
                }
            }
            ("html", Some(id)) => {
                let html = with_page(site.page(), |page| {
                    page.element(id).map(|el| el.inner_html.clone())
                })
                .flatten();
                match html {
                    Some(html) => println!("{}", html.trim()),
                    None => println!("No element #{}", id),
                }
            }
            ("theme", _) => {
                println!("Theme: {}", display.format_theme(site.toggle_theme()));
            }
            ("system", Some(mode)) => {
                system_dark = mode == "dark";
                site.on_system_theme_change(system_dark);
                println!("Theme: {}", display.format_theme(site.theme().current()));
            }
            ("menu", _) => {
                let open = site.toggle_menu();
                println!("Menu {}", if open { "open" } else { "closed" });
            }
            ("goto", Some(anchor)) => match site.click_anchor(anchor).await {
                Some(top) => println!("Scrolled to {:.0}", top),
                None => println!("Nothing to scroll to"),
            },
            ("scroll", Some(y)) => match y.parse::<f64>() {
                Ok(y) => {
                    for id in site.on_scroll(y) {
                        println!("Revealed #{}", id);
                    }
                    println!("{} section(s) still hidden", site.unrevealed());
                }
                Err(_) => println!("Not a number: {}", y),
            },
            ("hide", _) => {
                site.on_visibility_change(true).await;
            }
            ("show", _) => {
                for (key, outcome) in site.on_visibility_change(false).await {
                    println!("{}", display.format_outcome(&key, &outcome));
                }
            }
            (other, _) => match usage(other) {
                Some(line) => println!("Usage: {}", line),
                None => println!("Unknown command: {}", other),
            },
        }
    }

    info!("Shutting down");
    Ok(())
}

/// Usage line for commands that need an argument.
fn usage(command: &str) -> Option<&'static str> {
    match command {
        "html" => Some("html <id>"),
        "system" => Some("system <dark|light>"),
        "goto" => Some("goto <anchor>"),
        "scroll" => Some("scroll <y>"),
        _ => None,
    }
}
