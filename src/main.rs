use std::time::Duration;

use anyhow::{Result, bail};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use pokedex_catalog::config::AppConfig;
use pokedex_catalog::resource::Resource;
use pokedex_catalog::session::{SessionHandle, spawn_session};

const COLOR_WAIT: Duration = Duration::from_secs(10);

#[derive(Parser)]
#[command(name = "pokedex")]
#[command(about = "Browse the PokeAPI catalog from the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Number of pages to load before printing
    #[arg(short, long, default_value_t = 1)]
    pages: usize,

    /// Filter the loaded entries by name or number
    #[arg(short, long)]
    search: Option<String>,

    /// Fetch and print the detail record for this name
    #[arg(short, long)]
    detail: Option<String>,

    /// Sample the dominant image color of each printed entry
    #[arg(long)]
    colors: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    let mut session = spawn_session(&config)?;
    load_pages(&mut session, cli.pages.max(1)).await?;

    if let Some(query) = &cli.search {
        session.search(query.as_str())?;
        session
            .wait_for(|state| state.current_query() == query.as_str())
            .await?;
    }

    let state = session.snapshot();
    if cli.colors {
        for entry in &state.items {
            session.sample_color(entry.number)?;
        }
        let wanted: Vec<u32> = state.items.iter().map(|entry| entry.number).collect();
        let _ = tokio::time::timeout(
            COLOR_WAIT,
            session.wait_for(|state| wanted.iter().all(|n| state.colors.contains_key(n))),
        )
        .await;
    }

    let state = session.snapshot();
    for entry in &state.items {
        if cli.colors {
            println!(
                "#{:03} {:<16} {}",
                entry.number,
                entry.name,
                state.color_for(entry.number)
            );
        } else {
            println!("#{:03} {:<16} {}", entry.number, entry.name, entry.image_url);
        }
    }
    println!(
        "{} shown, {} loaded{}",
        state.items.len(),
        if state.is_searching {
            state.cached_items.len()
        } else {
            state.items.len()
        },
        if state.end_reached { ", end of list" } else { "" }
    );

    if let Some(name) = cli.detail {
        session.load_detail(name)?;
        let view = session.wait_for_detail().await?;
        match view.result {
            Resource::Success { data } => {
                println!();
                println!("{} (#{})", data.display_name(), data.id);
                println!("Types:  {}", data.type_labels().join(", "));
                println!("Weight: {:.1} kg", data.weight_kg());
                println!("Height: {:.1} m", data.height_m());
                if !data.sprite_url.is_empty() {
                    println!("Sprite: {}", data.sprite_url);
                }
            }
            Resource::Error { message, .. } => eprintln!("{}: {message}", view.name),
            Resource::Loading => eprintln!("{}: still loading", view.name),
        }
    }

    session.shutdown()?;
    Ok(())
}

async fn load_pages(session: &mut SessionHandle, pages: usize) -> Result<()> {
    for requested in 0..pages {
        // the session asks for page 0 on its own
        if requested > 0 {
            session.load_next()?;
        }
        let state = session
            .wait_for(|state| !state.is_loading && (state.page > requested || state.has_error()))
            .await?;
        if state.has_error() {
            bail!("{}", state.load_error);
        }
        if state.end_reached {
            break;
        }
    }
    Ok(())
}
