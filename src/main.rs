//! Fame Gallery CLI
//!
//! Command-line access to the gallery and the admin operations:
//! - Browse entries and categories
//! - Sign in / out (the token is kept in the session file)
//! - Add, delete and upload
//! - Serve the built browser app

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fame_gallery::{
    config::generate_default_config, AdminState, AdminView, Config, ConsoleNotifier, DeleteOutcome,
    FileStore, GalleryView, HttpGateway, ImageAsset, Item, LoggingConfig, Session, UploadFile,
};

type Admin = AdminView<HttpGateway, FileStore, ConsoleNotifier>;
type Gallery = GalleryView<HttpGateway, ConsoleNotifier>;

#[derive(Parser)]
#[command(name = "fame-gallery")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Person gallery with a password-gated admin")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/fame-gallery/config.toml, /etc/fame-gallery, ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List gallery entries
    List {
        /// Only entries of this category id
        #[arg(long)]
        category: Option<i64>,
    },

    /// Show one entry in detail
    Show {
        /// Entry id
        id: i64,
    },

    /// List categories with entry counts
    Categories,

    /// Sign in to the admin
    Login {
        #[arg(short, long)]
        username: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show session and endpoint status
    Status,

    /// Add an entry
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        bio: String,
        /// Category id (default: configured default, else the first category)
        #[arg(long)]
        category: Option<i64>,
        /// Telegram handle, e.g. @username
        #[arg(short, long)]
        telegram: Option<String>,
        /// Image URL
        #[arg(long, conflicts_with_all = ["file", "pick"])]
        image_url: Option<String>,
        /// Upload this image first
        #[arg(long, conflicts_with = "pick")]
        file: Option<PathBuf>,
        /// Reuse an uploaded image by its number in `images`
        #[arg(long)]
        pick: Option<usize>,
    },

    /// Delete an entry
    Delete {
        /// Entry id
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Upload an image and print its URL
    Upload {
        /// Image file
        path: PathBuf,
    },

    /// List uploaded images
    Images,

    /// Serve the built browser app
    Serve,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    init_logging(&config.logging);

    let json = cli.format == "json";

    match cli.command {
        Commands::List { category } => {
            let gallery = gallery(&config)?;
            gallery.load().await;
            gallery.set_filter(category);

            let items = gallery.visible_items();
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else if let Some(empty) = gallery.empty_state() {
                println!("{}", empty.title());
                println!("{}", empty.hint());
            } else {
                print_items(&items);
            }
        }

        Commands::Show { id } => {
            let gallery = gallery(&config)?;
            gallery.load().await;
            if !gallery.select(id) {
                bail!("No entry with id {}", id);
            }
            let detail = gallery
                .detail()
                .ok_or_else(|| anyhow!("No entry with id {}", id))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&detail.item)?);
            } else {
                let item = &detail.item;
                println!("{}", item.name);
                if let Some((name, color)) = &detail.badge {
                    println!("  Category: {} ({})", name, color);
                }
                println!("  Added:    {}", detail.added_on);
                if let Some(link) = &detail.telegram_link {
                    println!("  Telegram: {}", link);
                }
                println!("  Image:    {}", item.image_url);
                println!();
                println!("{}", item.bio);
            }
        }

        Commands::Categories => {
            let gallery = gallery(&config)?;
            gallery.load().await;

            if json {
                println!("{}", serde_json::to_string_pretty(&gallery.categories())?);
            } else {
                println!("{:<6} {:<24} {:<10} {}", "ID", "Name", "Color", "Entries");
                println!("{}", "-".repeat(50));
                for chip in gallery.filter_chips() {
                    println!(
                        "{:<6} {:<24} {:<10} {}",
                        chip.filter.map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
                        chip.label,
                        chip.color.as_deref().unwrap_or("-"),
                        chip.count
                    );
                }
            }
        }

        Commands::Login { username, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Password: ")?,
            };

            let admin = admin(&config)?;
            admin.edit_login_form(|form| {
                form.username = username;
                form.password = password;
            });
            if !admin.login().await {
                bail!("Login failed");
            }
            println!("Session saved to {:?}", config.token_file());
        }

        Commands::Logout => {
            admin(&config)?.logout();
            println!("Logged out");
        }

        Commands::Status => {
            let session = Session::new(FileStore::new(config.token_file()));

            println!("Fame Gallery v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!(
                "Session:  {}",
                if session.is_authenticated() {
                    "logged in"
                } else {
                    "not logged in"
                }
            );
            println!("  File:   {:?}", config.token_file());
            println!();
            println!("Endpoints:");
            println!("  Items:  {}", config.endpoints.items_url);
            println!("  Auth:   {}", config.endpoints.auth_url);
            println!("  Images: {}", config.endpoints.images_url);
            println!("  Upload: {}", config.endpoints.upload_url);
        }

        Commands::Add {
            name,
            bio,
            category,
            telegram,
            image_url,
            file,
            pick,
        } => {
            let admin = logged_in_admin(&config).await?;

            if let Some(path) = file {
                let file = UploadFile::from_path(&path)
                    .with_context(|| format!("Failed to read {:?}", path))?;
                admin
                    .upload_image(file)
                    .await
                    .ok_or_else(|| anyhow!("Image upload failed"))?;
            } else if let Some(number) = pick {
                admin.open_picker().await;
                let image = number
                    .checked_sub(1)
                    .and_then(|i| admin.picker_images().get(i).cloned())
                    .ok_or_else(|| anyhow!("No uploaded image #{}", number))?;
                admin.select_image(&image.url);
                admin.confirm_picker();
            } else if let Some(url) = image_url {
                admin.edit_form(|form| form.image_url = url);
            }

            admin.edit_form(|form| {
                form.name = name;
                form.bio = bio;
                form.telegram_username = telegram.unwrap_or_default();
                if category.is_some() {
                    form.category_id = category;
                }
            });

            if !admin.submit_item().await {
                bail!("Entry was not added");
            }
        }

        Commands::Delete { id, yes } => {
            let admin = logged_in_admin(&config).await?;
            let label = admin
                .item(id)
                .map(|item| format!("\"{}\" (#{})", item.name, id))
                .unwrap_or_else(|| format!("#{}", id));

            let outcome = admin
                .delete_item(id, || yes || confirm(&format!("Delete {}?", label)))
                .await;

            match outcome {
                DeleteOutcome::Deleted => {}
                DeleteOutcome::Declined => println!("Cancelled"),
                DeleteOutcome::Failed => bail!("Entry {} was not deleted", id),
                DeleteOutcome::Skipped => bail!("Another request is in progress"),
            }
        }

        Commands::Upload { path } => {
            let admin = logged_in_admin(&config).await?;
            let file = UploadFile::from_path(&path)
                .with_context(|| format!("Failed to read {:?}", path))?;

            let url = admin
                .upload_image(file)
                .await
                .ok_or_else(|| anyhow!("Image upload failed"))?;
            println!("{}", url);
        }

        Commands::Images => {
            let admin = admin(&config)?;
            admin.open_picker().await;
            let images = admin.picker_images();
            admin.cancel_picker();

            if json {
                println!("{}", serde_json::to_string_pretty(&images)?);
            } else if images.is_empty() {
                println!("No uploaded images yet.");
            } else {
                print_images(&images);
            }
        }

        Commands::Serve => {
            tracing::info!("Fame Gallery v{}", env!("CARGO_PKG_VERSION"));
            fame_gallery::serve(&config.server).await?;
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Install the tracing subscriber; `RUST_LOG` wins over the config level
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("fame_gallery={},tower_http={}", logging.level, logging.level))
    });
    let registry = tracing_subscriber::registry().with(filter);

    // stderr keeps stdout for command output
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

fn http_gateway(config: &Config) -> anyhow::Result<HttpGateway> {
    Ok(HttpGateway::new(
        config.endpoints.clone(),
        config.client.timeout(),
    )?)
}

fn gallery(config: &Config) -> anyhow::Result<Gallery> {
    Ok(GalleryView::new(
        http_gateway(config)?,
        ConsoleNotifier,
        config.display.date_locale,
    ))
}

fn admin(config: &Config) -> anyhow::Result<Admin> {
    Ok(AdminView::new(
        http_gateway(config)?,
        Session::new(FileStore::new(config.token_file())),
        ConsoleNotifier,
        config.admin.options(),
    ))
}

async fn logged_in_admin(config: &Config) -> anyhow::Result<Admin> {
    let admin = admin(config)?;
    if admin.mount().await != AdminState::LoggedIn {
        bail!("Not logged in. Run `fame-gallery login -u <username>` first");
    }
    Ok(admin)
}

fn prompt(label: &str) -> anyhow::Result<String> {
    eprint!("{}", label);
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Blocking y/N prompt; anything but yes declines
fn confirm(question: &str) -> bool {
    match prompt(&format!("{} [y/N] ", question)) {
        Ok(answer) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn print_items(items: &[Item]) {
    println!("{:<6} {:<28} {:<18} {}", "ID", "Name", "Category", "Telegram");
    println!("{}", "-".repeat(70));

    for item in items {
        println!(
            "{:<6} {:<28} {:<18} {}",
            item.id,
            truncate(&item.name, 28),
            item.badge().map(|(name, _)| name).unwrap_or("-"),
            item.handle().unwrap_or("-")
        );
    }
}

fn print_images(images: &[ImageAsset]) {
    println!("{:<4} {:<32} {:>10}  {}", "#", "Name", "Size", "URL");
    println!("{}", "-".repeat(80));

    for (i, image) in images.iter().enumerate() {
        println!(
            "{:<4} {:<32} {:>10}  {}",
            i + 1,
            truncate(&image.name, 32),
            format_size(image.size),
            image.url
        );
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}
