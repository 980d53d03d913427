//! Signpost command line
//!
//! Renders the menus of a JSON or TOML navigation definition.
//!
//! Usage:
//!   signpost render menus.toml --menu main --current-url http://localhost/blog
//!   signpost list menus.json

mod config;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use signpost::{Navigation, NavigationDefinition, PermissionSet, RenderContext};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, split_list};

/// Signpost menu renderer.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render menus as HTML.
    Render {
        /// Definition file (.json or .toml).
        file: PathBuf,

        /// Menus to render, in order (default: every menu).
        #[arg(long = "menu")]
        menus: Vec<String>,

        /// URL of the page being rendered; matching items become active.
        #[arg(long)]
        current_url: Option<String>,

        /// Base URL overriding the definition's.
        #[arg(long)]
        base_url: Option<String>,

        /// Ability granted to the viewer; repeat or comma-separate. `*` grants all.
        #[arg(long = "permission")]
        permissions: Vec<String>,

        /// Print a JSON object of menu name to markup.
        #[arg(long)]
        json: bool,
    },

    /// List the menus and items of a definition.
    List {
        /// Definition file (.json or .toml).
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Command::Render {
            file,
            menus,
            current_url,
            base_url,
            permissions,
            json,
        } => {
            let mut definition = load_definition(&file)?;
            if let Some(base_url) = base_url.or(config.base_url) {
                definition.base_url = base_url;
            }
            if let Some(no_ssl) = config.no_ssl {
                definition.no_ssl = no_ssl;
            }

            let permissions = if permissions.is_empty() {
                config.permissions
            } else {
                permissions.iter().flat_map(|p| split_list(p)).collect()
            };

            let options = RenderOptions {
                menus,
                current_url: current_url.or(config.current_url),
                permissions,
            };
            let rendered = render(&definition, &options)?;

            if json {
                let object: BTreeMap<&str, &str> = rendered
                    .iter()
                    .map(|(name, html)| (name.as_str(), html.as_str()))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&object)?);
            } else {
                for (_, html) in &rendered {
                    println!("{html}");
                }
            }
        }
        Command::List { file } => {
            let definition = load_definition(&file)?;
            print!("{}", outline(&definition));
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Read a definition file, choosing the format from its extension.
fn load_definition(path: &Path) -> Result<NavigationDefinition> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read definition {}", path.display()))?;

    let definition = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => NavigationDefinition::from_toml_str(&source),
        Some("json") => NavigationDefinition::from_json_str(&source),
        other => bail!(
            "unsupported definition format {:?} for {}, expected .json or .toml",
            other.unwrap_or(""),
            path.display()
        ),
    }
    .with_context(|| format!("failed to parse definition {}", path.display()))?;

    debug!(path = %path.display(), menus = definition.menus.len(), "loaded definition");
    Ok(definition)
}

/// What to render and for whom.
#[derive(Debug, Default)]
struct RenderOptions {
    menus: Vec<String>,
    current_url: Option<String>,
    permissions: Vec<String>,
}

/// Render the requested menus, returning `(name, markup)` pairs in order.
fn render(
    definition: &NavigationDefinition,
    options: &RenderOptions,
) -> Result<Vec<(String, String)>> {
    let routes = definition
        .route_table()
        .context("failed to build route table")?;
    let mut navigation = Navigation::from_definition(definition);

    let authorizer = (!options.permissions.is_empty()).then(|| {
        if options.permissions.iter().any(|p| p == "*") {
            PermissionSet::admin()
        } else {
            PermissionSet::new(options.permissions.iter().map(String::as_str))
        }
    });

    let mut ctx = RenderContext::new(&routes);
    if let Some(url) = &options.current_url {
        let activated = navigation.refresh_active_state(&routes, url);
        info!(url = %url, activated, "activated items for current url");
        ctx = ctx.with_current_url(url);
    }
    if let Some(authorizer) = &authorizer {
        ctx = ctx.with_authorizer(authorizer);
    }

    let names: Vec<String> = if options.menus.is_empty() {
        definition.menus.iter().map(|m| m.name.clone()).collect()
    } else {
        options.menus.clone()
    };

    names
        .into_iter()
        .map(|name| {
            let html = navigation
                .render_menu(&name, &ctx)
                .with_context(|| format!("failed to render menu '{name}'"))?;
            Ok((name, html))
        })
        .collect()
}

/// Indented outline of every menu and item, with nicknames and link types.
fn outline(definition: &NavigationDefinition) -> String {
    let navigation = Navigation::from_definition(definition);
    let mut out = String::new();

    for def in &definition.menus {
        let Some(menu) = navigation.get_menu(&def.name) else {
            continue;
        };
        out.push_str(&format!("{} ({} items)\n", menu.name(), menu.count()));
        for item in menu.all() {
            let indent = "  ".repeat(menu.depth(item.id()) + 1);
            out.push_str(&format!(
                "{indent}{} [{}] {}\n",
                item.title(),
                item.nickname(),
                item.link().link_type()
            ));
        }
    }

    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const DEFINITION: &str = r#"{
        "base_url": "http://localhost",
        "routes": {"home": "/", "admin": "/admin"},
        "menus": [
            {"name": "main", "items": [
                {"title": "Home", "link": {"type": "route", "name": "home"}},
                {"title": "Admin", "link": {"type": "route", "name": "admin"},
                 "permission": "administer site",
                 "children": [{"title": "Users"}]}
            ]},
            {"name": "footer", "items": [{"title": "Imprint"}]}
        ]
    }"#;

    fn definition() -> NavigationDefinition {
        NavigationDefinition::from_json_str(DEFINITION).unwrap()
    }

    #[test]
    fn test_render_all_menus_in_definition_order() {
        let rendered = render(&definition(), &RenderOptions::default()).unwrap();
        let names: Vec<&str> = rendered.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["main", "footer"]);
        assert!(rendered[0].1.contains("Admin"));
    }

    #[test]
    fn test_render_with_permissions_and_current_url() {
        let options = RenderOptions {
            menus: vec!["main".to_string()],
            current_url: Some("http://localhost".to_string()),
            permissions: vec!["view content".to_string()],
        };
        let rendered = render(&definition(), &options).unwrap();
        assert_eq!(rendered.len(), 1);
        let html = &rendered[0].1;
        assert!(html.contains("<li class=\"active actual-link\">"));
        assert!(!html.contains("Admin"));

        let options = RenderOptions {
            permissions: vec!["*".to_string()],
            ..options
        };
        let rendered = render(&definition(), &options).unwrap();
        assert!(rendered[0].1.contains("Admin"));
    }

    #[test]
    fn test_render_unknown_menu_fails() {
        let options = RenderOptions {
            menus: vec!["sidebar".to_string()],
            ..RenderOptions::default()
        };
        let err = render(&definition(), &options).unwrap_err();
        assert!(err.to_string().contains("sidebar"));
    }

    #[test]
    fn test_outline() {
        let outline = outline(&definition());
        assert_eq!(
            outline,
            "main (3 items)\n  Home [home] route\n  Admin [admin] route\n    Users [users] empty\n\
             footer (1 items)\n  Imprint [imprint] empty\n"
        );
    }

    #[test]
    fn test_missing_file() {
        let err = load_definition(Path::new("menus.yaml")).unwrap_err();
        assert!(err.to_string().contains("failed to read definition"));
    }
}
