//! board-viewer: a terminal viewer for a catalog of electronic boards and
//! components.
//!
//! Two lists on the left, a shared detail pane (image + formatted text) on
//! the right. The catalog is read once from `boards.json` and
//! `components.json`.

mod app;
mod cli;
mod data;
mod logging;
mod presenter;
mod ui;

use std::io::{self, Write};

use anyhow::{bail, Result};
use cli::{AppConfig, Cli, Commands, InfoArgs};
use data::{Catalog, ItemKind};
use logging::LogTarget;
use presenter::{build_payload, DisplayImage, NO_IMAGE_TEXT};
use ui::preview::load_scaled;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let config = AppConfig::from_cli(&cli);
    let command = cli.command();

    match command {
        Commands::Show => {
            logging::init_tracing(LogTarget::File, config.debug)?;
            app::run(config)?;
        }
        Commands::List { json } => {
            logging::init_tracing(LogTarget::Stderr, config.debug)?;
            let catalog = app::load_catalog(&config)?;
            print_list(&catalog, json, &mut io::stdout().lock())?;
        }
        Commands::Info(args) => {
            logging::init_tracing(LogTarget::Stderr, config.debug)?;
            let catalog = app::load_catalog(&config)?;
            print_info(&catalog, &args, &mut io::stdout().lock())?;
        }
    }

    Ok(())
}

/// `list`: labels with their indices, or the raw records as JSON
fn print_list(catalog: &Catalog, json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, catalog)?;
        writeln!(out)?;
        return Ok(());
    }

    for (heading, kind) in [("Boards", ItemKind::Board), ("Components", ItemKind::Component)] {
        writeln!(out, "{heading}:")?;
        for (i, label) in catalog.labels(kind).into_iter().enumerate() {
            writeln!(out, "  {i:>3}  {label}")?;
        }
    }
    Ok(())
}

/// `info`: the same payload the detail pane would show
fn print_info(catalog: &Catalog, args: &InfoArgs, out: &mut impl Write) -> Result<()> {
    let (kind, index) = match (args.board, args.component) {
        (Some(i), _) => (ItemKind::Board, i),
        (None, Some(i)) => (ItemKind::Component, i),
        (None, None) => bail!("Specify --board or --component"),
    };

    let Some(item) = catalog.item(kind, index) else {
        bail!(
            "No {} at index {index} (catalog has {})",
            kind.label(),
            catalog.len(kind)
        );
    };

    let payload = build_payload(&item);
    // Decode like the viewer does so an unreadable file reports the placeholder
    let image = match &payload.image {
        DisplayImage::Path(path) => match load_scaled(path) {
            Ok(_) => path.display().to_string(),
            Err(err) => {
                tracing::warn!(error = %err, "image cannot be shown");
                NO_IMAGE_TEXT.to_string()
            }
        },
        DisplayImage::NoImage => NO_IMAGE_TEXT.to_string(),
    };

    writeln!(out, "Image: {image}")?;
    writeln!(out)?;
    writeln!(out, "{}", payload.body)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use data::{BoardRecord, ComponentRecord};

    fn catalog() -> Catalog {
        Catalog::new(
            vec![BoardRecord {
                name: Some("UnoBoard".to_string()),
                description: Some("A test board".to_string()),
                image: Some("missing.png".to_string()),
                ..Default::default()
            }],
            vec![ComponentRecord {
                name: Some("LED".to_string()),
                ..Default::default()
            }],
        )
    }

    fn info(args: InfoArgs) -> Result<String> {
        info_for(&catalog(), args)
    }

    fn info_for(catalog: &Catalog, args: InfoArgs) -> Result<String> {
        let mut out = Vec::new();
        print_info(catalog, &args, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn board_with_image(path: &std::path::Path) -> Catalog {
        Catalog::new(
            vec![BoardRecord {
                name: Some("Uno".to_string()),
                description: Some("d".to_string()),
                image: Some(path.display().to_string()),
                ..Default::default()
            }],
            vec![],
        )
    }

    fn first_board() -> InfoArgs {
        InfoArgs {
            board: Some(0),
            component: None,
        }
    }

    #[test]
    fn test_print_list_plain() {
        let mut out = Vec::new();
        print_list(&catalog(), false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Boards:\n    0  UnoBoard\nComponents:\n    0  LED\n");
    }

    #[test]
    fn test_print_list_json_round_trips() {
        let mut out = Vec::new();
        print_list(&catalog(), true, &mut out).unwrap();
        let parsed: Catalog = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, catalog());
    }

    #[test]
    fn test_print_info_board() {
        let text = info(InfoArgs {
            board: Some(0),
            component: None,
        })
        .unwrap();
        assert_eq!(
            text,
            "Image: No image\n\n### UnoBoard\n\nA test board\n\nNotes: \n"
        );
    }

    #[test]
    fn test_print_info_out_of_range() {
        let err = info(InfoArgs {
            board: None,
            component: Some(3),
        })
        .unwrap_err();
        assert!(err.to_string().contains("No component at index 3"));
    }

    #[test]
    fn test_print_info_undecodable_image_shows_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uno.png");
        std::fs::write(&path, b"not an image").unwrap();

        let text = info_for(&board_with_image(&path), first_board()).unwrap();
        assert!(text.starts_with("Image: No image\n"));
    }

    #[test]
    fn test_print_info_decodable_image_shows_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uno.png");
        image::RgbaImage::from_pixel(4, 2, image::Rgba([0, 0, 255, 255]))
            .save(&path)
            .unwrap();

        let text = info_for(&board_with_image(&path), first_board()).unwrap();
        assert!(text.starts_with(&format!("Image: {}\n", path.display())));
    }
}
