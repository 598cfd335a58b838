use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use std::{fs, path::PathBuf};
use unipage::{BakeConfig, ColorConverter, Manifest, PageNaming, PngWriter, Preview, RenderHint, SwashLoader};

// ---------------------------------------------
// unipage: Unicode atlas page baker
// Modes:
//   1) full sweep (default)      -> <output>/unicode_page_XX.png × 256 + glyph_sizes.bin
//   2) --preview <page>          -> one page at --preview-output, no width table
// ---------------------------------------------
#[derive(Parser, Debug)]
#[command(name = "unipage", author, version, about = "unipage: bake a font into 16x16 Unicode atlas pages", long_about = None)]
struct Cli {
  /// Input font (TTF/OTF/TTC)
  #[arg(short = 'i', long = "input", default_value = "font.ttf")]
  input: PathBuf,

  /// Output directory for the page atlases
  #[arg(short = 'o', long = "output", default_value = "out")]
  output: PathBuf,

  /// Glyph pixel size
  #[arg(short = 'f', long = "font-size", default_value_t = 14)]
  font_size: u32,

  /// Tile size in pixels (must be at least --font-size)
  #[arg(short = 's', long = "tile-size", default_value_t = 16)]
  tile_size: u32,

  /// Extra workers (0 renders everything on the main thread)
  #[arg(short = 't', long = "workers", default_value_t = 0)]
  workers: usize,

  /// Face index inside a font collection
  #[arg(long = "face-index", default_value_t = 0)]
  face_index: u32,

  /// Render hint: 0 = normal, 1 = light, 2 = mono
  #[arg(long = "hint", default_value_t = 0)]
  hint: u8,

  /// Pocket naming: glyph_XX.png with uppercase hex
  #[arg(long = "pocket", default_value_t = false)]
  pocket: bool,

  /// Width table path [default: <output>/glyph_sizes.bin]
  #[arg(long = "metadata")]
  metadata: Option<PathBuf>,

  /// Pixel format of the atlases
  #[arg(long = "color", value_enum, default_value_t = ColorArg::GrayAlpha)]
  color: ColorArg,

  /// Tint for --color tint, as RRGGBB
  #[arg(long = "tint", default_value = "FFFFFF")]
  tint: String,

  /// Render only this page (hex, e.g. 4e or U+4E2D) to --preview-output
  #[arg(long = "preview")]
  preview: Option<String>,

  /// Where --preview writes its page
  #[arg(long = "preview-output", default_value = "preview.png")]
  preview_output: PathBuf,

  /// Also write a JSON summary of the sweep
  #[arg(long = "manifest")]
  manifest: Option<PathBuf>,

  /// More logging (-v debug, -vv trace)
  #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
  verbose: u8,

  /// Only log errors
  #[arg(short = 'q', long = "quiet", default_value_t = false)]
  quiet: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorArg {
  /// White + coverage alpha (LA8)
  GrayAlpha,
  /// Coverage as luma (L8)
  Gray,
  /// --tint color + coverage alpha (RGBA8)
  Tint,
}

fn parse_tint(s: &str) -> Result<[u8; 3]> {
  let hex = s.trim().trim_start_matches('#');
  if hex.len() != 6 {
    bail!("bad --tint (expected RRGGBB): {s}");
  }
  let v = u32::from_str_radix(hex, 16).map_err(|_| anyhow!("bad --tint (not hex): {s}"))?;
  Ok([(v >> 16) as u8, (v >> 8) as u8, v as u8])
}

fn init_logging(cli: &Cli) {
  let level = match (cli.quiet, cli.verbose) {
    (true, _) => log::LevelFilter::Error,
    (false, 0) => log::LevelFilter::Info,
    (false, 1) => log::LevelFilter::Debug,
    (false, _) => log::LevelFilter::Trace,
  };
  env_logger::Builder::new().filter_level(level).parse_default_env().init();
}

fn build_config(cli: &Cli) -> Result<BakeConfig> {
  let mut config = BakeConfig::new(&cli.input, &cli.output);
  config.face_index = cli.face_index;
  config.font_size = cli.font_size;
  config.tile_size = cli.tile_size;
  config.workers = cli.workers;
  config.hint = RenderHint::try_from(cli.hint)?;
  config.naming = if cli.pocket { PageNaming::Pocket } else { PageNaming::Unicode };
  if let Some(metadata) = &cli.metadata {
    config.metadata_path = metadata.clone();
  }
  config.color = match cli.color {
    ColorArg::GrayAlpha => ColorConverter::GrayAlpha,
    ColorArg::Gray => ColorConverter::Gray,
    ColorArg::Tint => ColorConverter::Tint(parse_tint(&cli.tint)?),
  };
  if let Some(page) = &cli.preview {
    config.preview = Some(Preview { page: unipage::parse_page(page)?, path: cli.preview_output.clone() });
  }
  Ok(config)
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_logging(&cli);

  let config = build_config(&cli).context("invalid options")?;
  config.validate().context("invalid options")?;

  let loader = SwashLoader::open(&config.font_path, config.face_index, config.font_size, config.hint)
    .with_context(|| format!("load font {:?}", config.font_path))?;

  let report = unipage::bake(&config, &loader, &PngWriter).context("bake")?;

  if let Some(path) = &cli.manifest {
    let json_text = serde_json::to_string_pretty(&Manifest::new(&config, &report))?;
    fs::write(path, &json_text).with_context(|| format!("write {:?}", path))?;
  }

  match &report.metadata {
    Some(metadata) => log::info!(
      "wrote {} pages to {} and widths to {}",
      report.pages.len(),
      config.output_dir.display(),
      metadata.display()
    ),
    None => log::info!("wrote preview to {}", cli.preview_output.display()),
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("unipage").chain(args.iter().copied())).expect("parse")
  }

  #[test]
  fn defaults_match_original_tool() {
    let config = build_config(&cli(&[])).unwrap();
    assert_eq!(config.font_path, PathBuf::from("font.ttf"));
    assert_eq!((config.font_size, config.tile_size, config.workers), (14, 16, 0));
    assert_eq!(config.metadata_path, PathBuf::from("out").join("glyph_sizes.bin"));
    assert_eq!(config.naming, PageNaming::Unicode);
    assert_eq!(config.preview, None);
  }

  #[test]
  fn options_map_onto_config() {
    let config = build_config(&cli(&[
      "-i", "a.otf", "-o", "dst", "-f", "12", "-s", "12", "-t", "3", "--hint", "2", "--pocket", "--color", "tint",
      "--tint", "#ff8000", "--preview", "U+4E2D", "--preview-output", "p.png",
    ]))
    .unwrap();
    assert_eq!(config.hint, RenderHint::Mono);
    assert_eq!(config.naming, PageNaming::Pocket);
    assert_eq!(config.color, ColorConverter::Tint([0xFF, 0x80, 0x00]));
    assert_eq!(config.preview, Some(Preview { page: 0x4E, path: "p.png".into() }));
    assert_eq!(config.workers, 3);
  }

  #[test]
  fn bad_hint_is_rejected() {
    assert!(build_config(&cli(&["--hint", "5"])).is_err());
  }

  #[test]
  fn bad_tint_is_rejected() {
    assert!(parse_tint("12345").is_err());
    assert!(parse_tint("gggggg").is_err());
    assert_eq!(parse_tint("102030").unwrap(), [0x10, 0x20, 0x30]);
  }
}
